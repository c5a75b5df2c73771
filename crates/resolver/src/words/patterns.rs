/// A single normalization rule.
///
/// `word` is replaced by `replacement` when it is immediately followed by every
/// component of `tail`. The tail is consumed together with the word, so a tail
/// word that should survive must be repeated in the replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub word: &'static str,
    pub tail: &'static [&'static str],
    pub replacement: &'static [&'static str],
}

const fn always(word: &'static str, replacement: &'static [&'static str]) -> Pattern {
    Pattern {
        word,
        tail: &[],
        replacement,
    }
}

const fn before(
    word: &'static str,
    tail: &'static [&'static str],
    replacement: &'static [&'static str],
) -> Pattern {
    Pattern {
        word,
        tail,
        replacement,
    }
}

pub const PATTERNS: &[Pattern] = &[
    // acronyms that snake case flattens
    always("2d", &["2D"]),
    always("3d", &["3D"]),
    always("Aabb", &["AABB"]),
    always("Arvr", &["ARVR"]),
    always("Bbcode", &["BBCode"]),
    always("Csg", &["CSG"]),
    always("Fov", &["FOV"]),
    always("Fps", &["FPS"]),
    always("Gi", &["GI"]),
    always("Gles2", &["GLES2"]),
    always("Gles3", &["GLES3"]),
    always("Hdr", &["HDR"]),
    always("Http", &["HTTP"]),
    always("Id", &["ID"]),
    always("Ik", &["IK"]),
    always("Ip", &["IP"]),
    always("Json", &["JSON"]),
    always("Lod", &["LOD"]),
    always("Msaa", &["MSAA"]),
    always("Rid", &["RID"]),
    always("Rpc", &["RPC"]),
    always("Ssl", &["SSL"]),
    always("Tcp", &["TCP"]),
    always("Udp", &["UDP"]),
    always("Ui", &["UI"]),
    always("Url", &["URL"]),
    always("Uv", &["UV"]),
    always("Uv2", &["UV2"]),
    always("Xml", &["XML"]),
    // abbreviations
    always("Dst", &["Destination"]),
    always("Len", &["Length"]),
    always("Ofs", &["Offset"]),
    always("Param", &["Parameter"]),
    always("Params", &["Parameters"]),
    always("Pos", &["Position"]),
    always("Src", &["Source"]),
    always("Tex", &["Texture"]),
    // abbreviations that are only unambiguous in context
    before("Rect", &["2"], &["Rectangle", "2"]),
    before("Var", &["Name"], &["Variable", "Name"]),
    before("Var", &["Type"], &["Variable", "Type"]),
    before("Var", &["Type", "Max"], &["Variable", "Type", "Count"]),
    before("Mesh", &["Lib"], &["Mesh", "Library"]),
];

/// Identifiers that cannot be used bare as a callable name in the generated
/// bindings.
pub const RESERVED: &[&str] = &[
    "as",
    "associatedtype",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "default",
    "defer",
    "deinit",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "fileprivate",
    "for",
    "func",
    "guard",
    "if",
    "import",
    "in",
    "init",
    "inout",
    "internal",
    "is",
    "let",
    "nil",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "repeat",
    "rethrows",
    "return",
    "self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "var",
    "where",
    "while",
];

pub fn is_reserved(identifier: &str) -> bool {
    RESERVED.binary_search(&identifier).is_ok()
}
