//! Schema patches.
//!
//! Every special case the resolver applies to a specific class or member is
//! declared here, so that the full set of deviations from the general rules
//! can be read (and tested) in one place.

/// Classes dropped before the tree is built.
pub const DENIED_CLASSES: &[&str] = &["GDScriptNativeClass", "GDScriptFunctionState"];

/// Methods whose normalized name is fixed instead of derived from the symbol,
/// keyed by (class symbol, method symbol).
pub const METHOD_NAMES: &[(&str, &str, &[&str])] = &[
    ("TileMap", "get_cellv", &["Get", "Cell", "Vector"]),
    ("TileMap", "set_cellv", &["Set", "Cell", "Vector"]),
    ("GridMap", "get_cell_item", &["Get", "Cell", "Item", "Index"]),
];

/// Type symbol of the generic error enumeration.
pub const ERROR_TYPE: &str = "enum.Error";

/// Methods allowed to return the error enumeration as a value rather than
/// signalling failure, keyed by (class symbol, method symbol).
pub const ERROR_ACCESSORS: &[(&str, &str)] = &[
    ("JSONParseResult", "get_error"),
    ("PacketPeer", "get_packet_error"),
];

/// Properties whose nominal setter has a different shape and must be treated
/// as get-only, keyed by (class symbol, property name).
pub const GET_ONLY_PROPERTIES: &[(&str, &str)] = &[("ARVRPositionalTracker", "rumble")];

/// Methods of the root class that are always hidden from direct exposure.
/// Each one must exist.
pub const ROOT_HIDDEN_METHODS: &[&str] = &["connect", "disconnect", "emit_signal"];

/// Methods of the reference-counted base class that are always hidden.
pub const REFERENCE_HIDDEN_METHODS: &[&str] = &["reference", "unreference"];

/// Enumerations with this name factor every case against [`FLAG_WORD`].
pub const FLAGS_ENUMERATION: &str = "Flags";
pub const FLAG_WORD: &str = "Flag";

/// Cases of a `Flags` enumeration whose name is fixed.
pub const FLAG_CASE_NAMES: &[(&str, &[&str])] = &[("FLAGS_DEFAULT", &["Default"])];

/// Constant symbol that only marks the end of a range.
pub const MAXIMUM_SENTINEL: &str = "FLAG_MAX";

pub fn method_name(class: &str, method: &str) -> Option<&'static [&'static str]> {
    METHOD_NAMES
        .iter()
        .find(|(c, m, _)| *c == class && *m == method)
        .map(|(_, _, name)| *name)
}

pub fn is_error_accessor(class: &str, method: &str) -> bool {
    ERROR_ACCESSORS.contains(&(class, method))
}

pub fn is_get_only(class: &str, property: &str) -> bool {
    GET_ONLY_PROPERTIES.contains(&(class, property))
}

pub fn flag_case_name(case: &str) -> Option<&'static [&'static str]> {
    FLAG_CASE_NAMES
        .iter()
        .find(|(symbol, _)| *symbol == case)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_name_lookup() {
        assert_eq!(
            method_name("TileMap", "get_cellv"),
            Some(&["Get", "Cell", "Vector"][..])
        );
        assert_eq!(method_name("TileMap", "get_cell"), None);
        assert_eq!(method_name("GridMap", "get_cellv"), None);
    }

    #[test]
    fn test_error_accessors() {
        assert!(is_error_accessor("PacketPeer", "get_packet_error"));
        assert!(!is_error_accessor("PacketPeer", "put_packet"));
    }

    #[test]
    fn test_quirk_keys_are_unique() {
        for (i, (class, method, _)) in METHOD_NAMES.iter().enumerate() {
            assert!(
                METHOD_NAMES[i + 1..]
                    .iter()
                    .all(|(c, m, _)| (c, m) != (class, method))
            );
        }
        for (i, entry) in ERROR_ACCESSORS.iter().enumerate() {
            assert!(!ERROR_ACCESSORS[i + 1..].contains(entry));
        }
    }
}
