//! Identifier normalization.
//!
//! Schema symbols arrive in a mix of conventions: class and enumeration names
//! are pascal case (`HTTPRequest`, `Node2D`), members and constants are snake
//! case (`get_var_name`, `FLAG_MAX`), and both are full of abbreviations and
//! prefixes that only repeat the name of the enclosing scope. [`Words`] is the
//! word-sequence form every identifier passes through before it reaches the
//! resolved tree:
//!
//! 1. **Split** the raw symbol into capitalized components
//! 2. **Normalize** the components against the pattern table
//! 3. **Factor** out words already implied by the enclosing scope
//! 4. **Render** either the display form or the callable form

mod patterns;

pub use patterns::{PATTERNS, Pattern, RESERVED, is_reserved};

use rustc_hash::FxHashSet;
use serde::{Serialize, Serializer};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Component substituted for an identifier whose every word was factored away.
pub const PLACEHOLDER: &str = "_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Words {
    components: SmallVec<[String; 4]>,
}

impl Words {
    pub fn new<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new([PLACEHOLDER])
    }

    /// Splits a pascal-case symbol on case transitions and underscores.
    ///
    /// An uppercase run followed by a lowercase letter gives up its last
    /// letter to the next word (`HTTPRequest` -> `HTTP`, `Request`). Digits
    /// start a new word after a letter and keep a trailing uppercase run
    /// (`Node2D` -> `Node`, `2D`). A leading underscore is kept as its own
    /// component.
    pub fn split_pascal(symbol: &str) -> Self {
        let characters: Vec<char> = symbol.chars().collect();
        let mut components = SmallVec::new();
        let mut current = String::new();

        for (i, &character) in characters.iter().enumerate() {
            if character == '_' {
                if i == 0 {
                    components.push(PLACEHOLDER.to_string());
                }
                Self::flush(&mut current, &mut components);
                continue;
            }

            if !current.is_empty() && i > 0 {
                let previous = characters[i - 1];
                let next = characters.get(i + 1).copied();
                if Self::is_boundary(previous, character, next) {
                    Self::flush(&mut current, &mut components);
                }
            }
            current.push(character);
        }
        Self::flush(&mut current, &mut components);

        Self { components }
    }

    /// Splits a snake-case symbol on underscores.
    ///
    /// Each segment is capitalized and the rest of it lower-cased, so
    /// `get_var` and `GET_VAR` both become `Get`, `Var`. A leading underscore
    /// is kept as its own component.
    pub fn split_snake(symbol: &str) -> Self {
        let mut components = SmallVec::new();
        if symbol.starts_with('_') {
            components.push(PLACEHOLDER.to_string());
        }

        for segment in symbol.split('_').filter(|segment| !segment.is_empty()) {
            let mut characters = segment.chars();
            if let Some(first) = characters.next() {
                let mut component: String = first.to_uppercase().collect();
                component.push_str(&characters.as_str().to_lowercase());
                components.push(component);
            }
        }

        Self { components }
    }

    fn is_boundary(previous: char, character: char, next: Option<char>) -> bool {
        let next_is_lowercase = next.is_some_and(char::is_lowercase);

        (previous.is_lowercase() && character.is_uppercase())
            || (previous.is_alphabetic() && character.is_ascii_digit())
            || ((previous.is_uppercase() || previous.is_ascii_digit())
                && character.is_uppercase()
                && next_is_lowercase)
    }

    fn flush(current: &mut String, components: &mut SmallVec<[String; 4]>) {
        if current.is_empty() {
            return;
        }

        let word = std::mem::take(current);
        let mut characters = word.chars();
        match characters.next() {
            Some(first) if first.is_lowercase() => {
                let mut capitalized: String = first.to_uppercase().collect();
                capitalized.push_str(characters.as_str());
                components.push(capitalized);
            }
            _ => components.push(word),
        }
    }

    /// Expands abbreviations using the built-in pattern table.
    pub fn normalized(&self) -> Self {
        self.normalized_with(PATTERNS)
    }

    /// Single left-to-right pass; at each position the pattern with the
    /// longest matching tail wins.
    pub fn normalized_with(&self, patterns: &[Pattern]) -> Self {
        let mut components = SmallVec::with_capacity(self.components.len());
        let mut i = 0;

        while i < self.components.len() {
            let word = &self.components[i];
            let following = &self.components[i + 1..];

            let best = patterns
                .iter()
                .filter(|pattern| pattern.word == word.as_str())
                .filter(|pattern| {
                    pattern.tail.len() <= following.len()
                        && pattern
                            .tail
                            .iter()
                            .zip(following)
                            .all(|(expected, actual)| *expected == actual.as_str())
                })
                .max_by_key(|pattern| pattern.tail.len());

            match best {
                Some(pattern) => {
                    components.extend(pattern.replacement.iter().map(|word| word.to_string()));
                    i += 1 + pattern.tail.len();
                }
                None => {
                    components.push(word.clone());
                    i += 1;
                }
            }
        }

        Self { components }
    }

    /// Removes the longest overlap between a suffix of `scope` and a prefix of
    /// `self`.
    ///
    /// A fully consumed identifier becomes the placeholder. Candidates that
    /// start with a digit or appear in `forbidden` are rejected in favor of
    /// the next-shorter overlap, and if none qualifies the identifier is
    /// returned unchanged.
    pub fn factoring(&self, scope: &Words, forbidden: &FxHashSet<Words>) -> Words {
        let longest = scope.len().min(self.len());

        for overlap in (1..=longest).rev() {
            if scope.components[scope.len() - overlap..] != self.components[..overlap] {
                continue;
            }

            let candidate = if overlap == self.len() {
                Words::placeholder()
            } else {
                Words {
                    components: self.components[overlap..].iter().cloned().collect(),
                }
            };

            if candidate.starts_with_digit() || forbidden.contains(&candidate) {
                continue;
            }
            return candidate;
        }

        self.clone()
    }

    /// Longest run of leading components shared by every member of `group`.
    pub fn greatest_common_prefix<'a, I>(group: I) -> Words
    where
        I: IntoIterator<Item = &'a Words>,
    {
        let mut group = group.into_iter();
        let Some(first) = group.next() else {
            return Words::default();
        };

        let mut length = first.len();
        for words in group {
            length = first
                .components
                .iter()
                .zip(words.components.iter())
                .take(length)
                .take_while(|(a, b)| a == b)
                .count();
        }

        Words {
            components: first.components[..length].iter().cloned().collect(),
        }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_placeholder(&self) -> bool {
        self.components.len() == 1 && self.components[0] == PLACEHOLDER
    }

    pub fn starts_with_digit(&self) -> bool {
        self.components
            .first()
            .and_then(|component| component.chars().next())
            .is_some_and(|character| character.is_ascii_digit())
    }

    /// Drops the last component. Used when a prefix must leave at least one
    /// word behind.
    pub fn without_last(&self) -> Words {
        let length = self.len().saturating_sub(1);
        Words {
            components: self.components[..length].iter().cloned().collect(),
        }
    }

    /// The callable spelling: the first component lower-cased, the rest as-is.
    ///
    /// A lone reserved word is escaped with backticks. A leading placeholder
    /// is kept and the component after it is lower-cased instead.
    pub fn camel_case(&self) -> String {
        match self.components.as_slice() {
            [] => String::new(),
            [only] if is_reserved(&only.to_lowercase()) => format!("`{}`", only.to_lowercase()),
            [head, rest @ ..] if head == PLACEHOLDER => match rest {
                [] => PLACEHOLDER.to_string(),
                [second, tail @ ..] => {
                    format!("{PLACEHOLDER}{}{}", second.to_lowercase(), tail.concat())
                }
            },
            [head, rest @ ..] => format!("{}{}", head.to_lowercase(), rest.concat()),
        }
    }
}

impl fmt::Display for Words {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            f.write_str(component)?;
        }
        Ok(())
    }
}

impl Ord for Words {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string()
            .cmp(&other.to_string())
            .then_with(|| self.components.cmp(&other.components))
    }
}

impl PartialOrd for Words {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Words {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(components: &[&str]) -> Words {
        Words::new(components.iter().copied())
    }

    #[test]
    fn test_split_pascal_case_transitions() {
        assert_eq!(Words::split_pascal("HTTPRequest"), words(&["HTTP", "Request"]));
        assert_eq!(Words::split_pascal("Node2D"), words(&["Node", "2D"]));
        assert_eq!(Words::split_pascal("Vector3"), words(&["Vector", "3"]));
        assert_eq!(Words::split_pascal("AABB"), words(&["AABB"]));
        assert_eq!(
            Words::split_pascal("ARVRInterface"),
            words(&["ARVR", "Interface"])
        );
        assert_eq!(
            Words::split_pascal("X509Certificate"),
            words(&["X", "509", "Certificate"])
        );
    }

    #[test]
    fn test_split_pascal_underscores() {
        assert_eq!(Words::split_pascal("_ClassDB"), words(&["_", "Class", "DB"]));
        assert_eq!(
            Words::split_pascal("Visual_Server"),
            words(&["Visual", "Server"])
        );
        assert_eq!(Words::split_pascal("lowerStart"), words(&["Lower", "Start"]));
    }

    #[test]
    fn test_split_snake() {
        assert_eq!(Words::split_snake("get_var"), words(&["Get", "Var"]));
        assert_eq!(Words::split_snake("FLAG_MAX"), words(&["Flag", "Max"]));
        assert_eq!(Words::split_snake("_ready"), words(&["_", "Ready"]));
        assert_eq!(Words::split_snake("a__b"), words(&["A", "B"]));
        assert!(Words::split_snake("").is_empty());
    }

    #[test]
    fn test_get_var_has_no_expansion() {
        let name = Words::split_snake("get_var").normalized();
        assert_eq!(name, words(&["Get", "Var"]));
        assert_eq!(name.camel_case(), "getVar");
    }

    #[test]
    fn test_var_name_tail_expansion() {
        let name = Words::split_snake("GET_VAR_NAME").normalized();
        assert_eq!(name, words(&["Get", "Variable", "Name"]));
        assert_eq!(name.camel_case(), "getVariableName");
    }

    #[test]
    fn test_unconditional_expansion() {
        assert_eq!(
            Words::split_snake("get_aabb").normalized(),
            words(&["Get", "AABB"])
        );
        assert_eq!(
            Words::split_snake("set_pos").normalized(),
            words(&["Set", "Position"])
        );
    }

    #[test]
    fn test_longest_tail_wins() {
        let name = Words::split_snake("VAR_TYPE_MAX").normalized();
        assert_eq!(name, words(&["Variable", "Type", "Count"]));

        let name = Words::split_snake("VAR_TYPE_NIL").normalized();
        assert_eq!(name, words(&["Variable", "Type", "Nil"]));
    }

    #[test]
    fn test_normalization_is_single_pass() {
        const CHAINED: &[Pattern] = &[
            Pattern {
                word: "A",
                tail: &[],
                replacement: &["B"],
            },
            Pattern {
                word: "B",
                tail: &[],
                replacement: &["C"],
            },
        ];
        assert_eq!(words(&["A", "B"]).normalized_with(CHAINED), words(&["B", "C"]));
    }

    #[test]
    fn test_plain_snake_round_trip() {
        for (raw, expected) in [
            ("get_child_count", "getChildCount"),
            ("queue_free", "queueFree"),
            ("is_inside_tree", "isInsideTree"),
        ] {
            assert_eq!(Words::split_snake(raw).normalized().camel_case(), expected);
        }
    }

    #[test]
    fn test_factoring_longest_overlap() {
        let scope = words(&["Set", "Position"]);
        let forbidden = FxHashSet::default();

        assert_eq!(words(&["Position"]).factoring(&scope, &forbidden), Words::placeholder());
        assert_eq!(
            words(&["Position", "Offset"]).factoring(&scope, &forbidden),
            words(&["Offset"])
        );
        assert_eq!(
            words(&["Rotation"]).factoring(&scope, &forbidden),
            words(&["Rotation"])
        );
    }

    #[test]
    fn test_factoring_falls_back_on_digits_and_forbidden() {
        let forbidden = FxHashSet::default();
        assert_eq!(
            words(&["Mode", "3D"]).factoring(&words(&["Mode"]), &forbidden),
            words(&["Mode", "3D"])
        );

        let scope = words(&["Node", "Path"]);
        let target = words(&["Node", "Path", "Name"]);
        let mut forbidden = FxHashSet::default();
        forbidden.insert(words(&["Name"]));
        // "Path" is not a prefix of the target, so nothing shorter qualifies.
        assert_eq!(target.factoring(&scope, &forbidden), target);

        let scope = words(&["Path", "Path"]);
        let target = words(&["Path", "Path", "X"]);
        let mut forbidden = FxHashSet::default();
        forbidden.insert(words(&["X"]));
        assert_eq!(target.factoring(&scope, &forbidden), words(&["Path", "X"]));
    }

    #[test]
    fn test_greatest_common_prefix() {
        let group = [
            words(&["Mode", "Disabled"]),
            words(&["Mode", "Enabled"]),
            words(&["Mode", "Enabled", "Always"]),
        ];
        assert_eq!(Words::greatest_common_prefix(&group), words(&["Mode"]));
        assert_eq!(
            Words::greatest_common_prefix(&[words(&["A"]), words(&["B"])]),
            Words::default()
        );
        assert_eq!(
            Words::greatest_common_prefix(&Vec::<Words>::new()),
            Words::default()
        );
    }

    #[test]
    fn test_camel_case_rendering() {
        assert_eq!(words(&["HTTP", "Request"]).camel_case(), "httpRequest");
        assert_eq!(words(&["_", "Ready"]).camel_case(), "_ready");
        assert_eq!(words(&["_", "Get", "Data"]).camel_case(), "_getData");
        assert_eq!(Words::placeholder().camel_case(), "_");
        assert_eq!(words(&["Default"]).camel_case(), "`default`");
        assert_eq!(words(&["Default", "Value"]).camel_case(), "defaultValue");
        assert_eq!(words(&["_", "Ready"]).to_string(), "_Ready");
    }

    #[test]
    fn test_order_follows_rendered_form() {
        let mut names = vec![words(&["Node", "2D"]), words(&["Node"]), words(&["Camera"])];
        names.sort();
        assert_eq!(
            names.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["Camera", "Node", "Node2D"]
        );
        assert_ne!(
            words(&["Ab", "C"]).cmp(&words(&["A", "Bc"])),
            Ordering::Equal
        );
    }
}
