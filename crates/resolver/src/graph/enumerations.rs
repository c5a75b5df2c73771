use crate::quirks::{FLAG_WORD, FLAGS_ENUMERATION, flag_case_name};
use crate::schema::EnumerationDescriptor;
use crate::words::Words;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumerationCase {
    pub symbol: String,
    pub name: Words,
    pub value: i64,
}

/// An enumeration nested in a class. Built once with the node and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enumeration {
    pub symbol: String,
    pub name: Words,
    /// Sorted by (name, value). Several cases may share a value.
    pub cases: Vec<EnumerationCase>,
}

impl Enumeration {
    pub fn new(descriptor: &EnumerationDescriptor) -> Self {
        let name = Words::split_pascal(&descriptor.name).normalized();
        let names = Self::case_names(&name, descriptor);

        let mut cases: Vec<EnumerationCase> = descriptor
            .cases
            .iter()
            .zip(names)
            .map(|(case, name)| EnumerationCase {
                symbol: case.symbol.clone(),
                name,
                value: case.value,
            })
            .collect();
        cases.sort_by(|a, b| a.name.cmp(&b.name).then(a.value.cmp(&b.value)));

        Self {
            symbol: descriptor.name.clone(),
            name,
            cases,
        }
    }

    fn case_names(name: &Words, descriptor: &EnumerationDescriptor) -> Vec<Words> {
        let forbidden = FxHashSet::default();
        let words: Vec<Words> = descriptor
            .cases
            .iter()
            .map(|case| Words::split_snake(&case.symbol).normalized())
            .collect();

        if *name == Words::new([FLAGS_ENUMERATION]) {
            let scope = Words::new([FLAG_WORD]);
            return descriptor
                .cases
                .iter()
                .zip(&words)
                .map(|(case, words)| match flag_case_name(&case.symbol) {
                    Some(fixed) => Words::new(fixed.iter().copied()),
                    None => words.factoring(&scope, &forbidden),
                })
                .collect();
        }

        let mut prefix = Words::greatest_common_prefix(&words);
        // A lone case would otherwise lose its whole name.
        if words.len() == 1 {
            prefix = prefix.without_last();
        }

        words
            .iter()
            .map(|words| words.factoring(&prefix, &forbidden))
            .collect()
    }

    pub fn case(&self, symbol: &str) -> Option<&EnumerationCase> {
        self.cases.iter().find(|case| case.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ConstantDescriptor;

    fn enumeration(name: &str, cases: &[(&str, i64)]) -> Enumeration {
        Enumeration::new(&EnumerationDescriptor {
            name: name.to_string(),
            cases: cases
                .iter()
                .map(|(symbol, value)| ConstantDescriptor::new(*symbol, *value))
                .collect(),
        })
    }

    fn names(enumeration: &Enumeration) -> Vec<String> {
        enumeration
            .cases
            .iter()
            .map(|case| case.name.to_string())
            .collect()
    }

    #[test]
    fn test_flags_enumeration_factors_flag() {
        let flags = enumeration(
            "Flags",
            &[("FLAG_DEFAULT", 0), ("FLAG_A", 1), ("FLAG_B", 2)],
        );
        assert_eq!(names(&flags), vec!["A", "B", "Default"]);
    }

    #[test]
    fn test_flags_default_case_has_fixed_name() {
        let flags = enumeration("Flags", &[("FLAGS_DEFAULT", 0), ("FLAG_USE_ALPHA", 1)]);
        assert_eq!(names(&flags), vec!["Default", "UseAlpha"]);
    }

    #[test]
    fn test_common_prefix_is_factored() {
        let pause_mode = enumeration(
            "PauseMode",
            &[
                ("PAUSE_MODE_INHERIT", 0),
                ("PAUSE_MODE_STOP", 1),
                ("PAUSE_MODE_PROCESS", 2),
            ],
        );
        assert_eq!(pause_mode.name, Words::new(["Pause", "Mode"]));
        assert_eq!(names(&pause_mode), vec!["Inherit", "Process", "Stop"]);
    }

    #[test]
    fn test_digit_leading_case_keeps_prefix() {
        let mode = enumeration("Mode", &[("MODE_2D", 0), ("MODE_3D", 1)]);
        assert_eq!(names(&mode), vec!["Mode2D", "Mode3D"]);
    }

    #[test]
    fn test_single_case_keeps_last_word() {
        let single = enumeration("Only", &[("ONLY_CASE", 0)]);
        assert_eq!(names(&single), vec!["Case"]);
    }

    #[test]
    fn test_cases_sorted_by_name_then_value() {
        let axis = enumeration(
            "Axis",
            &[("AXIS_Z", 2), ("AXIS_X", 0), ("AXIS_Y", 1), ("AXIS_LAST", 2)],
        );
        assert_eq!(names(&axis), vec!["Last", "X", "Y", "Z"]);

        let shared: Vec<i64> = axis
            .cases
            .iter()
            .filter(|case| case.value == 2)
            .map(|case| case.value)
            .collect();
        assert_eq!(shared.len(), 2);
        assert_eq!(axis.case("AXIS_LAST").map(|case| case.value), Some(2));
    }
}
