use crate::quirks::DENIED_CLASSES;

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Class every other class descends from.
    pub root_class: String,
    /// Base of the reference-counted classes. Its built-in methods are hidden.
    pub reference_class: String,
    /// Pseudo-class whose constants form the global constant table.
    pub global_constants_class: String,
    /// Classes dropped before the tree is built, in addition to the built-in
    /// deny-list.
    pub denied_classes: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfigBuilder::default().build()
    }
}

impl ResolverConfig {
    pub fn is_denied(&self, class: &str) -> bool {
        DENIED_CLASSES.contains(&class) || self.denied_classes.iter().any(|denied| denied == class)
    }
}

#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    root_class: Option<String>,
    reference_class: Option<String>,
    global_constants_class: Option<String>,
    denied_classes: Vec<String>,
}

impl ResolverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_class(mut self, root_class: impl Into<String>) -> Self {
        self.root_class = Some(root_class.into());
        self
    }

    pub fn reference_class(mut self, reference_class: impl Into<String>) -> Self {
        self.reference_class = Some(reference_class.into());
        self
    }

    pub fn global_constants_class(mut self, class: impl Into<String>) -> Self {
        self.global_constants_class = Some(class.into());
        self
    }

    pub fn deny<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.denied_classes
            .extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> ResolverConfig {
        ResolverConfig {
            root_class: self.root_class.unwrap_or_else(|| "Object".to_string()),
            reference_class: self
                .reference_class
                .unwrap_or_else(|| "Reference".to_string()),
            global_constants_class: self
                .global_constants_class
                .unwrap_or_else(|| "GlobalConstants".to_string()),
            denied_classes: self.denied_classes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.root_class, "Object");
        assert_eq!(config.reference_class, "Reference");
        assert_eq!(config.global_constants_class, "GlobalConstants");
        assert!(config.is_denied("GDScriptNativeClass"));
        assert!(!config.is_denied("Node"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ResolverConfigBuilder::new()
            .root_class("Base")
            .reference_class("Counted")
            .deny(["Legacy"])
            .build();

        assert_eq!(config.root_class, "Base");
        assert_eq!(config.reference_class, "Counted");
        assert!(config.is_denied("Legacy"));
        assert!(config.is_denied("GDScriptFunctionState"));
    }
}
