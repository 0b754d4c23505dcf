/// Separators between a namespace and a nested name: C++/C# style and Java/C# dotted style.
pub const SEPARATORS: [&str; 2] = ["::", "."];

/// Restricts the graph to one target namespace and shortens names inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceScope {
    target: Option<String>,
}

impl NamespaceScope {
    #[must_use]
    pub fn new(target: Option<String>) -> Self {
        Self { target: target.filter(|t| !t.is_empty()) }
    }

    /// Scope that includes every name.
    #[must_use]
    pub fn everything() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// True when no target is configured or `name` lives inside the target namespace.
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        match &self.target {
            None => true,
            Some(_) => self.strip(name).is_some(),
        }
    }

    /// `name` without the `target + separator` prefix; other names come back unchanged.
    #[must_use]
    pub fn short_name<'a>(&self, name: &'a str) -> &'a str {
        self.strip(name).unwrap_or(name)
    }

    fn strip<'a>(&self, name: &'a str) -> Option<&'a str> {
        let rest = name.strip_prefix(self.target.as_deref()?)?;
        SEPARATORS.iter().find_map(|sep| rest.strip_prefix(*sep))
    }
}
