//! Prefix-based command routing
//!
//! Commands are free text with arguments after the command word, so lines
//! are routed by literal prefix rather than by an exact verb lookup. When
//! several prefixes match, the one registered first wins.

/// Maps command-name prefixes to handlers
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<(String, H)>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `prefix`
    ///
    /// Registering a prefix again replaces its handler; the prefix keeps the
    /// position of its first registration for tie-breaking.
    pub fn register(&mut self, prefix: impl Into<String>, handler: H) {
        let prefix = prefix.into();
        match self.routes.iter_mut().find(|(p, _)| *p == prefix) {
            Some(route) => route.1 = handler,
            None => self.routes.push((prefix, handler)),
        }
    }

    /// Handler of the earliest-registered prefix that `line` starts with
    pub fn route(&self, line: &str) -> Option<&H> {
        self.routes
            .iter()
            .find(|(prefix, _)| !prefix.is_empty() && line.starts_with(prefix.as_str()))
            .map(|(_, handler)| handler)
    }

    /// Registered prefixes in registration order
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_by_prefix() {
        let mut router = Router::new();
        router.register("list", 1);
        router.register("partition", 2);

        assert_eq!(router.route("list"), Some(&1));
        assert_eq!(router.route("list orders.*"), Some(&1));
        assert_eq!(router.route("partition orders payments"), Some(&2));
        assert_eq!(router.route("describe orders"), None);
    }

    #[test]
    fn test_prefix_matches_concatenated_arguments() {
        let mut router = Router::new();
        router.register("list", "list");
        assert_eq!(router.route("listorders"), Some(&"list"));
    }

    #[test]
    fn test_first_registered_prefix_wins() {
        let mut router = Router::new();
        router.register("help", "help");
        router.register("h", "short");
        assert_eq!(router.route("help list"), Some(&"help"));
        assert_eq!(router.route("hello"), Some(&"short"));

        let mut router = Router::new();
        router.register("h", "short");
        router.register("help", "help");
        assert_eq!(router.route("help list"), Some(&"short"));
    }

    #[test]
    fn test_reregistering_replaces_handler_in_place() {
        let mut router = Router::new();
        router.register("part", "old");
        router.register("partition", "long");
        router.register("part", "new");

        assert_eq!(router.len(), 2);
        assert_eq!(router.route("partition x"), Some(&"new"));
        assert_eq!(router.prefixes().collect::<Vec<_>>(), vec!["part", "partition"]);
    }

    #[test]
    fn test_empty_prefix_never_matches() {
        let mut router = Router::new();
        router.register("", 0);
        assert!(router.route("anything").is_none());
    }
}
