//! Source trait definition and the ordered source chain.

use std::sync::Arc;

/// Trait defining the interface for raw value providers.
///
/// A source is a pure function of a key to an optional raw string. Sources
/// must not mutate anything and must be safe to call repeatedly and
/// concurrently; every resolution re-queries every source it reaches.
pub trait Source: Send + Sync {
    /// Short name for this source, used in log events (e.g. "env", "local").
    fn name(&self) -> &'static str;

    /// Look up the raw value for `key`, if this source has one.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// An ordered list of sources, ranked highest-priority first.
#[derive(Clone, Default)]
pub struct SourceChain {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source at the lowest priority position.
    pub fn with_source(mut self, source: impl Source + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Sources in priority order, highest first.
    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(&'static str);

    impl Source for FixedSource {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn lookup(&self, key: &str) -> Option<String> {
            (key == "KEY").then(|| self.0.to_string())
        }
    }

    #[test]
    fn test_chain_preserves_priority_order() {
        let chain = SourceChain::new()
            .with_source(FixedSource("first"))
            .with_source(FixedSource("second"));

        let values: Vec<_> = chain
            .sources()
            .iter()
            .filter_map(|source| source.lookup("KEY"))
            .collect();
        assert_eq!(values, ["first", "second"]);
    }

    #[test]
    fn test_empty_chain_is_legal() {
        let chain = SourceChain::new();
        assert!(chain.sources().is_empty());
    }
}
