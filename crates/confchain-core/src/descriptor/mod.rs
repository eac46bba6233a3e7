//! Descriptor metadata for one named, typed configuration value.
//!
//! A descriptor declares the ordered lookup keys for a value, the parser
//! that turns raw source text into the typed value, an optional lazily
//! evaluated fallback, and an optional link to another same-typed
//! descriptor that is consulted when this one's own keys yield nothing.
//!
//! Descriptors are built once (see [`crate::catalog`]) and never mutated
//! afterward. Links are shared `Arc` references; the link graph is walked
//! at resolution time and must be acyclic (the resolver detects cycles).

use std::sync::{Arc, OnceLock};

use crate::parse::ParseOutcome;

type BoxedParser<T> = Box<dyn Fn(&str) -> ParseOutcome<T> + Send + Sync>;
type BoxedFallback<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Immutable metadata + behavior describing one configuration value.
pub struct Descriptor<T> {
    name: Option<String>,
    description: Option<String>,
    keys: Vec<String>,
    parser: BoxedParser<T>,
    fallback: Option<BoxedFallback<T>>,
    link: OnceLock<Arc<Descriptor<T>>>,
}

impl<T> Descriptor<T> {
    /// Start building a descriptor around its parser.
    ///
    /// The parser is supplied exactly once and is not mutable afterward.
    pub fn builder(
        parser: impl Fn(&str) -> ParseOutcome<T> + Send + Sync + 'static,
    ) -> DescriptorBuilder<T> {
        DescriptorBuilder {
            name: None,
            description: None,
            keys: Vec::new(),
            parser: Box::new(parser),
            fallback: None,
            link: None,
        }
    }

    /// Display name: the explicit name, or the first declared key.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or_else(|| self.keys.first().map(String::as_str))
            .unwrap_or("<unnamed>")
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Lookup keys in declared order; first match wins.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// `"<name>"` or `"<name> : <description>"`, for error messages.
    pub fn describe(&self) -> String {
        match self.description() {
            Some(description) => format!("{} : {}", self.display_name(), description),
            None => self.display_name().to_string(),
        }
    }

    pub fn parse(&self, raw: &str) -> ParseOutcome<T> {
        (self.parser)(raw)
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Evaluate the fallback, if any. Each call re-evaluates; the resolver
    /// invokes it at most once per resolution.
    pub fn fallback_value(&self) -> Option<T> {
        self.fallback.as_ref().map(|fallback| fallback())
    }

    pub fn link(&self) -> Option<&Arc<Descriptor<T>>> {
        self.link.get()
    }

    /// Late-bind the link, for mutually-referential descriptors that cannot
    /// both carry their link at build time. Set-once: returns false and
    /// leaves the existing link untouched if one is already bound.
    pub fn bind_link(&self, link: &Arc<Descriptor<T>>) -> bool {
        self.link.set(Arc::clone(link)).is_ok()
    }
}

/// Fluent builder for [`Descriptor`].
///
/// No validation happens at build time: a descriptor without keys is legal
/// and simply never matches a source.
pub struct DescriptorBuilder<T> {
    name: Option<String>,
    description: Option<String>,
    keys: Vec<String>,
    parser: BoxedParser<T>,
    fallback: Option<BoxedFallback<T>>,
    link: Option<Arc<Descriptor<T>>>,
}

impl<T> DescriptorBuilder<T> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append lookup keys in call order. If no name has been set yet, the
    /// first key supplied becomes the name.
    pub fn keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        for key in keys {
            let key = key.into();
            if self.name.is_none() {
                self.name = Some(key.clone());
            }
            self.keys.push(key);
        }
        self
    }

    /// Lazily evaluated static default, used only when no source and no
    /// link produced a value.
    pub fn fallback(mut self, fallback: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Same-typed descriptor consulted when this one's keys yield nothing.
    pub fn link(mut self, link: &Arc<Descriptor<T>>) -> Self {
        self.link = Some(Arc::clone(link));
        self
    }

    pub fn build(self) -> Descriptor<T> {
        let link = OnceLock::new();
        if let Some(target) = self.link {
            let _ = link.set(target);
        }
        Descriptor {
            name: self.name,
            description: self.description,
            keys: self.keys,
            parser: self.parser,
            fallback: self.fallback,
            link,
        }
    }
}
