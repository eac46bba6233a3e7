//! Composition root binding a source chain to the resolver.
//!
//! An environment carries the identity of its execution context (shown in
//! `MissingConfig` messages so operators can tell which sub-project is
//! missing which value) and the ordered source chain for that context.
//! Environments are cheap, stateless beyond the binding, and many may
//! coexist.

use std::collections::HashMap;

use crate::descriptor::Descriptor;
use crate::errors::ResolveError;
use crate::resolver;
use crate::sources::{EnvSource, GlobalPropsSource, MapSource, SourceChain};

pub struct Environment {
    context: String,
    chain: SourceChain,
}

impl Environment {
    pub fn new(context: impl Into<String>, chain: SourceChain) -> Self {
        Self {
            context: context.into(),
            chain,
        }
    }

    /// The default production chain, highest priority first: process
    /// environment variables, context-local properties, process-wide
    /// global properties, then the OS environment again as a last-resort
    /// global view.
    pub fn production(context: impl Into<String>, local: HashMap<String, String>) -> Self {
        let chain = SourceChain::new()
            .with_source(EnvSource)
            .with_source(MapSource::new(local))
            .with_source(GlobalPropsSource)
            .with_source(EnvSource);
        Self::new(context, chain)
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn chain(&self) -> &SourceChain {
        &self.chain
    }

    /// Resolve a descriptor, returning `Ok(None)` when it has no value.
    pub fn resolve<T>(&self, descriptor: &Descriptor<T>) -> Result<Option<T>, ResolveError> {
        resolver::resolve(descriptor, &self.chain)
    }

    /// Resolve a descriptor that must have a value.
    pub fn require<T>(&self, descriptor: &Descriptor<T>) -> Result<T, ResolveError> {
        resolver::require(descriptor, &self.chain, &self.context)
    }
}
