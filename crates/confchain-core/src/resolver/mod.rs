//! The resolution algorithm.
//!
//! For a descriptor and a source chain: keys are tried in declared order,
//! sources in priority order. The first present, non-empty raw value is
//! parsed immediately; a parse failure propagates without consulting any
//! further key, source, link or fallback. When a descriptor's own keys
//! yield nothing its link is walked (against the same chain) before any
//! fallback is considered. Link walking is iterative with a visited set,
//! so a cyclic link graph is a [`ResolveError::LinkCycle`] instead of
//! unbounded recursion.

use tracing::{debug, error};

use crate::descriptor::Descriptor;
use crate::errors::ResolveError;
use crate::sources::SourceChain;

/// Resolve `descriptor` against `chain`, returning `Ok(None)` when no
/// source, link or fallback produced a value.
pub fn resolve<T>(
    descriptor: &Descriptor<T>,
    chain: &SourceChain,
) -> Result<Option<T>, ResolveError> {
    let mut visited: Vec<*const Descriptor<T>> = Vec::new();
    let mut walked: Vec<&Descriptor<T>> = Vec::new();
    let mut current = descriptor;

    loop {
        let identity = current as *const Descriptor<T>;
        if visited.contains(&identity) {
            error!(
                event = "core.resolve.link_cycle",
                descriptor = descriptor.display_name(),
                revisited = current.display_name()
            );
            return Err(ResolveError::LinkCycle {
                what: descriptor.describe(),
            });
        }
        visited.push(identity);
        walked.push(current);

        if let Some(value) = scan_sources(current, chain)? {
            return Ok(Some(value));
        }

        match current.link() {
            Some(link) => current = link.as_ref(),
            None => break,
        }
    }

    // No key/source pair hit anywhere on the link chain. The recursive
    // definition resolves the link fully before the current descriptor's
    // own fallback, so the deepest fallback on the chain wins.
    for node in walked.iter().rev() {
        if node.has_fallback() {
            debug!(
                event = "core.resolve.fallback",
                descriptor = descriptor.display_name(),
                from = node.display_name()
            );
            return Ok(node.fallback_value());
        }
    }

    Ok(None)
}

/// Resolve, but map absence to [`ResolveError::MissingConfig`] carrying the
/// execution context's identity.
pub fn require<T>(
    descriptor: &Descriptor<T>,
    chain: &SourceChain,
    context: &str,
) -> Result<T, ResolveError> {
    match resolve(descriptor, chain)? {
        Some(value) => Ok(value),
        None => Err(ResolveError::MissingConfig {
            what: descriptor.describe(),
            context: context.to_string(),
        }),
    }
}

/// Scan one descriptor's own keys across the chain. An empty raw string is
/// treated as not present, so an exported-but-empty environment variable
/// does not shadow a meaningful default.
fn scan_sources<T>(
    descriptor: &Descriptor<T>,
    chain: &SourceChain,
) -> Result<Option<T>, ResolveError> {
    for key in descriptor.keys() {
        for source in chain.sources() {
            let Some(raw) = source.lookup(key) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            match descriptor.parse(&raw) {
                Ok(Some(value)) => {
                    debug!(
                        event = "core.resolve.hit",
                        descriptor = descriptor.display_name(),
                        key = key.as_str(),
                        source = source.name()
                    );
                    return Ok(Some(value));
                }
                // Parser declined the value (e.g. whitespace-only input);
                // same as the source not having it.
                Ok(None) => continue,
                Err(parse_error) => {
                    error!(
                        event = "core.resolve.invalid_format",
                        descriptor = descriptor.display_name(),
                        key = key.as_str(),
                        source = source.name(),
                        error = %parse_error
                    );
                    return Err(ResolveError::InvalidFormat {
                        what: descriptor.describe(),
                        source: parse_error,
                    });
                }
            }
        }
    }
    Ok(None)
}
