//! confchain-core: Typed multi-source configuration resolution for build tooling.
//!
//! This library looks up settings (versions, credentials, feature flags,
//! secret material) from several ranked sources, with per-value parsing,
//! fallback chaining and typed errors. It is used by the CLI and by any
//! host tooling that needs resolved configuration values.
//!
//! # Main Entry Points
//!
//! - [`descriptor`] - Declare a named, typed configuration value
//! - [`sources`] - Ranked key/value providers and the source chain
//! - [`environment`] - Bind a chain and resolve/require values
//! - [`catalog`] - The standard descriptor set
//! - [`secret`] - Base64 codec and secret key normalization

pub mod catalog;
pub mod descriptor;
pub mod environment;
pub mod errors;
pub mod logging;
pub mod parse;
pub mod resolver;
pub mod secret;
pub mod sources;

// Re-export commonly used types at crate root for convenience
pub use descriptor::{Descriptor, DescriptorBuilder};
pub use environment::Environment;
pub use errors::{CodecError, ConfchainError, ParseError, ResolveError};
pub use sources::{EnvSource, GlobalPropsSource, MapSource, Source, SourceChain};

// Re-export logging initialization
pub use logging::init_logging;
