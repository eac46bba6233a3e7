//! Ranked key/value providers and the source chain.
//!
//! Every read of process-wide state (environment variables, global
//! properties) goes through the [`Source`] trait so that tests can inject
//! deterministic maps instead of touching real process state.

pub mod providers;
pub mod types;

pub use providers::{EnvSource, GlobalPropsSource, MapSource, set_global_property};
pub use types::{Source, SourceChain};
