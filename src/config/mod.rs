//! Configuration management for coursesmith.
//!
//! Settings are layered: built-in defaults, then the JSON file at
//! `~/.coursesmith/config`, then environment overrides. Validation is left to
//! the commands that actually talk to a model.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
pub use types::{Config, LlmProvider, LlmSettings, ModelSettings, OutputSettings};
