//! Configuration module for lvsprite
//!
//! Provides types and parsing for `lvsprite.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{default_config, load_config, ConfigError, CONFIG_FILE};
pub use schema::*;
