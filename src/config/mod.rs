// src/config/mod.rs

//! Command file loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a command file from disk and turn it into a `Command` (`loader.rs`).
//! - Validate executable and environment overrides (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, sink_for};
pub use model::{CommandFile, CommandSection, OutputSection, RawCommandFile};
pub use validate::validate_env;
