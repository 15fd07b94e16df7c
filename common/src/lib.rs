//! # Wildsift Common
//!
//! Models and configuration shared by the engine and the command line front end.
//!
//! * **[`asset`]**: root domains, HTTP signatures, match flags and decisions.
//! * **[`config`]**: the immutable run configuration.
//! * **[`error`]**: the error taxonomy used across the workspace.

pub mod asset;
pub mod config;
pub mod error;

pub use error::{Error, Result};
