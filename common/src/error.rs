//! Error types for wildsift

use thiserror::Error;

/// Result type alias using the wildsift [`enum@Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("domains file not found: {path}")]
    RootsFileNotFound { path: String },

    #[error("no domains found in {path}")]
    NoRootDomains { path: String },

    #[error("invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    // === Run Errors ===
    #[error("run directory not found: {path}")]
    RunDirectoryNotFound { path: String },

    #[error("classification worker failed: {0}")]
    Worker(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Configuration problems abort the run before any input is read.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::RootsFileNotFound { .. }
                | Error::NoRootDomains { .. }
                | Error::InvalidConfig { .. }
                | Error::Configuration(_)
                | Error::RunDirectoryNotFound { .. }
        )
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
