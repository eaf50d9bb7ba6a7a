//! CLI errors

use thiserror::Error;

/// Failures surfaced by the `krisper` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compilation failed: {0}")]
    Validation(#[from] krisper::ValidationError),

    #[error("plan has {0} dangling reference(s)")]
    DanglingRefs(usize),
}

pub type Result<T> = std::result::Result<T, CliError>;
