use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong at the panel boundary.
///
/// None of these ever reach the caller of a panel command; each is turned
/// into exactly one notice and an empty (or unchanged) list.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Please configure the build.xml file path first.")]
    NotConfigured,

    #[error("Build file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read build.xml: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open file: {0}")]
    NavigationFailure(String),

    #[error("Failed to launch target '{target}': {reason}")]
    Launch { target: String, reason: String },

    #[error("Invalid settings in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },
}

impl PanelError {
    /// `NotConfigured` is informational; everything else is an error.
    pub fn is_informational(&self) -> bool {
        matches!(self, PanelError::NotConfigured)
    }
}
