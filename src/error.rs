use thiserror::Error;

/// Errors that can occur while renaming or moving panel files
#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Rename submission failed: {source}")]
    SubmissionFailed {
        #[source]
        source: Box<PanelError>,
    },

    #[error("A rename submission is already in flight")]
    SubmissionInProgress,

    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Panel API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PanelError {
    /// Wrap an error from the rename operation as a failed submission
    pub fn submission_failed(source: PanelError) -> Self {
        PanelError::SubmissionFailed {
            source: Box::new(source),
        }
    }
}

/// Result type alias for panel file operations
pub type Result<T> = std::result::Result<T, PanelError>;
