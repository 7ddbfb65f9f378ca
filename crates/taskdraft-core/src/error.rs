use thiserror::Error;

/// A convenience `Result` alias using [`TaskdraftError`].
pub type TaskdraftResult<T> = Result<T, TaskdraftError>;

/// Top-level error type for TaskDraft.
///
/// Each variant corresponds to a subsystem that can produce errors. Every
/// variant except [`TaskdraftError::Fatal`] is recoverable at the REPL: the
/// dispatcher reports it and re-prompts or continues the loop.
#[derive(Debug, Error)]
pub enum TaskdraftError {
    /// Invalid interactive input (bad menu choice, empty required field).
    #[error("Input error: {0}")]
    Input(String),

    /// The referenced file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file extension is not in the supported set.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The file exists but its content could not be extracted.
    #[error("Error reading file: {0}")]
    ReadFailure(String),

    /// A JSON store could not be read or written.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A transcript document had no recognizable structure.
    #[error("Transcript error: {0}")]
    Transcript(String),

    /// The completion service call failed.
    #[error("Service error: {0}")]
    Service(String),

    /// Configuration parsing or validation failed.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An unexpected error caught once at the process boundary.
    #[error("Unexpected error: {0}")]
    Fatal(String),
}
