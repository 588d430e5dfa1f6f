use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// A block was requested through the creation path for an expression that
    /// already owns one.
    #[error("there is already an output block for source lines {line_start}..={line_end}")]
    InvariantViolation { line_start: usize, line_end: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid preview configuration: {0}")]
    Json(#[from] serde_json::Error),
}
