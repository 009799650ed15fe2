use thiserror::Error;

/// Failure to obtain the markup to parse. Malformed markup itself is never
/// an error.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Reading the input failed.
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
