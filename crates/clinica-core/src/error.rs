/// Core error type for the clinica tool bridge.
///
/// The `Display` text of every variant except [`Error::MalformedLine`] is
/// what ends up in the `error` field of a response line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown request type: {0}")]
    UnknownRequestType(String),

    #[error("Tool '{0}' not found")]
    ToolNotFound(String),

    #[error("Missing required parameter: {0}")]
    MissingRequiredParameter(String),

    #[error("{0}")]
    Remote(String),

    /// A request line that could not be decoded. Never answered.
    #[error("malformed request line: {0}")]
    MalformedLine(String),
}
