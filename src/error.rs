use thiserror::Error as ThisError;

/// Error type for the concierge, the form relay and the assistant client
///
/// Only the outbound HTTP calls and configuration loading can fail. The
/// conversation engine itself never returns an error: submission failures are
/// turned into a softer acknowledgement before they reach the transcript.
///
/// # Example
///
/// ```rust
/// use vastucraft::Error;
///
/// fn describe(error: &Error) -> String {
///     match error {
///         Error::Request(e) => format!("Network error: {}", e),
///         Error::Response(msg, Some(code)) => format!("Relay said {} ({})", msg, code),
///         Error::Response(msg, None) => format!("Relay said {}", msg),
///         Error::Parse(e) => format!("Bad JSON: {}", e),
///         Error::Header(msg) | Error::Config(msg) | Error::Other(msg) => msg.clone(),
///     }
/// }
///
/// let err = Error::Response("Invalid access key".to_string(), Some(400));
/// assert_eq!(describe(&err), "Relay said Invalid access key (400)");
/// ```
#[derive(Debug, ThisError)]
pub enum Error {
    /// HTTP transport error
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    /// Remote service rejected the call, with message and optional status code
    #[error("API error{}: {}", status_suffix(.1), .0)]
    Response(String, Option<u16>),
    /// JSON parsing error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Header configuration error
    #[error("Header error: {0}")]
    Header(String),
    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),
    /// Other errors
    #[error("{0}")]
    Other(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
