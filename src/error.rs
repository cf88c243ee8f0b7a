use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(
        "`username` not specified. Please specify username by --username option or the PIXELA_USER_NAME environment variable"
    )]
    MissingUsername,

    #[error(
        "Token is not set. Please specify your token by --user-token option or the PIXELA_USER_TOKEN environment variable"
    )]
    MissingToken,

    #[error("{0}")]
    Validation(String),

    #[error("Failed to marshal options to json: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to request api: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to get response body: {0}")]
    ResponseRead(#[source] reqwest::Error),

    /// The service answered with a status above 299. The body bytes are kept
    /// untouched; `Display` is a lossy rendering of them.
    #[error("{}", String::from_utf8_lossy(.body))]
    Remote { status: u16, body: Vec<u8> },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
