/// Errors from the Pantone lookup service and configuration loading.
///
/// Color math never fails; invalid user input is recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP request could not be sent or its body could not be read.
    #[cfg(feature = "pantone")]
    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("lookup endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A JSON document could not be decoded.
    #[error("failed to load json: {0}")]
    Json(#[from] serde_json::Error),

    /// The model answered, but not in the shape we asked for.
    #[error("malformed lookup response: {0}")]
    MalformedResponse(String),

    /// Lookup is enabled but no API key is configured.
    #[error("no API key configured for the lookup service")]
    MissingApiKey,

    /// A configuration value is out of its valid range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedResponse(reason.into())
    }

    pub fn status(status: u16, body: &str) -> Self {
        Error::Status {
            status,
            body: body.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
