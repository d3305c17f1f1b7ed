use std::fmt;

/// Typed error for GitHub contents-API operations.
///
/// `NotFound` is split out because the create-or-update logic branches on
/// it: only a missing file drives the create path. Auth and network
/// failures must never be silently converted into an update attempt.
#[derive(Debug)]
pub enum GithubError {
    /// Credentials rejected (401/403)
    Auth(String),
    /// Network-level failure (DNS, connection, timeout)
    Network(String),
    /// Path does not exist on the configured branch (404)
    NotFound(String),
    /// API returned any other non-success HTTP status
    Api { status: u16, body: String },
    /// Failed to parse or decode a response
    Parse(String),
}

impl fmt::Display for GithubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GithubError::Auth(msg) => write!(f, "Auth error: {}", msg),
            GithubError::Network(msg) => write!(f, "Network error: {}", msg),
            GithubError::NotFound(path) => write!(f, "Not found: {}", path),
            GithubError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            GithubError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for GithubError {}

impl From<reqwest::Error> for GithubError {
    fn from(e: reqwest::Error) -> Self {
        GithubError::Network(e.to_string())
    }
}
