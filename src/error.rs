use thiserror::Error;

/// Everything that can go wrong between a submitted username and a decoded
/// profile plus repository list.
///
/// `Display` is the single line shown to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Please enter a GitHub username")]
    Validation,

    #[error("User not found")]
    NotFound,

    #[error("Failed to fetch user data")]
    UserFetch { status: u16 },

    #[error("Failed to fetch repositories")]
    RepoFetch { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected response from GitHub")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The profile payload decoded, but its `repos_url` is not a URL.
    #[error("Unexpected response from GitHub")]
    InvalidRepositoryUrl { url: String, reason: String },
}

impl FetchError {
    /// Maps a transport-level reqwest failure (no usable response). The
    /// message carries the whole cause chain, e.g. "error sending request:
    /// ...: Connection refused".
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(format!("{:#}", anyhow::Error::from(err.without_url())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(FetchError::Validation.to_string(), "Please enter a GitHub username");
        assert_eq!(FetchError::NotFound.to_string(), "User not found");
        assert_eq!(
            FetchError::UserFetch { status: 500 }.to_string(),
            "Failed to fetch user data"
        );
        assert_eq!(
            FetchError::RepoFetch { status: 403 }.to_string(),
            "Failed to fetch repositories"
        );
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::InvalidRepositoryUrl {
                url: "not a url".into(),
                reason: "relative URL without a base".into(),
            }
            .to_string(),
            "Unexpected response from GitHub"
        );
    }
}
