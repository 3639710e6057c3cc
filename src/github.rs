use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{Profile, Repository};

/// Unauthenticated GitHub REST client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct GithubClient {
    api_url: Arc<Url>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Build a client for the API root in `config`. Every request gets the
    /// configured timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid API URL: {}", config.api_url))?;
        if api_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot be used as a base: {api_url}");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_url: Arc::new(api_url),
            http: Arc::new(http),
        })
    }

    /// Fetch a user's profile, then the repository listing its payload
    /// points at.
    ///
    /// The two requests are strictly sequential. Nothing is returned unless
    /// both succeed. Only the first page of repositories is requested.
    #[instrument(skip_all, fields(username = %username.trim()))]
    pub async fn fetch_profile(
        &self,
        username: &str,
    ) -> Result<(Profile, Vec<Repository>), FetchError> {
        let username = validate_username(username)?;

        let user_url = self.user_url(username);
        let (status, body) = self.get(user_url).await?;
        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(FetchError::NotFound),
            s => return Err(FetchError::UserFetch { status: s.as_u16() }),
        }
        let profile: Profile = decode(&body, "user profile")?;
        debug!(login = %profile.login, repos_url = %profile.repos_url, "profile fetched");

        let repos_url =
            Url::parse(&profile.repos_url).map_err(|e| FetchError::InvalidRepositoryUrl {
                url: profile.repos_url.clone(),
                reason: e.to_string(),
            })?;
        let (status, body) = self.get(repos_url).await?;
        if !status.is_success() {
            return Err(FetchError::RepoFetch {
                status: status.as_u16(),
            });
        }
        let repos: Vec<Repository> = decode(&body, "repository list")?;

        if (repos.len() as u64) < profile.public_repos {
            debug!(
                listed = repos.len(),
                public_repos = profile.public_repos,
                "repository list is a single page; remaining repositories not requested"
            );
        }
        info!(login = %profile.login, repos = repos.len(), "profile loaded");

        Ok((profile, repos))
    }

    fn user_url(&self, username: &str) -> Url {
        let mut url = (*self.api_url).clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["users", username]);
        }
        url
    }

    /// One GET; transport failures become `Network`/`Timeout`, any HTTP
    /// status is handed back to the caller to classify.
    async fn get(&self, url: Url) -> Result<(StatusCode, Vec<u8>), FetchError> {
        debug!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::transport)?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(FetchError::transport)?;
        Ok((status, body.to_vec()))
    }
}

/// Trimmed username, or `Validation` when nothing is left.
pub fn validate_username(input: &str) -> Result<&str, FetchError> {
    let username = input.trim();
    if username.is_empty() {
        Err(FetchError::Validation)
    } else {
        Ok(username)
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &'static str) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|source| FetchError::Decode { what, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_url: &str) -> GithubClient {
        let config = Config {
            api_url: api_url.to_string(),
            ..Config::default()
        };
        GithubClient::new(&config).unwrap()
    }

    #[test]
    fn user_url_appends_segments() {
        let c = client("https://api.github.com");
        assert_eq!(
            c.user_url("octocat").as_str(),
            "https://api.github.com/users/octocat"
        );
        let c = client("http://localhost:8080/api/v3/");
        assert_eq!(
            c.user_url("octocat").as_str(),
            "http://localhost:8080/api/v3/users/octocat"
        );
    }

    #[test]
    fn user_url_escapes_path_characters() {
        let c = client("https://api.github.com");
        assert_eq!(
            c.user_url("a/b").as_str(),
            "https://api.github.com/users/a%2Fb"
        );
    }

    #[test]
    fn username_is_trimmed_and_required() {
        assert_eq!(validate_username("  octocat\n").unwrap(), "octocat");
        assert!(matches!(validate_username(""), Err(FetchError::Validation)));
        assert!(matches!(validate_username(" \t "), Err(FetchError::Validation)));
    }

    #[test]
    fn rejects_non_base_api_url() {
        let config = Config {
            api_url: "mailto:someone@example.com".to_string(),
            ..Config::default()
        };
        assert!(GithubClient::new(&config).is_err());
    }
}
