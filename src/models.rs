use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A GitHub account as returned by `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub html_url: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_gists: u64,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub repos_url: String,
}

impl Profile {
    /// Name to show in headers; falls back to the login.
    pub fn display_name(&self) -> &str {
        non_empty(&self.name).unwrap_or(&self.login)
    }

    pub fn bio_or_default(&self) -> &str {
        non_empty(&self.bio).unwrap_or("No bio available")
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    /// The `blog` field as a clickable URL. GitHub stores whatever the user
    /// typed, so bare hosts get an https scheme.
    pub fn website_url(&self) -> Option<String> {
        non_empty(&self.blog).map(|blog| {
            if blog.starts_with("http") {
                blog.to_string()
            } else {
                format!("https://{blog}")
            }
        })
    }

    pub fn twitter_url(&self) -> Option<String> {
        non_empty(&self.twitter_username).map(|handle| format!("https://twitter.com/{handle}"))
    }
}

/// One entry of the repository listing behind `repos_url`.
///
/// Counts are unsigned: a payload carrying a negative count is rejected at
/// decode time instead of being clamped later.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repository {
    pub fn description_or_default(&self) -> &str {
        non_empty(&self.description).unwrap_or("No description available")
    }

    pub fn language(&self) -> Option<&str> {
        non_empty(&self.language)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
