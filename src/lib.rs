//! Fetch a GitHub user's public profile and repositories, and derive the
//! numbers a profile page shows: star and fork totals, the language mix, and
//! the most starred repositories.

pub mod activity;
pub mod age;
pub mod chart;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod models;
pub mod report;
pub mod session;
pub mod stats;
pub mod summary;
pub mod svg;

pub use config::Config;
pub use error::FetchError;
pub use github::GithubClient;
pub use models::{Profile, Repository};
pub use report::Report;
pub use stats::{AggregateStats, LanguageTally, aggregate, tally_languages, top_by_stars};
