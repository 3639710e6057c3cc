//! Derived numbers over a repository listing.
//!
//! Everything here is pure and total: the counts are unsigned, so there is
//! nothing left to validate once a listing has been decoded.

use crate::models::Repository;

/// Repositories shown in the listing.
pub const DISPLAY_TOP_N: usize = 6;
/// Repositories compared in the stars/forks chart.
pub const CHART_TOP_N: usize = 5;

/// Language name -> number of repositories using it as primary language.
///
/// Iterates in order of first appearance in the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageTally {
    entries: Vec<(String, u64)>,
}

impl LanguageTally {
    pub fn get(&self, language: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. repositories that have a language.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    fn bump(&mut self, language: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((language.to_string(), 1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateStats {
    pub total_stars: u64,
    pub total_forks: u64,
    /// Rounded to one decimal; 0 for an empty listing.
    pub avg_stars: f64,
    pub most_starred: Option<Repository>,
    pub top_repos: Vec<Repository>,
}

/// Counts repositories per primary language. Repositories without one are
/// left out entirely.
pub fn tally_languages(repos: &[Repository]) -> LanguageTally {
    let mut tally = LanguageTally::default();
    for language in repos.iter().filter_map(Repository::language) {
        tally.bump(language);
    }
    tally
}

/// At most `n` repositories, most stars first. Equal counts keep their
/// listing order.
pub fn top_by_stars(repos: &[Repository], n: usize) -> Vec<&Repository> {
    let mut sorted: Vec<&Repository> = repos.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
    sorted.truncate(n);
    sorted
}

pub fn aggregate(repos: &[Repository]) -> AggregateStats {
    let total_stars = repos
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.stargazers_count));
    let total_forks = repos
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.forks_count));

    let avg_stars = if repos.is_empty() {
        0.0
    } else {
        round_one_decimal(total_stars as f64 / repos.len() as f64)
    };

    let top_repos: Vec<Repository> = top_by_stars(repos, DISPLAY_TOP_N)
        .into_iter()
        .cloned()
        .collect();

    AggregateStats {
        total_stars,
        total_forks,
        avg_stars,
        most_starred: top_repos.first().cloned(),
        top_repos,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
