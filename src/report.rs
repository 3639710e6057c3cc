use crate::activity::CommitActivity;
use crate::models::{Profile, Repository};
use crate::stats::{AggregateStats, LanguageTally, aggregate, tally_languages};

/// Everything one successful search produces: the raw API data plus the
/// numbers derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub profile: Profile,
    pub repos: Vec<Repository>,
    pub stats: AggregateStats,
    pub languages: LanguageTally,
    pub activity: CommitActivity,
}

impl Report {
    pub fn build(profile: Profile, repos: Vec<Repository>, activity: CommitActivity) -> Self {
        let stats = aggregate(&repos);
        let languages = tally_languages(&repos);
        Self {
            profile,
            repos,
            stats,
            languages,
            activity,
        }
    }
}
