//! Monthly commit activity.
//!
//! This is a placeholder: the values are random and say nothing about the
//! user's real commit history, which is never fetched. Anything rendering it
//! must label it as simulated.

use rand::Rng;

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Exclusive upper bound of a simulated bucket.
pub const MAX_COMMITS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitActivity {
    pub commits: [u32; 12],
}

impl CommitActivity {
    pub fn simulate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut commits = [0u32; 12];
        for bucket in &mut commits {
            *bucket = rng.random_range(0..MAX_COMMITS);
        }
        Self { commits }
    }

    /// `(month label, value)` pairs, January first.
    pub fn buckets(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        MONTHS.iter().copied().zip(self.commits.iter().copied())
    }

    pub fn peak(&self) -> u32 {
        self.commits.iter().copied().max().unwrap_or(0)
    }
}
