//! Datasets handed to the chart renderer. No drawing happens here.

use crate::activity::CommitActivity;
use crate::report::Report;
use crate::stats::{CHART_TOP_N, top_by_stars};

pub const FALLBACK_COLOR: &str = "#cccccc";

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSlice {
    pub label: String,
    pub count: u64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepoComparison {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub languages: Vec<LanguageSlice>,
    pub comparison: Vec<RepoComparison>,
    /// Simulated, see [`crate::activity`].
    pub activity: CommitActivity,
}

impl ChartData {
    pub fn from_report(report: &Report) -> Self {
        let languages = report
            .languages
            .iter()
            .map(|(label, count)| LanguageSlice {
                label: label.to_string(),
                count,
                color: language_color(label),
            })
            .collect();

        let comparison = top_by_stars(&report.repos, CHART_TOP_N)
            .into_iter()
            .map(|repo| RepoComparison {
                name: repo.name.clone(),
                stars: repo.stargazers_count,
                forks: repo.forks_count,
            })
            .collect();

        Self {
            languages,
            comparison,
            activity: report.activity.clone(),
        }
    }
}

/// GitHub linguist colour for the common languages.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "TypeScript" => "#3178c6",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#178600",
        "PHP" => "#4F5D95",
        "Ruby" => "#701516",
        "Go" => "#00ADD8",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Rust" => "#dea584",
        "Shell" => "#89e051",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Vue" => "#41b883",
        "Dart" => "#00B4AB",
        "Elixir" => "#6e4a7e",
        "Clojure" => "#db5855",
        "Scala" => "#c22d40",
        "R" => "#198CE7",
        "Objective-C" => "#438eff",
        "Perl" => "#0298c3",
        "Lua" => "#000080",
        "Haskell" => "#5e5086",
        "PowerShell" => "#012456",
        "TeX" => "#3D6117",
        "Assembly" => "#6E4C13",
        "Groovy" => "#e69f56",
        "Julia" => "#a270ba",
        "Dockerfile" => "#384d54",
        "Makefile" => "#427819",
        "CMake" => "#DA3434",
        _ => FALLBACK_COLOR,
    }
}
