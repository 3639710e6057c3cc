//! Plain-text rendition of a [`Report`], written to stdout by the binary.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::age::AccountAge;
use crate::report::Report;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn render(report: &Report, today: NaiveDate) -> String {
    let mut out = String::new();
    // fmt::Write into a String cannot fail
    let _ = write_summary(&mut out, report, today);
    out
}

fn write_summary(out: &mut String, report: &Report, today: NaiveDate) -> std::fmt::Result {
    let p = &report.profile;

    writeln!(out, "{} (@{})", p.display_name(), p.login)?;
    writeln!(out, "{}", p.bio_or_default())?;
    writeln!(out)?;
    writeln!(
        out,
        "Repos: {}  Followers: {}  Following: {}  Gists: {}",
        p.public_repos, p.followers, p.following, p.public_gists
    )?;

    if let Some(location) = p.location() {
        writeln!(out, "Location: {location}")?;
    }
    if let Some(url) = p.website_url() {
        writeln!(out, "Website:  {url}")?;
    }
    if let (Some(url), Some(handle)) = (p.twitter_url(), p.twitter_username.as_deref()) {
        writeln!(out, "Twitter:  @{handle} ({url})")?;
    }
    if let Some(created) = p.created_at {
        let joined = created.date_naive();
        write!(out, "Joined {}", joined.format(DATE_FORMAT))?;
        if let Some(age) = AccountAge::between(joined, today) {
            write!(out, " ({age})")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Top repositories")?;
    if report.stats.top_repos.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for repo in &report.stats.top_repos {
        writeln!(out, "  {}  {}", repo.name, repo.html_url)?;
        writeln!(out, "    {}", repo.description_or_default())?;
        write!(out, "    ★ {}  ⑂ {}", repo.stargazers_count, repo.forks_count)?;
        if let Some(language) = repo.language() {
            write!(out, "  {language}")?;
        }
        if let Some(updated) = repo.updated_at {
            write!(out, "  Updated {}", updated.format(DATE_FORMAT))?;
        }
        writeln!(out)?;
    }

    let stats = &report.stats;
    writeln!(out)?;
    writeln!(out, "Activity")?;
    if let Some(top) = &stats.most_starred {
        writeln!(out, "  Most Starred Repo: {} ({})", top.name, top.stargazers_count)?;
    }
    writeln!(out, "  Total Stars:       {}", stats.total_stars)?;
    writeln!(out, "  Total Forks:       {}", stats.total_forks)?;
    writeln!(out, "  Avg Stars/Repo:    {:.1}", stats.avg_stars)?;

    if !report.languages.is_empty() {
        writeln!(out)?;
        writeln!(out, "Languages")?;
        for (language, count) in report.languages.iter() {
            writeln!(out, "  {language}: {count}")?;
        }
    }

    Ok(())
}
