use std::f64::consts::PI;
use std::fmt::Write;

use crate::activity::MAX_COMMITS;
use crate::chart::{ChartData, LanguageSlice, RepoComparison};
use crate::report::Report;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 460.0;
const PADDING: f64 = 20.0;
const HEADER_HEIGHT: f64 = 90.0;
const PANEL_GAP: f64 = 20.0;
const PANEL_WIDTH: f64 = (WIDTH - 2.0 * PADDING - 2.0 * PANEL_GAP) / 3.0;
const PANEL_HEIGHT: f64 = HEIGHT - HEADER_HEIGHT - 2.0 * PADDING;
const TITLE_OFFSET: f64 = 24.0;
const LABEL_CHARS: usize = 10;

const STARS_COLOR: &str = "#0366d6";
const FORKS_COLOR: &str = "#28a745";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub panel: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub grid: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#0d1117",
                panel: "#161b22",
                text: "#c9d1d9",
                muted: "#8b949e",
                grid: "#30363d",
            },
            Theme::Light => ThemeColors {
                bg: "#f6f8fa",
                panel: "#ffffff",
                text: "#24292f",
                muted: "#57606a",
                grid: "#d0d7de",
            },
        }
    }

    /// File name stem used when writing the sheet to disk.
    pub fn file_stem(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode",
            Theme::Light => "light_mode",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn shorten(name: &str) -> String {
    if name.chars().count() <= LABEL_CHARS {
        name.to_string()
    } else {
        let head: String = name.chars().take(LABEL_CHARS - 1).collect();
        format!("{head}…")
    }
}

fn panel_x(index: usize) -> f64 {
    PADDING + index as f64 * (PANEL_WIDTH + PANEL_GAP)
}

fn panel_frame(out: &mut String, index: usize, title: &str, colors: &ThemeColors) {
    let x = panel_x(index);
    let y = HEADER_HEIGHT + PADDING;
    let _ = write!(
        out,
        r#"<rect x="{x:.1}" y="{y:.1}" width="{PANEL_WIDTH:.1}" height="{PANEL_HEIGHT:.1}" rx="8" fill="{panel}" stroke="{grid}"/>
<text x="{tx:.1}" y="{ty:.1}" class="title">{title}</text>
"#,
        panel = colors.panel,
        grid = colors.grid,
        tx = x + 12.0,
        ty = y + TITLE_OFFSET,
        title = escape_xml(title),
    );
}

fn header(out: &mut String, report: &Report) {
    let p = &report.profile;
    let _ = write!(
        out,
        r#"<text x="{PADDING}" y="{y1}" class="name">{name}</text>
<text x="{PADDING}" y="{y2}" class="muted">@{login} · {repos} repos · {followers} followers · {following} following · {gists} gists</text>
<text x="{PADDING}" y="{y3}" class="muted">★ {stars} total stars · ⑂ {forks} total forks · {avg:.1} avg stars/repo</text>
"#,
        y1 = PADDING + 20.0,
        y2 = PADDING + 44.0,
        y3 = PADDING + 64.0,
        name = escape_xml(p.display_name()),
        login = escape_xml(&p.login),
        repos = p.public_repos,
        followers = p.followers,
        following = p.following,
        gists = p.public_gists,
        stars = report.stats.total_stars,
        forks = report.stats.total_forks,
        avg = report.stats.avg_stars,
    );
}

// Donut built from dashed circle strokes: each slice is a dash of its share
// of the circumference, offset by the slices before it.
fn language_donut(out: &mut String, slices: &[LanguageSlice], colors: &ThemeColors) {
    panel_frame(out, 0, "Languages", colors);
    let x0 = panel_x(0);
    let y0 = HEADER_HEIGHT + PADDING;
    let cx = x0 + PANEL_WIDTH / 2.0;
    let cy = y0 + 120.0;
    let r = 60.0;
    let circumference = 2.0 * PI * r;

    let total: u64 = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        let _ = writeln!(
            out,
            r#"<text x="{cx:.1}" y="{cy:.1}" class="muted" text-anchor="middle">No language data</text>"#
        );
        return;
    }

    let mut offset = 0.0;
    for slice in slices {
        let len = slice.count as f64 / total as f64 * circumference;
        let _ = writeln!(
            out,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r}" fill="none" stroke="{color}" stroke-width="28" stroke-dasharray="{len:.2} {circumference:.2}" stroke-dashoffset="{off:.2}" transform="rotate(-90 {cx:.1} {cy:.1})"/>"#,
            color = slice.color,
            off = -offset,
        );
        offset += len;
    }

    let legend_top = cy + r + 36.0;
    for (i, slice) in slices.iter().take(6).enumerate() {
        let ly = legend_top + i as f64 * 18.0;
        let _ = writeln!(
            out,
            r#"<rect x="{lx:.1}" y="{ry:.1}" width="10" height="10" fill="{color}"/><text x="{tx:.1}" y="{ly:.1}" class="small">{label} ({count})</text>"#,
            lx = x0 + 16.0,
            ry = ly - 9.0,
            tx = x0 + 32.0,
            color = slice.color,
            label = escape_xml(&slice.label),
            count = slice.count,
        );
    }
}

fn comparison_bars(out: &mut String, repos: &[RepoComparison], colors: &ThemeColors) {
    panel_frame(out, 1, "Top repositories", colors);
    let x0 = panel_x(1) + 16.0;
    let baseline = HEADER_HEIGHT + PADDING + PANEL_HEIGHT - 48.0;
    let plot_height = PANEL_HEIGHT - 110.0;
    let plot_width = PANEL_WIDTH - 32.0;

    let _ = writeln!(
        out,
        r#"<line x1="{x0:.1}" y1="{baseline:.1}" x2="{x1:.1}" y2="{baseline:.1}" stroke="{grid}"/>"#,
        x1 = x0 + plot_width,
        grid = colors.grid,
    );

    if repos.is_empty() {
        return;
    }

    let max = repos
        .iter()
        .map(|r| r.stars.max(r.forks))
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let group = plot_width / repos.len() as f64;
    let bar = group * 0.35;

    for (i, repo) in repos.iter().enumerate() {
        let gx = x0 + i as f64 * group + group * 0.15;
        for (j, (value, color)) in [(repo.stars, STARS_COLOR), (repo.forks, FORKS_COLOR)]
            .into_iter()
            .enumerate()
        {
            let h = value as f64 / max * plot_height;
            let _ = writeln!(
                out,
                r#"<rect x="{x:.1}" y="{y:.1}" width="{bar:.1}" height="{h:.1}" fill="{color}"><title>{value}</title></rect>"#,
                x = gx + j as f64 * bar,
                y = baseline - h,
            );
        }
        let _ = writeln!(
            out,
            r#"<text x="{x:.1}" y="{y:.1}" class="small" text-anchor="middle">{label}</text>"#,
            x = gx + bar,
            y = baseline + 16.0,
            label = escape_xml(&shorten(&repo.name)),
        );
    }

    let ly = baseline + 36.0;
    let _ = writeln!(
        out,
        r#"<rect x="{x0:.1}" y="{ry:.1}" width="10" height="10" fill="{STARS_COLOR}"/><text x="{t1:.1}" y="{ly:.1}" class="small">Stars</text><rect x="{r2:.1}" y="{ry:.1}" width="10" height="10" fill="{FORKS_COLOR}"/><text x="{t2:.1}" y="{ly:.1}" class="small">Forks</text>"#,
        ry = ly - 9.0,
        t1 = x0 + 16.0,
        r2 = x0 + 70.0,
        t2 = x0 + 86.0,
    );
}

fn activity_line(out: &mut String, data: &ChartData, colors: &ThemeColors) {
    panel_frame(out, 2, "Commit activity (simulated)", colors);
    let x0 = panel_x(2) + 16.0;
    let baseline = HEADER_HEIGHT + PADDING + PANEL_HEIGHT - 48.0;
    let plot_height = PANEL_HEIGHT - 110.0;
    let step = (PANEL_WIDTH - 32.0) / 11.0;

    let mut points = String::new();
    for (i, (month, value)) in data.activity.buckets().enumerate() {
        let x = x0 + i as f64 * step;
        let y = baseline - value as f64 / MAX_COMMITS as f64 * plot_height;
        let _ = write!(points, "{x:.1},{y:.1} ");
        if i % 2 == 0 {
            let _ = writeln!(
                out,
                r#"<text x="{x:.1}" y="{ly:.1}" class="small" text-anchor="middle">{month}</text>"#,
                ly = baseline + 16.0,
            );
        }
    }

    let _ = writeln!(
        out,
        r#"<line x1="{x0:.1}" y1="{baseline:.1}" x2="{x1:.1}" y2="{baseline:.1}" stroke="{grid}"/>
<polyline points="{points}" fill="none" stroke="{STARS_COLOR}" stroke-width="2"/>"#,
        x1 = x0 + 11.0 * step,
        grid = colors.grid,
        points = points.trim_end(),
    );
}

/// One chart sheet: profile header plus the three charts.
pub fn generate_svg(report: &Report, data: &ChartData, theme: Theme) -> String {
    let colors = theme.colors();

    let mut body = String::new();
    header(&mut body, report);
    language_donut(&mut body, &data.languages, &colors);
    comparison_bars(&mut body, &data.comparison, &colors);
    activity_line(&mut body, data, &colors);

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{WIDTH}px" height="{HEIGHT}px"
     font-family="-apple-system,Segoe UI,Helvetica,Arial,sans-serif"
     font-size="14px">

<style>
.name  {{ fill: {text}; font-size: 22px; font-weight: 600; }}
.title {{ fill: {text}; font-weight: 600; }}
.muted {{ fill: {muted}; }}
.small {{ fill: {muted}; font-size: 11px; }}
</style>

<rect width="{WIDTH}px" height="{HEIGHT}px" fill="{bg}" rx="15"/>

{body}
</svg>
"#,
        text = colors.text,
        muted = colors.muted,
        bg = colors.bg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::CommitActivity;
    use crate::models::fixtures::{profile, repo};

    fn sheet(theme: Theme) -> String {
        let mut p = profile("octocat");
        p.name = Some("Tom & <Jerry>".into());
        let report = Report::build(
            p,
            vec![
                repo("A", 5, 1, Some("Go")),
                repo("B", 10, 3, Some("C++")),
                repo("a-very-long-repository-name", 0, 0, None),
            ],
            CommitActivity { commits: [50; 12] },
        );
        let data = ChartData::from_report(&report);
        generate_svg(&report, &data, theme)
    }

    #[test]
    fn escapes_user_text() {
        let svg = sheet(Theme::Dark);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!svg.contains("<Jerry>"));
    }

    #[test]
    fn contains_all_three_charts() {
        let svg = sheet(Theme::Light);
        assert!(svg.contains("Languages"));
        assert!(svg.contains("Top repositories"));
        assert!(svg.contains("Commit activity (simulated)"));
        assert!(svg.contains("#00ADD8"));
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("a-very-lo…"));
        assert!(svg.contains(Theme::Light.colors().bg));
    }

    #[test]
    fn empty_listing_still_renders() {
        let report = Report::build(profile("ghost"), vec![], CommitActivity { commits: [0; 12] });
        let data = ChartData::from_report(&report);
        let svg = generate_svg(&report, &data, Theme::Dark);
        assert!(svg.contains("No language data"));
        assert!(svg.ends_with("</svg>\n"));
    }
}
