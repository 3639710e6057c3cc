use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use ghprofile::chart::ChartData;
use ghprofile::github::validate_username;
use ghprofile::session::{SearchSession, ViewState};
use ghprofile::svg::{self, Theme};
use ghprofile::{Config, GithubClient, Report, logging, summary};

/// Show a GitHub user's public profile, top repositories and repository
/// statistics.
#[derive(Parser, Debug)]
#[command(name = "ghprofile", version, about)]
struct Cli {
    /// GitHub username to look up. Without one, usernames are read from
    /// stdin, one per line.
    username: Option<String>,

    /// Read usernames from stdin even when one is given on the command line
    #[arg(short, long)]
    interactive: bool,

    /// Directory for the dark and light chart sheets
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print the text summary only
    #[arg(long)]
    no_svg: bool,

    /// GitHub REST API root
    #[arg(long)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.api_url {
            config.api_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = secs;
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = dir.clone();
        }
        config
    }
}

#[derive(Clone)]
struct Output {
    out_dir: PathBuf,
    svg: bool,
}

impl Output {
    /// Writes a loaded view. A failed view is handed back as its message.
    fn show(&self, view: &ViewState) -> Result<Option<String>> {
        match view {
            ViewState::Loaded(report) => {
                print!("{}", summary::render(report, Utc::now().date_naive()));
                if self.svg {
                    self.write_svgs(report)?;
                }
                Ok(None)
            }
            ViewState::Failed { message } => Ok(Some(message.clone())),
            ViewState::Idle | ViewState::Loading { .. } => Ok(None),
        }
    }

    fn write_svgs(&self, report: &Report) -> Result<()> {
        let data = ChartData::from_report(report);
        fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create {}", self.out_dir.display()))?;

        for theme in Theme::ALL {
            let path = self.out_dir.join(format!("{}.svg", theme.file_stem()));
            fs::write(&path, svg::generate_svg(report, &data, theme))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "chart sheet written");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.apply(Config::load().context("Failed to load configuration")?);
    let client = GithubClient::new(&config)?;
    let output = Output {
        out_dir: config.out_dir.clone(),
        svg: !cli.no_svg,
    };
    let session = Arc::new(SearchSession::new());

    match cli.username.as_deref() {
        Some(username) if !cli.interactive => {
            let ticket = session.begin(username);
            let mut shown = Ok(None);
            session
                .run_with(ticket, &client, username, |view| shown = output.show(view))
                .await;
            if let Some(message) = shown? {
                anyhow::bail!(message);
            }
            Ok(())
        }
        initial => interactive(session, client, output, initial).await,
    }
}

/// Each submitted line starts a new search and cancels the one in flight.
async fn interactive(
    session: Arc<SearchSession>,
    client: GithubClient,
    output: Output,
    initial: Option<&str>,
) -> Result<()> {
    let mut in_flight: Option<JoinHandle<()>> = None;

    let mut submit = |username: String| {
        // a stray Enter must not cancel the search in flight
        if let Err(err) = validate_username(&username) {
            eprintln!("{err}");
            return;
        }
        if let Some(previous) = in_flight.take() {
            previous.abort();
        }
        let ticket = session.begin(&username);
        let session = Arc::clone(&session);
        let client = client.clone();
        let output = output.clone();
        in_flight = Some(tokio::spawn(async move {
            // rendered under the session lock so a newer search cannot start
            // while this one is still writing
            session
                .run_with(ticket, &client, &username, |view| match output.show(view) {
                    Ok(Some(message)) => eprintln!("{message}"),
                    Ok(None) => {}
                    Err(err) => warn!(error = %format!("{err:#}"), "failed to render result"),
                })
                .await;
        }));
    };

    if let Some(username) = initial {
        submit(username.to_string());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        submit(line);
    }
    drop(submit);

    if let Some(last) = in_flight {
        // an aborted task reports a cancellation error; nothing to show for it
        let _ = last.await;
    }
    Ok(())
}
