//! One interactive viewer: a sequence of searches writing to a single view.
//!
//! Every search takes a ticket. Only the holder of the newest ticket may
//! write its outcome; results of superseded searches are dropped.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::activity::CommitActivity;
use crate::error::FetchError;
use crate::github::GithubClient;
use crate::report::Report;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading { username: String },
    Loaded(Box<Report>),
    Failed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The search was still current; carries the state it wrote.
    Applied(ViewState),
    Superseded,
}

#[derive(Debug)]
struct Inner {
    latest: u64,
    view: ViewState,
}

#[derive(Debug)]
pub struct SearchSession {
    inner: Mutex<Inner>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                latest: 0,
                view: ViewState::Idle,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a search. Any earlier result is discarded and every ticket
    /// handed out before this one stops being current.
    pub fn begin(&self, username: &str) -> Ticket {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.view = ViewState::Loading {
            username: username.trim().to_string(),
        };
        Ticket(inner.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.lock().latest == ticket.0
    }

    /// Write the outcome of the search behind `ticket`, unless a newer search
    /// has started since. A failure replaces earlier results.
    pub fn complete(&self, ticket: Ticket, result: Result<Report, FetchError>) -> Outcome {
        self.complete_with(ticket, result, |_| {})
    }

    /// Like [`complete`](Self::complete), and also hands the written view to
    /// `render` before the session is unlocked. No newer ticket can be issued
    /// until `render` returns, so output from a superseded search never
    /// reaches the screen.
    pub fn complete_with<F>(
        &self,
        ticket: Ticket,
        result: Result<Report, FetchError>,
        render: F,
    ) -> Outcome
    where
        F: FnOnce(&ViewState),
    {
        let mut inner = self.lock();
        if inner.latest != ticket.0 {
            debug!(ticket = ticket.0, latest = inner.latest, "dropping superseded result");
            return Outcome::Superseded;
        }
        inner.view = match result {
            Ok(report) => ViewState::Loaded(Box::new(report)),
            Err(err) => {
                warn!(error = ?err, "search failed");
                ViewState::Failed {
                    message: err.to_string(),
                }
            }
        };
        render(&inner.view);
        Outcome::Applied(inner.view.clone())
    }

    pub fn view(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Full cycle: take a ticket, fetch, aggregate, and write the result if
    /// still current.
    pub async fn search(&self, client: &GithubClient, username: &str) -> Outcome {
        let ticket = self.begin(username);
        self.run(ticket, client, username).await
    }

    /// The fetch-and-aggregate half of [`search`](Self::search), for callers
    /// that take the ticket up front.
    pub async fn run(&self, ticket: Ticket, client: &GithubClient, username: &str) -> Outcome {
        self.run_with(ticket, client, username, |_| {}).await
    }

    /// [`run`](Self::run), rendering the result through
    /// [`complete_with`](Self::complete_with).
    pub async fn run_with<F>(
        &self,
        ticket: Ticket,
        client: &GithubClient,
        username: &str,
        render: F,
    ) -> Outcome
    where
        F: FnOnce(&ViewState),
    {
        if !self.is_current(ticket) {
            return Outcome::Superseded;
        }
        let result = client.fetch_profile(username).await;
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "search superseded while in flight");
            return Outcome::Superseded;
        }
        let result = result.map(|(profile, repos)| {
            let activity = CommitActivity::simulate(&mut rand::rng());
            Report::build(profile, repos, activity)
        });
        self.complete_with(ticket, result, render)
    }
}
