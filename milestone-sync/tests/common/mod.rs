#![allow(dead_code)]

use milestone_sync::{GitHubClient, IssueKind, IssueReference, Milestone, MilestoneState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wiremock::MockServer;

pub const OWNER: &str = "acme";
pub const REPO: &str = "tracker";
pub const TOKEN: &str = "test-token";

pub fn repo_path(suffix: &str) -> String {
    format!("/repos/{OWNER}/{REPO}/{suffix}")
}

pub fn client_for(server: &MockServer) -> GitHubClient {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    GitHubClient::new(&server.uri(), TOKEN, OWNER, REPO).unwrap()
}

pub fn milestone_json(number: u64, title: &str, state: &str) -> Value {
    json!({
        "url": format!("https://api.github.com/repos/{OWNER}/{REPO}/milestones/{number}"),
        "id": 1000 + number,
        "number": number,
        "title": title,
        "state": state,
        "description": null,
        "open_issues": 1,
        "closed_issues": 0,
        "due_on": null
    })
}

pub fn issue_json(number: u64, title: &str, milestone: u64) -> Value {
    json!({
        "number": number,
        "title": title,
        "state": "open",
        "milestone": milestone_json(milestone, "ignored", "open")
    })
}

pub fn not_found() -> Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    })
}

pub fn milestone(number: u64, title: &str, state: MilestoneState) -> Milestone {
    Milestone {
        number,
        title: title.to_string(),
        state,
        description: String::new(),
        open_issues: 0,
        closed_issues: 0,
        due_on: String::new(),
    }
}

pub fn issue(number: u64, milestone_number: u64) -> IssueReference {
    IssueReference {
        number,
        milestone_number,
        title: format!("Issue {number}"),
        kind: IssueKind::Issue,
    }
}

/// Counts ERROR events emitted by this crate while installed.
#[derive(Clone, Default)]
pub struct ErrorEvents(Arc<AtomicUsize>);

impl ErrorEvents {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() == Level::ERROR && metadata.target().starts_with("milestone_sync") {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Installs an [`ErrorEvents`] counter for the current thread until the
/// guard drops.
pub fn capture_errors() -> (ErrorEvents, DefaultGuard) {
    let events = ErrorEvents::default();
    let guard =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(events.clone()));
    (events, guard)
}
