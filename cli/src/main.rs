//! CLI for issue-sync.
//!
//! Assembles an in-memory outline item from flags, runs one synchronization
//! against GitHub, and prints where the item ended up.

use clap::Parser;
use issue_sync::{
    AssignPolicy, Credential, Issue, ItemAccessor, MemoryItem, SyncConfig, SyncError, SyncRunner,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Issue Sync - Push a single outline item to GitHub as a created or updated issue.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Heading text of the item.
    #[arg(long)]
    title: String,

    /// Category label selecting the repository ('repo' or 'owner/repo').
    #[arg(long)]
    category: Option<String>,

    /// Existing issue reference ('owner/repo#number') to update instead of creating.
    #[arg(long)]
    reference: Option<String>,

    /// Body text for the issue.
    #[arg(long, conflicts_with = "body_file")]
    body: Option<String>,

    /// Read the body text from a file.
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Tag to send as a label (repeatable).
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Mark the item as done (closes the issue on update).
    #[arg(long)]
    done: bool,

    /// Workflow state keyword of the item (e.g. TODO, NEXT).
    #[arg(long)]
    workflow_state: Option<String>,

    /// Assignment policy: 'never', 'always', or a comma-separated list of
    /// workflow states that trigger self-assignment.
    #[arg(long, default_value = "never")]
    assign: String,

    /// Do not rewrite the heading into an issue link.
    #[arg(long)]
    no_linkify: bool,

    /// Base URL of the GitHub REST API.
    #[arg(long, default_value = "https://api.github.com")]
    api_base: Url,

    /// Base URL used when building issue links.
    #[arg(long, default_value = "https://github.com")]
    web_base: Url,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok((issue, item)) => {
            print_summary(&issue, &item);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Synchronization failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Register as the global default subscriber
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<(Issue, MemoryItem), SyncError> {
    let body = match (&args.body, &args.body_file) {
        (Some(body), _) => body.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            SyncError::Item(issue_sync::ItemError(format!(
                "cannot read body file '{}': {e}",
                path.display()
            )))
        })?,
        (None, None) => String::new(),
    };

    let mut item = MemoryItem::new(&args.title)
        .with_body(body)
        .with_tags(args.tags.clone())
        .with_done(args.done);
    if let Some(category) = &args.category {
        item = item.with_property("category", category);
    }
    if let Some(reference) = &args.reference {
        item = item.with_property("github", reference);
    }
    if let Some(state) = &args.workflow_state {
        item = item.with_workflow_state(state);
    }

    let config = SyncConfig::new(Credential::token(args.token))
        .with_linkify(!args.no_linkify)
        .with_assign(parse_assign_policy(&args.assign))
        .with_api_base(args.api_base)
        .with_web_base(args.web_base);

    let runner = SyncRunner::new(config)?;
    let issue = runner.sync(&mut item).await?;
    Ok((issue, item))
}

/// Parses the `--assign` flag into a policy.
fn parse_assign_policy(value: &str) -> AssignPolicy {
    match value.trim() {
        "never" => AssignPolicy::Never,
        "always" => AssignPolicy::Always,
        states => AssignPolicy::States(
            states
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    }
}

/// Prints the final run summary.
fn print_summary(issue: &Issue, item: &MemoryItem) {
    println!("\nSummary:");
    if let Some(reference) = issue.reference() {
        println!("  Issue: {reference}");
    }
    println!("  State: {}", issue.state.as_str());
    println!("  Heading: {}", item.heading_text());
}
