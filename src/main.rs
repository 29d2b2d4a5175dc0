//! JiraInsight CLI
//!
//! Runs one JIRA operation and prints the result.
//!
//! Usage:
//!   jirainsight --domain acme --email me@acme.io test
//!   jirainsight --domain acme --email me@acme.io issue PROJ-123
//!   jirainsight --domain acme --email me@acme.io search "project = PROJ" --json
//!
//! The API token is read from `--token` or `JIRA_API_TOKEN`.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use jirainsight::api::JiraClient;
use jirainsight::config::Settings;
use jirainsight::error::AppError;
use jirainsight::logging;
use jirainsight::model::{Issue, SearchResult};
use jirainsight::session::{Credential, SessionStore};
use jirainsight::tasks::{create_task_channel, ApiMessage};

#[derive(Parser)]
#[command(name = "jirainsight")]
#[command(about = "Query JIRA Cloud issues from the command line", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JIRA site, e.g. "acme" or "acme.atlassian.net"
    #[arg(long, env = "JIRA_DOMAIN", global = true)]
    domain: Option<String>,

    /// Account email
    #[arg(long, env = "JIRA_EMAIL", global = true)]
    email: Option<String>,

    /// API token
    #[arg(long, env = "JIRA_API_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log to stderr (-v info, -vv debug). Without it logs go to a file.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the credentials are accepted
    Test,
    /// Show one issue
    Issue {
        /// Issue key, e.g. PROJ-123
        key: String,
    },
    /// Run a JQL search
    Search {
        /// JQL query
        jql: String,
    },
}

fn init_tracing(verbosity: u8) -> Result<()> {
    match verbosity {
        0 => logging::init(),
        1 => logging::init_stderr(Some("jirainsight=info,warn")),
        _ => logging::init_stderr(Some("jirainsight=debug,info")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing log directory should not stop the command.
    if let Err(e) = init_tracing(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let outcome = run(&cli).await;
    logging::shutdown();

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_err) => {
                eprintln!("Error: {}", app_err.user_message());
                if let Some(action) = app_err.suggested_action() {
                    eprintln!("{}", action);
                }
                std::process::exit(1);
            }
            None => Err(e),
        },
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load().map_err(AppError::from)?;
    let client = JiraClient::new(&settings).map_err(AppError::from)?;

    let credential = credential_from_args(cli)?;
    let store = SessionStore::new();
    let user = store.create_user(credential.email());
    let saved = store
        .save_credential(&user.id, credential)
        .map_err(AppError::from)?;

    let (mut rx, spawner) = create_task_channel();
    let credential = saved.credential;
    match &cli.command {
        Commands::Test => spawner.spawn_test_connection(&client, credential),
        Commands::Issue { key } => spawner.spawn_fetch_issue(&client, key.clone(), credential),
        Commands::Search { jql } => spawner.spawn_search(&client, jql.clone(), credential),
    };
    drop(spawner);

    let message = rx
        .recv()
        .await
        .context("background task ended without a result")?;

    match message {
        ApiMessage::ConnectionTested { domain, ok } => {
            if !ok {
                bail!("could not connect to {}", domain);
            }
            println!("Connected to {}", domain);
        }
        ApiMessage::IssueFetched { result, .. } => {
            let issue = result.map_err(AppError::from)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&issue)?);
            } else {
                print_issue(&issue);
            }
        }
        ApiMessage::SearchCompleted { result, .. } => {
            let result = result.map_err(AppError::from)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_search(&result);
            }
        }
    }

    Ok(())
}

fn credential_from_args(cli: &Cli) -> Result<Credential> {
    let (Some(domain), Some(email), Some(token)) = (&cli.domain, &cli.email, &cli.token) else {
        return Err(AppError::other(
            "--domain, --email and --token (or JIRA_API_TOKEN) are required",
        )
        .into());
    };
    Ok(Credential::new(Credential::normalize_domain(domain), email, token))
}

fn print_issue(issue: &Issue) {
    println!("{}", issue);
    println!("  Type:      {}", issue.issue_type.name);
    println!("  Status:    {}", issue.status.name);
    println!("  Priority:  {}", issue.priority);
    println!("  Assignee:  {}", issue.assignee_display_name());
    println!("  Reporter:  {}", issue.reporter_display_name());
    println!("  Sprint:    {}", issue.sprint_name());
    if !issue.subtasks.is_empty() {
        println!(
            "  Subtasks:  {}/{} done",
            issue.completed_subtasks(),
            issue.subtasks.len()
        );
    }
    println!("  Comments:  {}", issue.comment_count());
    if let Some(description) = &issue.description {
        println!();
        println!("{}", description);
    }
}

fn print_search(result: &SearchResult) {
    println!("{}", result.summary());
    for issue in &result.issues {
        println!(
            "  {:<12} {:<14} {:<8} {}",
            issue.key,
            issue.status.name,
            issue.priority.level().to_string(),
            issue.summary
        );
    }
}
