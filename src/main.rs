//! iamctl — IAM user, group, and access-key management CLI.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iamctl::backend::aws::AwsBackend;
use iamctl::config::Config;
use iamctl::constants;
use iamctl::env::Env;
use iamctl::manager::IdentityManager;
use iamctl::output::Renderer;
use iamctl::stats::TracingStats;

use cli::args::{Cli, Command, GroupAction, KeyAction, UserAction};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().ok();
    let config =
        Config::load(cwd.as_deref(), &Env::real()).context("failed to load configuration")?;
    let invocation = cli::resolve(&cli, &config);

    init_logging(&invocation.log_level);

    if matches!(cli.command, Command::Version) {
        return run_version();
    }

    let backend = AwsBackend::connect(&invocation.aws).await;
    let manager = IdentityManager::with_stats(Arc::new(backend), Arc::new(TracingStats));
    let renderer = invocation.format.renderer();

    match cli.command {
        Command::User { action } => run_user(action, &manager, renderer.as_ref()).await,
        Command::Key { action } => run_key(action, &manager, renderer.as_ref()).await,
        Command::Group { action } => run_group(action, &manager, renderer.as_ref()).await,
        Command::Version => unreachable!("handled above"),
    }
}

/// Install the tracing subscriber. Events go to stderr so stdout stays
/// clean for rendered output.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|err| {
        eprintln!("Warning: invalid log filter '{level}': {err}");
        EnvFilter::new("warn")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}  {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Run a `user` subcommand.
async fn run_user(
    action: UserAction,
    manager: &IdentityManager,
    renderer: &dyn Renderer,
) -> Result<()> {
    match action {
        UserAction::Create { username } => {
            let user = manager
                .create_user(&username)
                .await
                .with_context(|| format!("failed to create user {username}"))?;
            print!("{}", renderer.user(&user));
        }
        UserAction::Get { username } => {
            let record = manager
                .get_user(&username)
                .await
                .with_context(|| format!("failed to look up user {username}"))?;
            // Absence is an answer, not an error: exit 0 either way.
            match record {
                Some(user) => print!("{}", renderer.user(&user)),
                None => print!("{}", renderer.user_absent(&username)),
            }
        }
        UserAction::Delete { username } => {
            manager
                .delete_user(&username)
                .await
                .with_context(|| format!("failed to delete user {username}"))?;
            print!(
                "{}",
                renderer.confirmation(&format!("deleted user {username}"))
            );
        }
    }
    Ok(())
}

/// Run a `key` subcommand.
async fn run_key(
    action: KeyAction,
    manager: &IdentityManager,
    renderer: &dyn Renderer,
) -> Result<()> {
    match action {
        KeyAction::Create { username } => {
            let key = manager
                .create_access_key(&username)
                .await
                .with_context(|| format!("failed to create access key for {username}"))?;
            print!("{}", renderer.access_key(&key));
        }
        KeyAction::List { username } => {
            let keys = manager
                .list_access_keys(&username)
                .await
                .with_context(|| format!("failed to list access keys for {username}"))?;
            print!("{}", renderer.access_keys(&username, &keys));
        }
        KeyAction::Delete { username, key_id } => {
            manager
                .delete_access_key(&username, &key_id)
                .await
                .with_context(|| format!("failed to delete access key {key_id}"))?;
            print!(
                "{}",
                renderer.confirmation(&format!("deleted access key {key_id} of {username}"))
            );
        }
    }
    Ok(())
}

/// Run a `group` subcommand.
async fn run_group(
    action: GroupAction,
    manager: &IdentityManager,
    renderer: &dyn Renderer,
) -> Result<()> {
    match action {
        GroupAction::Add { username, group } => {
            manager
                .add_user_to_group(&username, &group)
                .await
                .with_context(|| format!("failed to add {username} to {group}"))?;
            print!(
                "{}",
                renderer.confirmation(&format!("added {username} to {group}"))
            );
        }
        GroupAction::Remove { username, group } => {
            let record = iamctl::models::Group::named(group.as_str());
            manager
                .remove_user_from_group(&username, &record)
                .await
                .with_context(|| format!("failed to remove {username} from {group}"))?;
            print!(
                "{}",
                renderer.confirmation(&format!("removed {username} from {group}"))
            );
        }
        GroupAction::List { username } => {
            let groups = manager
                .list_groups_for_user(&username)
                .await
                .with_context(|| format!("failed to list groups for {username}"))?;
            print!("{}", renderer.groups(&username, &groups));
        }
    }
    Ok(())
}
