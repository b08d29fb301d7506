use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use ticklist_app::{AppError, TaskListViewModel};
use ticklist_cli::commands::Command;
use ticklist_store::{AuthClient, StoreConfig, SupabaseStore};

/// Ticklist - a task list client for a hosted backend
#[derive(Parser)]
#[command(name = "tkl")]
#[command(version = "0.1.0")]
#[command(about = "A task list CLI client", long_about = None)]
struct Args {
    /// Backend project URL
    #[arg(long, global = true, env = "TICKLIST_URL")]
    url: Option<String>,

    /// Backend anon API key
    #[arg(long, global = true, env = "TICKLIST_ANON_KEY")]
    key: Option<String>,

    /// Account email
    #[arg(long, global = true, env = "TICKLIST_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "TICKLIST_PASSWORD")]
    password: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Initialize logging based on the RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=trace` - show all trace logs
/// - `RUST_LOG=debug` - show debug and above
/// - `RUST_LOG=warn` - show warn and above
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

fn required(value: &Option<String>, flag: &str, env: &str) -> Result<String, AppError> {
    value.clone().ok_or_else(|| {
        ticklist_store::StoreError::Config {
            reason: format!("missing {} (set {} or pass {})", flag, env, flag),
        }
        .into()
    })
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> Result<(), AppError> {
    let args = Args::parse();

    let Some(command) = &args.command else {
        println!("Welcome to Ticklist!");
        println!("Use 'tkl --help' for usage information.");
        return Ok(());
    };

    let config = StoreConfig::new(
        required(&args.url, "--url", "TICKLIST_URL")?,
        required(&args.key, "--key", "TICKLIST_ANON_KEY")?,
    );
    let auth = AuthClient::new(config.clone());

    let result = match command {
        Command::Register(cmd) => cmd.execute(&auth).await?,
        Command::Session(cmd) => {
            let email = required(&args.email, "--email", "TICKLIST_EMAIL")?;
            let password = required(&args.password, "--password", "TICKLIST_PASSWORD")?;
            let session = auth.sign_in(&email, &password).await?;

            let store = Arc::new(SupabaseStore::new(config, &session)?);
            let mut vm = TaskListViewModel::new(store, session);
            cmd.execute(&mut vm).await?
        }
    };
    println!("{}", result);

    Ok(())
}
