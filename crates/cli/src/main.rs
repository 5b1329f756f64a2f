//! StyleStore harness CLI - Runs the admin products scenario against a live API.
//!
//! # Usage
//!
//! ```bash
//! # Log in and run every listing step
//! stylestore-harness run
//!
//! # Against another server, without registering a fallback admin
//! stylestore-harness --api-url https://staging.example.com/api --no-register run
//!
//! # Just check that the configured account can log in
//! stylestore-harness login
//!
//! # One ad-hoc listing request
//! stylestore-harness products --category men --limit 5
//!
//! # Confirm the endpoint rejects anonymous callers
//! stylestore-harness products --anonymous
//! ```
//!
//! # Commands
//!
//! - `run` - Authenticate, then run the listing steps in order
//! - `login` - Authenticate and print the session
//! - `products` - Fetch one listing page
//!
//! Set `RUST_LOG=stylestore_harness=debug` to log every product, and
//! `STYLESTORE_LOG_JSON=1` for JSON log lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "stylestore-harness")]
#[command(author, version, about = "StyleStore API test harness")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
struct GlobalArgs {
    /// API base URL, including the `/api` prefix (overrides `STYLESTORE_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Do not register the fallback admin when login is rejected
    #[arg(long, global = true)]
    no_register: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate, then run every listing step
    Run,
    /// Authenticate and print the session
    Login,
    /// Fetch one product listing page
    Products {
        /// Category filter (`men`, `women`, `kids`)
        #[arg(short, long)]
        category: Option<String>,

        /// Search term
        #[arg(short, long)]
        search: Option<String>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Send the request without a bearer token
        #[arg(long)]
        anonymous: bool,
    },
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stylestore_harness=info,stylestore_cli=info".into());

    let json = std::env::var_os("STYLESTORE_LOG_JSON").is_some();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = run(cli).await;
    if let Err(e) = &result {
        tracing::error!("Command failed: {e}");
    }
    std::process::exit(commands::exit_code(&result));
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let config = commands::load_config(cli.global.api_url.as_deref(), cli.global.no_register)?;

    match cli.command {
        Commands::Run => commands::run::execute(config).await,
        Commands::Login => commands::login::check(config).await,
        Commands::Products {
            category,
            search,
            limit,
            page,
            anonymous,
        } => {
            let mut query = stylestore_harness::ListingQuery::all();
            query.category = category;
            query.search = search;
            query.limit = limit;
            query.page = page;
            commands::products::fetch(config, query, anonymous).await
        }
    }
}
