mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evdir_core::constants::UPCOMING_LIMIT;
use evdir_core::event::EventId;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{DirectoryContext, FilterArgs};

#[derive(Parser)]
#[command(name = "evdir")]
#[command(about = "Browse, search and filter the events directory")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events with category and access counts
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the feed and counts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the next few events, grouped by day
    Upcoming {
        #[command(flatten)]
        filters: FilterArgs,

        /// How many events to show
        #[arg(short = 'n', long, default_value_t = UPCOMING_LIMIT)]
        limit: usize,
    },
    /// Show one event with its speakers and related events
    Show {
        id: EventId,

        /// Open the event page in your browser
        #[arg(long)]
        open: bool,
    },
    /// Unlock private events on this machine
    Login {
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Hide private events again
    Logout,
    /// Show session and configuration details
    Status,
    /// Browse events interactively
    Browse,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = DirectoryContext::load()?;

    match cli.command {
        Commands::List { filters, json } => commands::list::run(&ctx, filters.into(), json).await,
        Commands::Upcoming { filters, limit } => {
            commands::upcoming::run(&ctx, filters.into(), limit).await
        }
        Commands::Show { id, open } => commands::show::run(&ctx, id, open).await,
        Commands::Login { username } => commands::login::run(&ctx, username),
        Commands::Logout => commands::logout::run(&ctx),
        Commands::Status => commands::status::run(&ctx),
        Commands::Browse => commands::browse::run(&ctx).await,
    }
}

/// Logs go to stderr so they never mix with `--json` output.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "evdir=debug,evdir_core=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
