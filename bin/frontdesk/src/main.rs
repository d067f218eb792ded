mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(about = "Business-in-a-box chat responder core", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a message through the full routing pipeline
    Route {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        tenant: String,

        #[arg(short, long, default_value = "Kenya")]
        region: String,

        /// The inbound message text
        text: String,
    },

    /// Classify a message without dispatching or persisting
    Classify {
        #[arg(short, long, default_value = "Kenya")]
        region: String,

        text: String,
    },

    /// Show the latest memory record for a conversation
    Recall {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        tenant: String,
    },

    /// Show recent transcript entries for a conversation
    Log {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        tenant: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Delete all but the newest records (retention maintenance)
    Prune {
        /// How many records to keep
        #[arg(long, default_value_t = 1000)]
        max: usize,

        /// Prune the transcript table instead of the memory records
        #[arg(long)]
        messages: bool,
    },

    /// Show memory store statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Route {
            user,
            tenant,
            region,
            text,
        } => commands::route(&user, &tenant, &region, &text),
        Commands::Classify { region, text } => commands::classify(&region, &text),
        Commands::Recall { user, tenant } => commands::recall(&user, &tenant),
        Commands::Log {
            user,
            tenant,
            limit,
        } => commands::log(&user, &tenant, limit),
        Commands::Prune { max, messages } => commands::prune(max, messages),
        Commands::Stats => commands::stats(),
    }
}
