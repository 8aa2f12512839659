use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayring-cli", version, about = "Dayring CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ring angle mapping
    Ring {
        #[command(subcommand)]
        action: commands::ring::RingAction,
    },
    /// Overlap grouping for stacked tasks
    Overlap {
        #[command(subcommand)]
        action: commands::overlap::OverlapAction,
    },
    /// Live indicator placement on the timeline
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    // Logs go to stderr so command output stays machine-readable.
    // Override with RUST_LOG=dayring_core=trace to see placement decisions.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dayring_core=warn,dayring_cli=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Ring { action } => commands::ring::run(action),
        Commands::Overlap { action } => commands::overlap::run(action),
        Commands::Timeline { action } => commands::timeline::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
