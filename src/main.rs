use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Heartbeat and JSON exchange client for a local companion server", long_about = None)]
struct Cli {
    /// Companion server origin (overrides TETHER_SERVER and the config file)
    #[arg(short, long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the heartbeat and hold it until Ctrl-C
    Run,
    /// Send one liveness probe; the exit code reflects reachability
    Ping,
    /// Perform one JSON exchange and print the result
    Send {
        /// JSON payload (reads stdin when omitted)
        payload: Option<String>,
        /// Fail loudly instead of degrading to {} on error
        #[arg(long)]
        strict: bool,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) | None => {
            println!("tether {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Run) => cli::cmd_run(cli.server).await,
        Some(Commands::Ping) => cli::cmd_ping(cli.server).await,
        Some(Commands::Send { payload, strict }) => cli::cmd_send(cli.server, payload, strict).await,
    }
}
