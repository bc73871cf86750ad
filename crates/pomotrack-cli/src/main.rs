use clap::{Parser, Subcommand};
use pomotrack_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pomotrack", version, about = "Track focused work time from timer events")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read timer events from stdin and record pomodoros
    Track,
    /// Record a pomodoro manually
    Add(commands::pomodoro::AddArgs),
    /// List recorded pomodoros as JSON
    List {
        /// Only pomodoros started today
        #[arg(long)]
        today: bool,
    },
    /// Delete a recorded pomodoro
    Remove {
        /// Pomodoro ID
        id: i64,
    },
    /// Print total hours, active days and this week's hours
    Stats {
        /// Only pomodoros started today
        #[arg(long)]
        today: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let result = match cli.command {
        Commands::Track => commands::track::run(&config),
        Commands::Add(args) => commands::pomodoro::add(&config, args),
        Commands::List { today } => commands::pomodoro::list(&config, today),
        Commands::Remove { id } => commands::pomodoro::remove(&config, id),
        Commands::Stats { today } => commands::stats::run(&config, today),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
