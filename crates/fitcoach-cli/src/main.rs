use clap::{Parser, Subcommand};
use fitcoach_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fitcoach-cli", version, about = "fitcoach CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trainer/client appointments
    Appointment {
        #[command(subcommand)]
        action: commands::appointment::AppointmentAction,
    },
    /// Blocked time and availability queries
    Availability {
        #[command(subcommand)]
        action: commands::availability::AvailabilityAction,
    },
    /// Daily check-ins and streaks
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (config, load_error) = match Config::try_load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "using default configuration");
    }

    let result = match cli.command {
        Commands::Appointment { action } => commands::appointment::run(action, config),
        Commands::Availability { action } => commands::availability::run(action, config),
        Commands::Streak { action } => commands::streak::run(action, config),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
