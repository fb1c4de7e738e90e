mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hospital-ui-tools")]
#[command(about = "Checks for the hospital dashboard page behaviors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a region map and show what the district select would list
    Regions {
        /// Region map JSON file (built-in map when omitted)
        file: Option<PathBuf>,

        /// Print the district options rendered for this state
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Fetch the ambulance stats and print the dashboard text
    Stats {
        /// Base URL of the hospital app
        #[arg(long, default_value = "http://localhost:5000")]
        url: String,

        /// Stats endpoint path
        #[arg(long, default_value = hospital_ui::config::DEFAULT_AMBULANCE_STATS_URL)]
        path: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Regions { file, state } => {
            commands::regions::run(file.as_deref(), state.as_deref())?;
        }

        Commands::Stats { url, path } => {
            commands::stats::run(&url, &path)?;
        }
    }

    Ok(())
}
