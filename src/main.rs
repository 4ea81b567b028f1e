use clap::{Parser, Subcommand};
use std::process::ExitCode;

use dossier::commands::{cmd_config_get, cmd_config_set, cmd_config_show, cmd_lookup, cmd_suggest};

#[derive(Parser)]
#[command(name = "dossier")]
#[command(about = "Company lookup combining profile data with GitHub repository stats")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a company and render its dossier
    #[command(visible_alias = "l")]
    Lookup {
        /// Company or organization name
        name: String,

        /// Print the raw snapshot as JSON instead of the card
        #[arg(long)]
        json: bool,
    },

    /// List name suggestions for a partial query
    Suggest {
        /// Partial company name
        prefix: String,
    },

    /// Manage credentials
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show which credentials are configured
    Show,
    /// Print one configured value
    Get { key: String },
    /// Set a value (crunchbase.api_key or github.token)
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lookup { name, json } => cmd_lookup(&name, json).await,
        Commands::Suggest { prefix } => cmd_suggest(&prefix).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Get { key } => cmd_config_get(&key),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
