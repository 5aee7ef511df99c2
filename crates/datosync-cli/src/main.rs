//! DatoSync CLI
//!
//! Pull DatoCMS models and fields into snapshot files and diff snapshots
//! across environments.

use clap::{Parser, Subcommand, ValueEnum};
use datosync_core::logging_facility::{init, Profile};

mod commands;

use commands::{CommandStatus, Context};

#[derive(Debug, Parser)]
#[command(name = "datosync", version)]
#[command(about = "DatoSync - compare DatoCMS models across environments", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args)]
pub struct GlobalArgs {
    #[arg(
        long,
        env = "DATOSYNC_SITE_API_URL",
        value_name = "URL",
        default_value = datosync_engine::site_api::DEFAULT_SITE_API_URL,
        global = true,
        help = "Base URL of the Site API"
    )]
    pub site_api_url: String,

    #[arg(
        long,
        global = true,
        help = "Disable coloured output (also disabled by a non-empty NO_COLOR)"
    )]
    pub no_color: bool,

    #[arg(
        long,
        env = "DATOSYNC_LOG_PROFILE",
        value_enum,
        value_name = "PROFILE",
        default_value = "quiet",
        global = true,
        help = "Log profile for stderr diagnostics"
    )]
    pub log_profile: LogProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogProfile {
    Quiet,
    Development,
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Quiet => Profile::Quiet,
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pull all models and fields and write them to a file
    Pull(commands::pull::PullArgs),
    /// Compare the models and fields of two snapshot files or API tokens
    Diff(commands::diff::DiffArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init(cli.global.log_profile.into());

    let result = match Context::from_args(&cli.global) {
        Ok(ctx) => match cli.command {
            Commands::Pull(args) => commands::pull::execute(args, &ctx).await,
            Commands::Diff(args) => commands::diff::execute(args, &ctx).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(CommandStatus::Success) => {}
        Ok(CommandStatus::Failed) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
