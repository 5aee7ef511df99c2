//! `datosync pull`

use crate::commands::{CommandStatus, Context};
use clap::Args;
use datosync_core::report::{render_pull_failure, render_pull_success, render_write_failure};
use datosync_core_types::Sensitive;
use datosync_engine::commands::pull::{pull, PullFailure, DEFAULT_FILENAME};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct PullArgs {
    /// API token (read-only or full-access)
    #[arg(short, long, env = "DATOCMS_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Snapshot file to write
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    pub filename: PathBuf,
}

pub async fn execute(args: PullArgs, ctx: &Context) -> anyhow::Result<CommandStatus> {
    let token = Sensitive::new(args.token);
    let filename = args.filename.display().to_string();

    match pull(&token, &args.filename, &ctx.client).await {
        Ok(summary) => {
            print!(
                "{}",
                render_pull_success(summary.models_len, summary.fields_len, &filename, ctx.color)
            );
            Ok(CommandStatus::Success)
        }
        Err(PullFailure::Fetch(e)) => {
            print!("{}", render_pull_failure(token.expose(), &e, ctx.color));
            Ok(CommandStatus::Failed)
        }
        Err(PullFailure::Write(e)) => {
            print!("{}", render_write_failure(&filename, &e, ctx.color));
            Ok(CommandStatus::Failed)
        }
    }
}
