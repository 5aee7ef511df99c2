//! `datosync diff`

use crate::commands::{CommandStatus, Context};
use clap::Args;
use datosync_core::report::{render_diff_report, render_normalize_failure, render_pull_failure};
use datosync_core_types::Sensitive;
use datosync_engine::commands::diff::{diff_sources, DiffOutcome, FailureStage};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Source snapshot file or API token
    pub src: String,

    /// Destination snapshot file or API token
    pub dest: String,
}

pub async fn execute(args: DiffArgs, ctx: &Context) -> anyhow::Result<CommandStatus> {
    let src = Sensitive::new(args.src);
    let dest = Sensitive::new(args.dest);

    match diff_sources(&src, &dest, &ctx.client).await {
        DiffOutcome::Diffed(diffs) => {
            print!("{}", render_diff_report(&diffs, ctx.color));
            Ok(CommandStatus::Success)
        }
        DiffOutcome::Failed(failures) => {
            for failure in &failures {
                let descriptor = failure.descriptor.expose();
                let rendered = match failure.stage {
                    FailureStage::Resolve => {
                        render_pull_failure(descriptor, &failure.error, ctx.color)
                    }
                    FailureStage::Normalize => {
                        render_normalize_failure(descriptor, &failure.error, ctx.color)
                    }
                };
                print!("{}", rendered);
            }
            Ok(CommandStatus::Failed)
        }
    }
}
