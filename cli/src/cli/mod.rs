pub mod argparse;
mod helpers;

pub use argparse::get_args;

mod clip {
    use anyhow::Context;
    use cliptube_core::{identifiers::VideoId, request::ClipRequest};

    use super::argparse;
    use crate::cli::helpers;

    pub(crate) async fn produce(args: &argparse::ClipOpts) -> anyhow::Result<()> {
        let app = helpers::build_app(&args.app)?;

        let request = ClipRequest::new(VideoId::new(args.video_id.as_str()), args.start, args.end)
            .context("invalid clip request")?;
        let dest = args
            .output
            .clone()
            .unwrap_or_else(|| request.attachment_filename().into());

        let output = app::produce_clip(&app, &request)
            .await
            .context("could not produce clip")?;
        tokio::fs::copy(output.path(), &dest)
            .await
            .with_context(|| format!("could not write clip to {:?}", dest))?;

        log::info!("wrote {} bytes to {:?}", output.len(), dest);
        println!("{}", dest.display());
        Ok(())
    }
}

mod clean {
    use std::time::Duration;

    use anyhow::Context;

    use super::argparse;
    use crate::cli::helpers;

    const SECONDS_PER_HOUR: u64 = 3600;

    pub(crate) async fn sweep_scratch(args: &argparse::CleanOpts) -> anyhow::Result<()> {
        let app = helpers::build_app(&args.app)?;

        let max_age = Duration::from_secs(args.max_age_hours * SECONDS_PER_HOUR);
        let swept = app
            .workspace
            .sweep(max_age, args.dry_run)
            .await
            .context("could not sweep scratch directory")?;

        for path in &swept {
            println!("{}", path.display());
        }
        log::info!(
            "{} {} stale scratch file(s)",
            if args.dry_run { "found" } else { "removed" },
            swept.len()
        );
        Ok(())
    }
}

mod config {
    use super::argparse;
    use crate::cli::helpers;

    pub(crate) fn show(args: &argparse::ShowConfigOpts) -> anyhow::Result<()> {
        let app = helpers::build_app(&args.app)?;

        println!("scratch_root: {}", app.workspace.root().display());
        println!(
            "fetch_tool: {} ({})",
            app.fetch_tool().name(),
            app.fetch_tool().executable_path().display()
        );
        println!(
            "trim_tool: {} ({})",
            app.trim_tool().name(),
            app.trim_tool().executable_path().display()
        );
        println!("bind: {}", app.config.bind_address());
        Ok(())
    }
}

pub async fn run_cli(args: &argparse::CliOpts) -> anyhow::Result<()> {
    match &args.subcmd {
        argparse::SubCommand::Clip(opts) => clip::produce(opts).await,
        argparse::SubCommand::Clean(opts) => clean::sweep_scratch(opts).await,
        argparse::SubCommand::ShowConfig(opts) => config::show(opts),
    }
}
