use app::app::ClipApp;

use super::argparse;

pub(crate) fn build_app(opts: &argparse::AppConfig) -> anyhow::Result<ClipApp> {
    let mut builder = app::app::ClipBuilder::new()?;
    builder.config = builder
        .config
        .scratch_root(opts.scratch_root.as_deref())?
        .fetch_override(opts.fetch_cmd.as_deref())?
        .trim_override(opts.trim_cmd.as_deref())?;
    Ok(builder.build()?)
}
