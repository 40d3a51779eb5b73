use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

const DEFAULT_MAX_AGE_HOURS: u64 = 24;

pub fn get_args() -> CliOpts {
    CliOpts::parse()
}

#[derive(Parser, Debug)]
#[clap(version = clap::crate_version!(), about = "produce trimmed video clips with external fetch/trim tools")]
pub struct CliOpts {
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Fetch a source video and cut a time range out of it
    Clip(ClipOpts),

    /// Remove stale scratch files left behind by crashed runs
    Clean(CleanOpts),

    /// Show the launch configuration for the given settings
    ShowConfig(ShowConfigOpts),
}

/// Settings shared by every subcommand that builds the app.
#[derive(Args, Debug)]
pub struct AppConfig {
    /// Override the scratch directory
    #[clap(long)]
    pub scratch_root: Option<PathBuf>,

    /// Override the fetch tool executable
    #[clap(long)]
    pub fetch_cmd: Option<PathBuf>,

    /// Override the trim tool executable
    #[clap(long)]
    pub trim_cmd: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClipOpts {
    /// The opaque source video identifier
    pub video_id: String,

    /// Clip start, in seconds (fractions allowed)
    #[clap(long)]
    pub start: f64,

    /// Clip end, in seconds (fractions allowed)
    #[clap(long)]
    pub end: f64,

    /// Destination file; defaults to the generated clip filename
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub app: AppConfig,
}

#[derive(Args, Debug)]
pub struct CleanOpts {
    /// Do not perform deletion
    #[clap(long)]
    pub dry_run: bool,

    /// Only remove files older than this many hours
    #[clap(long, default_value_t = DEFAULT_MAX_AGE_HOURS)]
    pub max_age_hours: u64,

    #[clap(flatten)]
    pub app: AppConfig,
}

#[derive(Args, Debug)]
pub struct ShowConfigOpts {
    #[clap(flatten)]
    pub app: AppConfig,
}
