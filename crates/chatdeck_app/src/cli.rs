use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "chatdeck",
    about = "Browser dashboard that polls a live video's chat and exports it as CSV",
    version
)]
pub struct Cli {
    /// RON config file; missing file means defaults.
    #[arg(long, default_value = "chatdeck.ron")]
    pub config: PathBuf,

    /// Address the dashboard listens on, e.g. 127.0.0.1:8501.
    #[arg(long)]
    pub bind: Option<String>,

    /// Base URL of the chat bridge service.
    #[arg(long, conflicts_with = "replay_dir")]
    pub feed_url: Option<String>,

    /// Replay recorded `<video_id>.jsonl` files from this directory instead of a live feed.
    #[arg(long)]
    pub replay_dir: Option<PathBuf>,

    /// Pause between two chat fetches, in milliseconds.
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}
