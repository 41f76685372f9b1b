use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytscript",
    about = "Fetch plain-text YouTube transcripts via yt-dlp",
    version,
)]
pub struct Cli {
    /// YouTube video or playlist URL (reads from stdin if omitted)
    pub url: Option<String>,

    /// Sweep the feed reader for today's unread YouTube links
    #[arg(long)]
    pub daily: bool,

    /// Preferred caption language (config default_lang, then "en")
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Summarize each transcript via the external summarizer CLI
    #[arg(short, long)]
    pub summarize: bool,

    /// Directory for transcript and summary files (defaults to ~/Downloads)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Show per-video progress and metadata
    #[arg(short, long)]
    pub verbose: bool,
}
