use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::Command;

use eyre::{Result, bail};
use log::error;

mod cli;

use cli::Cli;

use ytscript::config::Config;
use ytscript::tool::ToolResolver;
use ytscript::{feed, output, playlist, summarize, transcript};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytscript.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    log::info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytscript")
        .join("logs")
}

fn tool_version(name: &str) -> Option<String> {
    Command::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

fn build_after_help() -> String {
    let yt_dlp = tool_version("yt-dlp");

    let yt_dlp_line = match &yt_dlp {
        Some(v) => format!("  \x1b[32m✅\x1b[0m yt-dlp     {v}"),
        None => "  \x1b[31m❌\x1b[0m yt-dlp     (not found — set YT_DLP_PATH or install it)".to_string(),
    };

    let log_path = log_dir().join("ytscript.log");

    format!(
        "\nREQUIRED TOOLS:\n{yt_dlp_line}\n\nLogs are written to: {}",
        log_path.display()
    )
}

/// Short user-facing classification for a failed run
fn classify(err: &eyre::Report) -> &'static str {
    match err.downcast_ref::<ytscript::Error>() {
        Some(ytscript::Error::ToolNotFound) => "yt-dlp not found",
        _ => "Failed to fetch transcript",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    if let Err(e) = run(&cli, &config).await {
        error!("{e:?}");
        eprintln!("{}", classify(&e));
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let lang = cli
        .lang
        .clone()
        .or_else(|| config.default_lang.clone())
        .unwrap_or_else(|| "en".to_string());

    let output_dir = cli.output_dir.clone().unwrap_or_else(|| config.output_dir());
    std::fs::create_dir_all(&output_dir)?;

    let resolver = match &config.tool_path {
        Some(path) => ToolResolver::with_path(path),
        None => ToolResolver::new(),
    };

    // Collect URLs: feed sweep, positional arg, or stdin
    let urls: Vec<String> = if cli.daily {
        feed::recent_articles(&config.feed_db(), config.utc_offset_hours())?
            .into_iter()
            .map(|a| a.url)
            .filter(|url| feed::is_youtube_video(url))
            .collect()
    } else if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        if cli.daily {
            eprintln!("No unread YouTube links saved today");
            return Ok(());
        }
        bail!("no URL provided\n\nUsage: ytscript <URL>\n       echo <URL> | ytscript\n       ytscript --daily");
    }

    for url in &urls {
        let url = url.trim();
        if url.is_empty() {
            continue;
        }

        if ytscript::extract_playlist_id(url).is_some() {
            handle_playlist(&resolver, cli, config, url, &lang, &output_dir).await?;
        } else {
            handle_video(&resolver, cli, config, url, &lang, &output_dir).await?;
        }
    }

    Ok(())
}

async fn handle_video(
    resolver: &ToolResolver,
    cli: &Cli,
    config: &Config,
    url: &str,
    lang: &str,
    output_dir: &Path,
) -> Result<()> {
    let video_id = ytscript::extract_video_id(url).ok_or_else(|| ytscript::Error::InvalidUrl(url.to_string()))?;

    let result = transcript::video_transcript(resolver, &video_id, lang).await?;

    if cli.verbose {
        eprintln!(
            "Video: {} ({})\nLanguage: {}\nTranscript: {} chars",
            result.title,
            video_id,
            lang,
            result.transcript.len(),
        );
    }

    let path = output::write_transcript(output_dir, &result.title, &result.transcript)?;
    println!("{}", path.display());

    if cli.summarize {
        let summary =
            summarize::summarize_transcript(config.summarize_tool(), config.summarize_model(), &result.transcript)
                .await?;
        let path = output::write_summary(output_dir, &result.title, &summary)?;
        println!("{}", path.display());
    }

    Ok(())
}

async fn handle_playlist(
    resolver: &ToolResolver,
    cli: &Cli,
    config: &Config,
    url: &str,
    lang: &str,
    output_dir: &Path,
) -> Result<()> {
    let outcomes = playlist::playlist_transcripts(resolver, url, lang, |current, total, title| {
        eprintln!("[{current}/{total}] {title}");
    })
    .await?;

    let total = outcomes.len();
    let videos = playlist::completed(outcomes);
    eprintln!("Transcribed {}/{} videos", videos.len(), total);

    for video in videos {
        let path = output::write_transcript(output_dir, &video.title, &video.transcript)?;
        println!("{}", path.display());

        if cli.summarize {
            let summary =
                summarize::summarize_transcript(config.summarize_tool(), config.summarize_model(), &video.transcript)
                    .await?;
            let path = output::write_summary(output_dir, &video.title, &summary)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
