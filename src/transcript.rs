use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::TranscriptResult;
use crate::captions;
use crate::error::{Error, Result};
use crate::process;
use crate::tool::ToolResolver;

/// Result of one caption fetch.
///
/// `transcript` is `None` when the video simply has no caption track — a
/// normal negative, distinct from a failed attempt (which returns `Err`).
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    pub transcript: Option<String>,
    pub title: String,
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

static FETCH_SEQ: AtomicU64 = AtomicU64::new(0);

/// Temp base unique per call; yt-dlp appends `.{lang}.vtt` to it.
fn unique_temp_base() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let seq = FETCH_SEQ.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("temp_transcript_{nanos}_{seq}"))
}

fn caption_file(base: &Path, lang: &str) -> PathBuf {
    PathBuf::from(format!("{}.{lang}.vtt", base.display()))
}

/// Removes the downloaded caption file when the fetch scope ends, on every
/// exit path. Removal failure is swallowed.
struct TempCaptionFile {
    path: PathBuf,
}

impl Drop for TempCaptionFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!("Leaving {}: {e}", self.path.display());
        }
    }
}

/// Fetch a video's auto-generated captions as normalized plain text.
///
/// Title retrieval failure and tool failures propagate; "no captions" comes
/// back as a `None` transcript.
pub async fn fetch_transcript(resolver: &ToolResolver, video_url: &str, lang: &str) -> Result<FetchedTranscript> {
    let tool = resolver.resolve()?;

    let title_out = process::run(&tool, &["--get-title", video_url]).await?;
    let title = title_out.stdout.trim().to_string();

    let base = unique_temp_base();
    let vtt_path = caption_file(&base, lang);
    let _cleanup = TempCaptionFile { path: vtt_path.clone() };

    let base_arg = base.to_string_lossy();
    let subs_out = process::run(
        &tool,
        &[
            "--write-auto-subs",
            "--skip-download",
            "--sub-lang",
            lang,
            "--output",
            &base_arg,
            video_url,
        ],
    )
    .await?;

    // Wording matches what yt-dlp prints; the file check below backstops it.
    if subs_out.stdout.contains("No captions found") || subs_out.stdout.contains("no subtitles") {
        return Ok(FetchedTranscript { transcript: None, title });
    }

    if !vtt_path.exists() {
        debug!("No caption file at {}", vtt_path.display());
        return Ok(FetchedTranscript { transcript: None, title });
    }

    let raw = tokio::fs::read_to_string(&vtt_path).await?;
    let transcript = captions::normalize(&raw);

    if transcript.is_empty() {
        return Ok(FetchedTranscript { transcript: None, title });
    }

    Ok(FetchedTranscript {
        transcript: Some(transcript),
        title,
    })
}

/// Fetch by video ID, treating a missing caption track as a hard error.
///
/// Callers that want the softer semantics use [`fetch_transcript`] directly.
pub async fn video_transcript(resolver: &ToolResolver, video_id: &str, lang: &str) -> Result<TranscriptResult> {
    let url = watch_url(video_id);
    let fetched = fetch_transcript(resolver, &url, lang).await?;

    let title = if fetched.title.is_empty() {
        format!("YouTube Video {video_id}")
    } else {
        fetched.title
    };

    match fetched.transcript {
        Some(transcript) => Ok(TranscriptResult { transcript, title }),
        None => Err(Error::NoCaptions {
            video_id: video_id.to_string(),
        }),
    }
}
