use std::future::Future;

use log::{info, warn};
use serde::Deserialize;

use crate::TranscriptResult;
use crate::error::Result;
use crate::process;
use crate::tool::ToolResolver;
use crate::transcript::{self, FetchedTranscript};

/// One entry of a flattened playlist listing, in source order
#[derive(Debug, Clone)]
pub struct PlaylistEntry {
    pub video_id: String,
    pub title: String,
    /// 1-based position within the playlist
    pub index: usize,
}

/// Per-video outcome of a playlist batch.
///
/// `error` is set when that video's fetch failed; a missing caption track is
/// not an error and shows up as `transcript: None` with `error: None`.
#[derive(Debug, Clone)]
pub struct TranscriptOutcome {
    pub video_id: String,
    pub title: String,
    pub transcript: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlatPlaylist {
    #[serde(default)]
    entries: Vec<FlatEntry>,
}

#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: Option<String>,
    title: Option<String>,
}

/// Enumerate a playlist without downloading anything.
///
/// `--flat-playlist -J` returns per-entry metadata only; entries come back
/// in the playlist's natural order.
pub async fn playlist_videos(resolver: &ToolResolver, playlist_url: &str) -> Result<Vec<PlaylistEntry>> {
    let tool = resolver.resolve()?;
    let out = process::run(&tool, &["--flat-playlist", "-J", playlist_url]).await?;
    parse_entries(&out.stdout)
}

fn parse_entries(json: &str) -> Result<Vec<PlaylistEntry>> {
    let listing: FlatPlaylist = serde_json::from_str(json)?;

    Ok(listing
        .entries
        .into_iter()
        .filter_map(|e| e.id.map(|id| (id, e.title)))
        .enumerate()
        .map(|(i, (video_id, title))| {
            let index = i + 1;
            PlaylistEntry {
                video_id,
                title: title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Video {index}")),
                index,
            }
        })
        .collect())
}

/// Fetch transcripts for every video in a playlist, strictly sequentially.
///
/// One bad video never aborts the batch: its failure is downgraded to the
/// outcome's `error` field and iteration continues. `on_progress` is called
/// with `(current, total, title)` before each video's fetch.
pub async fn playlist_transcripts<P>(
    resolver: &ToolResolver,
    playlist_url: &str,
    lang: &str,
    on_progress: P,
) -> Result<Vec<TranscriptOutcome>>
where
    P: FnMut(usize, usize, &str),
{
    info!("Listing playlist {playlist_url}");
    let videos = playlist_videos(resolver, playlist_url).await?;
    info!("Found {} videos", videos.len());

    Ok(run_batch(
        videos,
        |entry: &PlaylistEntry| {
            let url = transcript::watch_url(&entry.video_id);
            async move { transcript::fetch_transcript(resolver, &url, lang).await }
        },
        on_progress,
    )
    .await)
}

/// Drive the per-video unit of work over every entry, isolating failures.
///
/// The fetch function is a parameter so the isolation contract holds for any
/// per-item worker (and is testable without a live tool).
async fn run_batch<F, Fut, P>(entries: Vec<PlaylistEntry>, mut fetch: F, mut on_progress: P) -> Vec<TranscriptOutcome>
where
    F: FnMut(&PlaylistEntry) -> Fut,
    Fut: Future<Output = Result<FetchedTranscript>>,
    P: FnMut(usize, usize, &str),
{
    let total = entries.len();
    let mut results = Vec::with_capacity(total);

    for entry in &entries {
        on_progress(entry.index, total, &entry.title);
        info!("[{}/{}] {}", entry.index, total, entry.title);

        match fetch(entry).await {
            Ok(fetched) => {
                let title = if fetched.title.is_empty() {
                    entry.title.clone()
                } else {
                    fetched.title
                };
                results.push(TranscriptOutcome {
                    video_id: entry.video_id.clone(),
                    title,
                    transcript: fetched.transcript,
                    error: None,
                });
            }
            Err(e) => {
                warn!("\"{}\" failed: {e}", entry.title);
                results.push(TranscriptOutcome {
                    video_id: entry.video_id.clone(),
                    title: entry.title.clone(),
                    transcript: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let succeeded = results.iter().filter(|r| r.transcript.is_some()).count();
    info!("Done: {succeeded}/{total} videos transcribed");

    results
}

/// Keep only the outcomes that actually produced a transcript.
pub fn completed(outcomes: Vec<TranscriptOutcome>) -> Vec<TranscriptResult> {
    outcomes
        .into_iter()
        .filter_map(|o| {
            let TranscriptOutcome { title, transcript, .. } = o;
            transcript.map(|transcript| TranscriptResult { transcript, title })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn entry(video_id: &str, title: &str, index: usize) -> PlaylistEntry {
        PlaylistEntry {
            video_id: video_id.to_string(),
            title: title.to_string(),
            index,
        }
    }

    #[test]
    fn test_parse_entries() {
        let json = r#"{
            "id": "PLabc",
            "title": "My Playlist",
            "entries": [
                {"id": "vid1", "title": "First"},
                {"id": "vid2", "title": "Second"}
            ]
        }"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].video_id, "vid1");
        assert_eq!(entries[0].title, "First");
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[1].index, 2);
    }

    #[test]
    fn test_parse_entries_title_fallback() {
        let json = r#"{"entries": [{"id": "vid1"}, {"id": "vid2", "title": ""}]}"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries[0].title, "Video 1");
        assert_eq!(entries[1].title, "Video 2");
    }

    #[test]
    fn test_parse_entries_skips_idless_keeping_dense_indexes() {
        let json = r#"{"entries": [{"id": "vid1", "title": "A"}, {"title": "gone"}, {"id": "vid3", "title": "C"}]}"#;
        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].video_id, "vid3");
        assert_eq!(entries[1].index, 2);
    }

    #[test]
    fn test_parse_entries_no_entries_field() {
        let entries = parse_entries(r#"{"id": "PLabc"}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_entries_invalid_json() {
        assert!(parse_entries("playlist does not exist").is_err());
    }

    #[tokio::test]
    async fn test_run_batch_isolates_failures() {
        let entries = vec![entry("a", "First", 1), entry("b", "Second", 2), entry("c", "Third", 3)];

        let outcomes = run_batch(
            entries,
            |e: &PlaylistEntry| {
                let fail = e.index == 2;
                let title = e.title.clone();
                async move {
                    if fail {
                        Err(Error::CommandFailed {
                            program: "yt-dlp".to_string(),
                            exit_code: Some(1),
                            stderr: "boom".to_string(),
                        })
                    } else {
                        Ok(FetchedTranscript {
                            transcript: Some(format!("words of {title}")),
                            title,
                        })
                    }
                }
            },
            |_, _, _| {},
        )
        .await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].transcript.is_some());
        assert!(outcomes[0].error.is_none());
        assert!(outcomes[1].transcript.is_none());
        assert!(outcomes[1].error.as_deref().unwrap().contains("boom"));
        assert!(outcomes[2].transcript.is_some());
    }

    #[tokio::test]
    async fn test_run_batch_progress_before_each_fetch() {
        let entries = vec![entry("a", "First", 1), entry("b", "Second", 2)];
        let mut seen = Vec::new();

        run_batch(
            entries,
            |e: &PlaylistEntry| {
                let title = e.title.clone();
                async move {
                    Ok(FetchedTranscript {
                        transcript: None,
                        title,
                    })
                }
            },
            |current, total, title| seen.push((current, total, title.to_string())),
        )
        .await;

        assert_eq!(seen, vec![(1, 2, "First".to_string()), (2, 2, "Second".to_string())]);
    }

    #[tokio::test]
    async fn test_run_batch_no_captions_is_not_an_error() {
        let entries = vec![entry("a", "Silent", 1)];

        let outcomes = run_batch(
            entries,
            |e: &PlaylistEntry| {
                let title = e.title.clone();
                async move {
                    Ok(FetchedTranscript {
                        transcript: None,
                        title,
                    })
                }
            },
            |_, _, _| {},
        )
        .await;

        assert!(outcomes[0].transcript.is_none());
        assert!(outcomes[0].error.is_none());
    }

    #[test]
    fn test_completed_filters_to_transcribed() {
        let outcomes = vec![
            TranscriptOutcome {
                video_id: "a".to_string(),
                title: "Kept".to_string(),
                transcript: Some("text".to_string()),
                error: None,
            },
            TranscriptOutcome {
                video_id: "b".to_string(),
                title: "Dropped".to_string(),
                transcript: None,
                error: Some("failed".to_string()),
            },
        ];

        let kept = completed(outcomes);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Kept");
        assert_eq!(kept[0].transcript, "text");
    }
}
