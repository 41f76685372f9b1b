pub mod captions;
pub mod config;
pub mod error;
pub mod feed;
pub mod output;
pub mod playlist;
pub mod process;
pub mod summarize;
pub mod tool;
pub mod transcript;

pub use error::{Error, Result};

/// A successfully fetched transcript with its video title
#[derive(Debug, Clone)]
pub struct TranscriptResult {
    pub transcript: String,
    pub title: String,
}

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();

    // youtu.be/ID
    if let Some(caps) = regex::Regex::new(r"(?:https?://)?(?:www\.)?youtu\.be/([a-zA-Z0-9_-]+)")
        .unwrap()
        .captures(url)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/watch?v=ID
    if let Some(caps) = regex::Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]+)")
        .unwrap()
        .captures(url)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/embed/ID
    if let Some(caps) = regex::Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/embed/([a-zA-Z0-9_-]+)")
        .unwrap()
        .captures(url)
    {
        return Some(caps[1].to_string());
    }

    None
}

/// Extract playlist ID from a playlist URL or a bare `list=` query parameter
pub fn extract_playlist_id(url: &str) -> Option<String> {
    let url = url.trim();

    if let Some(caps) = regex::Regex::new(r"[?&]list=([a-zA-Z0-9_-]+)")
        .unwrap()
        .captures(url)
    {
        return Some(caps[1].to_string());
    }

    if let Some(caps) = regex::Regex::new(r"(?:https?://)?(?:www\.)?youtube\.com/playlist\?list=([a-zA-Z0-9_-]+)")
        .unwrap()
        .captures(url)
    {
        return Some(caps[1].to_string());
    }

    None
}
