use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::error::Result;

/// Make a video title safe to use as a filename.
///
/// Path-hostile characters become `-`, whitespace runs collapse to single
/// spaces, and the result is trimmed and capped at 255 characters.
pub fn sanitize_filename(name: &str) -> String {
    let hostile = Regex::new(r#"[/\\?%*:|"<>]"#).unwrap();
    let whitespace = Regex::new(r"\s+").unwrap();

    let replaced = hostile.replace_all(name, "-");
    let collapsed = whitespace.replace_all(&replaced, " ");
    collapsed.trim().chars().take(255).collect()
}

pub fn transcript_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}_transcript.txt", sanitize_filename(title)))
}

pub fn summary_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}_summary.txt", sanitize_filename(title)))
}

pub fn write_transcript(dir: &Path, title: &str, text: &str) -> Result<PathBuf> {
    let path = transcript_path(dir, title);
    std::fs::write(&path, text)?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

pub fn write_summary(dir: &Path, title: &str, text: &str) -> Result<PathBuf> {
    let path = summary_path(dir, title);
    std::fs::write(&path, text)?;
    debug!("Wrote {}", path.display());
    Ok(path)
}
