use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;

use crate::error::{Error, Result};

pub const TOOL_NAME: &str = "yt-dlp";

/// Environment variable naming an explicit yt-dlp executable, taking
/// priority over PATH search and the fixed install locations.
pub const TOOL_PATH_ENV: &str = "YT_DLP_PATH";

const KNOWN_LOCATIONS: &[&str] = &[
    "/opt/homebrew/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/usr/bin/yt-dlp",
];

/// Locates the yt-dlp executable once and hands out the cached path after.
///
/// Construct one per process (or per test) and pass it to the fetch and
/// playlist functions; a stale path after the tool is moved is accepted,
/// a new resolver re-discovers.
pub struct ToolResolver {
    cached: OnceLock<PathBuf>,
}

impl ToolResolver {
    pub fn new() -> Self {
        Self { cached: OnceLock::new() }
    }

    /// Resolver pinned to an explicit executable path, skipping discovery.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let cached = OnceLock::new();
        let _ = cached.set(path.into());
        Self { cached }
    }

    /// Resolve the yt-dlp executable, memoized for this resolver's lifetime.
    pub fn resolve(&self) -> Result<PathBuf> {
        self.resolve_with(discover)
    }

    fn resolve_with(&self, discover: impl FnOnce() -> Result<PathBuf>) -> Result<PathBuf> {
        if let Some(found) = self.cached.get() {
            return Ok(found.clone());
        }
        let found = discover()?;
        debug!("Resolved {TOOL_NAME}: {}", found.display());
        Ok(self.cached.get_or_init(|| found).clone())
    }
}

impl Default for ToolResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Discovery chain: env override, then PATH, then known install locations.
fn discover() -> Result<PathBuf> {
    if let Ok(path) = env::var(TOOL_PATH_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    if let Ok(path) = which::which(TOOL_NAME) {
        return Ok(path);
    }

    first_existing(KNOWN_LOCATIONS.iter().map(Path::new), |p| p.exists()).ok_or(Error::ToolNotFound)
}

/// First candidate the probe confirms, scanned in order.
fn first_existing<'a>(
    candidates: impl IntoIterator<Item = &'a Path>,
    mut probe: impl FnMut(&Path) -> bool,
) -> Option<PathBuf> {
    candidates.into_iter().find(|p| probe(p)).map(Path::to_path_buf)
}
