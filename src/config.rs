use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::summarize;

const NETNEWSWIRE_DB: &str =
    "Library/Containers/com.ranchero.NetNewsWire-Evergreen/Data/Library/Application Support/NetNewsWire/Accounts/2_iCloud/DB.sqlite3";

/// Offset applied to the feed query's day boundary when none is configured
const DEFAULT_UTC_OFFSET_HOURS: i64 = 9;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_lang: Option<String>,
    pub tool_path: Option<PathBuf>,
    pub feed_db: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub summarize_tool: Option<String>,
    pub summarize_model: Option<String>,
    pub utc_offset_hours: Option<i64>,
}

impl Config {
    /// Load config from ~/.config/ytscript/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn feed_db(&self) -> PathBuf {
        self.feed_db.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(NETNEWSWIRE_DB)
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
        })
    }

    pub fn utc_offset_hours(&self) -> i64 {
        self.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS)
    }

    pub fn summarize_tool(&self) -> &str {
        self.summarize_tool.as_deref().unwrap_or(summarize::DEFAULT_TOOL)
    }

    pub fn summarize_model(&self) -> &str {
        self.summarize_model.as_deref().unwrap_or(summarize::DEFAULT_MODEL)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytscript")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
default_lang = "es"
tool_path = "/opt/homebrew/bin/yt-dlp"
output_dir = "/tmp/transcripts"
summarize_tool = "gemini"
summarize_model = "gemini-2.5-pro"
utc_offset_hours = 2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("es"));
        assert_eq!(config.tool_path, Some(PathBuf::from("/opt/homebrew/bin/yt-dlp")));
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/transcripts"));
        assert_eq!(config.utc_offset_hours(), 2);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.default_lang.is_none());
        assert!(config.tool_path.is_none());
        assert_eq!(config.utc_offset_hours(), DEFAULT_UTC_OFFSET_HOURS);
        assert_eq!(config.summarize_tool(), summarize::DEFAULT_TOOL);
        assert_eq!(config.summarize_model(), summarize::DEFAULT_MODEL);
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(r#"default_lang = "fr""#).unwrap();
        assert_eq!(config.default_lang.as_deref(), Some("fr"));
        assert!(config.summarize_model.is_none());
    }

    #[test]
    fn test_feed_db_default_points_at_netnewswire() {
        let config = Config::default();
        assert!(config.feed_db().ends_with("DB.sqlite3"));
    }
}
