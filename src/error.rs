use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "yt-dlp not found. Install it and make sure it is on PATH, or set YT_DLP_PATH:\n  \
         pip install yt-dlp\n  \
         or: brew install yt-dlp"
    )]
    ToolNotFound,

    #[error("{program} exited with {}: {stderr}", exit_label(.exit_code))]
    CommandFailed {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("no captions available for video {video_id}")]
    NoCaptions { video_id: String },

    #[error("could not extract a video or playlist ID from: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
