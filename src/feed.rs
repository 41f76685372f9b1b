use std::path::Path;

use log::debug;
use rusqlite::{Connection, OpenFlags, params};

use crate::error::Result;

/// One saved feed-reader item
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub published_at: i64,
}

/// Unread articles published since the rolling local "today" boundary,
/// newest first.
///
/// The store is NetNewsWire's SQLite database, opened read-only; this crate
/// never writes to it. `utc_offset_hours` shifts the day boundary into the
/// reader's local time.
pub fn recent_articles(db_path: &Path, utc_offset_hours: i64) -> Result<Vec<Article>> {
    let conn = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    query_recent(&conn, utc_offset_hours)
}

fn query_recent(conn: &Connection, utc_offset_hours: i64) -> Result<Vec<Article>> {
    let mut stmt = conn.prepare(
        "SELECT a.title, a.url, a.datePublished
         FROM articles a
         JOIN statuses s ON a.articleID = s.articleID
         WHERE s.read = 0
           AND a.datePublished >= strftime('%s', date('now', ?1, '-1 day'), ?2)
         ORDER BY a.datePublished DESC",
    )?;

    let forward = format!("{utc_offset_hours:+} hours");
    let backward = format!("{:+} hours", -utc_offset_hours);

    let rows = stmt.query_map(params![forward, backward], |row| {
        Ok(Article {
            title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            url: row.get(1)?,
            published_at: row.get(2)?,
        })
    })?;

    let mut articles = Vec::new();
    for row in rows {
        articles.push(row?);
    }

    debug!("Feed query returned {} recent unread articles", articles.len());
    Ok(articles)
}

/// Saved link that points at a YouTube video (Shorts are skipped)
pub fn is_youtube_video(url: &str) -> bool {
    url.contains("youtube.com") && !url.contains("https://www.youtube.com/shorts")
}
