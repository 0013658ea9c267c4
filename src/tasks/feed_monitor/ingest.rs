use diesel::{Connection, SqliteConnection};
use thiserror::Error;

use super::parser::ParsedItem;
use crate::models::{
    content::NewContent,
    feed::{Feed, FeedId},
};

#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("No database connection available: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Writes every linked item as a content record and stamps the feed as
/// refreshed at `now`, all in one transaction. Items without a link are
/// skipped. On any failure nothing is written and the feed keeps its previous
/// `last_update`. Returns the number of records written.
pub fn ingest(
    conn: &mut SqliteConnection,
    feed_id: FeedId,
    items: &[ParsedItem],
    now: i64,
) -> Result<usize, IngestionError> {
    conn.transaction::<_, IngestionError, _>(|conn| {
        let mut written = 0;
        for item in items {
            if item.link.is_empty() {
                log::warn!("Skipping entry without a link in feed {feed_id}: {:?}", item.title);
                continue;
            }
            log::debug!("Adding content {}", item.link);
            NewContent {
                title: &item.title,
                thumbnail: &item.thumbnail,
                url: &item.link,
            }
            .insert(conn)?;
            written += 1;
        }

        if Feed::mark_refreshed(conn, feed_id, now)? == 0 {
            log::info!("Feed {feed_id} was removed during ingestion");
        }
        Ok(written)
    })
}
