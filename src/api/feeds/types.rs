use serde::{Deserialize, Serialize};

use crate::models::feed::{Feed, FeedId};
use crate::tasks::feed_monitor::CycleReport;

#[derive(Debug, Deserialize)]
pub struct RegisterFeed {
    pub url: String,
    /// seconds between refreshes
    pub frequency: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteFeed {
    pub id: FeedId,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub id: FeedId,
    pub url: String,
    pub frequency: i64,
    pub last_update: Option<i64>,
}

impl From<Feed> for FeedResponse {
    fn from(feed: Feed) -> Self {
        FeedResponse {
            id: feed.id,
            url: feed.url,
            frequency: feed.frequency,
            last_update: feed.last_update,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FeedList {
    pub feeds: Vec<FeedResponse>,
}

#[derive(Debug, Serialize)]
pub struct Registered {
    pub message: &'static str,
    pub feed: FeedResponse,
}

#[derive(Debug, Serialize)]
pub struct Refreshed {
    pub message: &'static str,
    pub report: CycleReport,
}
