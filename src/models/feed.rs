use crate::schema::*;
use diesel::{
    deserialize::{self, FromSql},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
    backend::Backend,
    sqlite::Sqlite,
    AsExpression, FromSqlRow,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque feed identity, stored as the hyphenated UUID string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct FeedId(pub Uuid);

impl FeedId {
    pub fn new() -> Self {
        FeedId(Uuid::new_v4())
    }
}

impl Default for FeedId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromSql<Text, Sqlite> for FeedId {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let raw = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(FeedId(Uuid::parse_str(&raw)?))
    }
}

impl ToSql<Text, Sqlite> for FeedId {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.0.to_string());
        Ok(IsNull::No)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = feeds)]
pub struct Feed {
    pub id: FeedId,
    pub url: String,
    /// seconds between refreshes
    pub frequency: i64,
    /// unix seconds, none if never refreshed
    pub last_update: Option<i64>,
    pub created_at: i64,
}

/// The slice of a feed the ingestion pipeline needs.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = feeds)]
pub struct DueFeed {
    pub id: FeedId,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = feeds)]
pub struct NewFeed<'a> {
    pub id: FeedId,
    pub url: &'a str,
    pub frequency: i64,
    pub last_update: Option<i64>,
    pub created_at: i64,
}

impl<'a> NewFeed<'a> {
    pub fn new(url: &'a str, frequency: i64) -> Self {
        NewFeed {
            id: FeedId::new(),
            url,
            frequency,
            last_update: None,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<Feed> {
        use crate::schema::feeds::dsl::*;
        diesel::insert_into(feeds)
            .values(self)
            .returning(Feed::as_returning())
            .get_result(conn)
            .inspect_err(|e| log::warn!("Error inserting feed: {e:?}"))
    }
}

impl Feed {
    pub fn get_by_id(conn: &mut SqliteConnection, feed_id: FeedId) -> Option<Feed> {
        use crate::schema::feeds::dsl::feeds;
        match feeds.find(feed_id).first::<Feed>(conn) {
            Ok(feed) => Some(feed),
            Err(e) => {
                log::info!("Requested feed {feed_id} not found: {e:?}");
                None
            }
        }
    }

    pub fn get_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Feed>> {
        use crate::schema::feeds::dsl::{created_at, feeds};
        feeds.order(created_at.asc()).load::<Feed>(conn)
    }

    /// Feeds whose last refresh is older than their frequency, plus any feed
    /// never refreshed. With `force` every registered feed is returned.
    pub fn select_due(
        conn: &mut SqliteConnection,
        force: bool,
        now: i64,
    ) -> QueryResult<Vec<DueFeed>> {
        use crate::schema::feeds::dsl::{created_at, feeds, frequency, last_update};

        let mut query = feeds
            .select(DueFeed::as_select())
            .order(created_at.asc())
            .into_boxed();
        if !force {
            query = query.filter(
                last_update
                    .is_null()
                    .or((last_update + frequency.nullable()).lt(now)),
            );
        }
        query.load::<DueFeed>(conn)
    }

    /// Returns the number of rows touched; zero when the feed was deleted
    /// while its ingestion was running.
    pub fn mark_refreshed(
        conn: &mut SqliteConnection,
        feed_id: FeedId,
        now: i64,
    ) -> QueryResult<usize> {
        use crate::schema::feeds::dsl::{feeds, id, last_update};
        diesel::update(feeds.filter(id.eq(feed_id)))
            .set(last_update.eq(Some(now)))
            .execute(conn)
    }

    pub fn delete(conn: &mut SqliteConnection, feed_id: FeedId) -> QueryResult<usize> {
        use crate::schema::feeds::dsl::{feeds, id};
        diesel::delete(feeds.filter(id.eq(feed_id))).execute(conn)
    }
}
