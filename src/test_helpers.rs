use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::MigrationHarness;
use tempfile::TempDir;

use crate::db::{initialize_db_pool, DbPool, MIGRATIONS};
use crate::models::feed::{Feed, NewFeed};

/// Create a test database with a temporary file
pub fn create_test_db() -> (TempDir, DbPool) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let pool = initialize_db_pool(&db_path.display().to_string(), 2).expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    (temp_dir, pool)
}

/// Create an in-memory test database connection
pub fn get_test_db_connection() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:")
        .unwrap_or_else(|_| panic!("Error connecting to in-memory SQLite database"));

    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    conn
}

pub fn insert_feed(
    conn: &mut SqliteConnection,
    url: &str,
    frequency: i64,
    last_update: Option<i64>,
) -> Feed {
    let new_feed = NewFeed {
        last_update,
        ..NewFeed::new(url, frequency)
    };
    new_feed.insert(conn).expect("Failed to insert feed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::Content;

    #[test]
    fn test_create_test_db() {
        let (_temp_dir, pool) = create_test_db();
        let mut conn = pool.get().expect("Failed to get connection");

        assert!(Feed::get_all(&mut conn).unwrap().is_empty());
        assert_eq!(Content::count(&mut conn), Ok(0));
    }
}
