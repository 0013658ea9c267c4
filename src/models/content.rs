use crate::schema::*;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One syndicated item extracted from a feed. Rows are append-only and carry
/// no reference back to the feed they came from.
#[derive(Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = content)]
pub struct Content {
    #[serde(skip)]
    pub id: i32,
    pub title: String,
    pub thumbnail: String,
    pub url: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Insertable)]
#[diesel(table_name = content)]
pub struct NewContent<'a> {
    pub title: &'a str,
    pub thumbnail: &'a str,
    pub url: &'a str,
}

impl<'a> NewContent<'a> {
    pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<usize> {
        use crate::schema::content::dsl::content;
        diesel::insert_into(content).values(self).execute(conn)
    }
}

impl Content {
    pub fn get_all(conn: &mut SqliteConnection) -> QueryResult<Vec<Content>> {
        use crate::schema::content::dsl::{content, id};
        content.order(id.asc()).load::<Content>(conn)
    }

    pub fn count(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::content::dsl::content;
        content.count().get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::get_test_db_connection;

    fn insert_items(conn: &mut SqliteConnection, num_items: i32) {
        for i in 0..num_items {
            let item = NewContent {
                title: &format!("test_title_{i}"),
                url: &format!("http://test.com/{i}"),
                ..Default::default()
            };
            assert_eq!(item.insert(conn), Ok(1));
        }
    }

    #[test]
    fn test_insert_content() {
        let mut conn = get_test_db_connection();
        insert_items(&mut conn, 1);

        let items = Content::get_all(&mut conn).unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title, "test_title_0");
        assert_eq!(item.url, "http://test.com/0");
        assert_eq!(item.thumbnail, "");
    }

    #[test]
    fn test_empty_link_rejected() {
        let mut conn = get_test_db_connection();
        let item = NewContent {
            title: "no link",
            ..Default::default()
        };
        assert!(item.insert(&mut conn).is_err());
        assert_eq!(Content::count(&mut conn), Ok(0));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut conn = get_test_db_connection();
        insert_items(&mut conn, 2);
        insert_items(&mut conn, 2);

        let items = Content::get_all(&mut conn).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].url, items[2].url);
    }
}
