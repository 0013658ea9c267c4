use feed_rs::model::Entry;
use thiserror::Error;

/// A feed entry reduced to the fields a content record keeps. Missing fields
/// are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedItem {
    pub title: String,
    pub link: String,
    pub thumbnail: String,
}

#[derive(Debug, Error)]
#[error("Unable to parse feed document: {0}")]
pub struct ParseError(#[from] feed_rs::parser::ParseFeedError);

impl From<Entry> for ParsedItem {
    fn from(entry: Entry) -> Self {
        let thumbnail = entry
            .media
            .iter()
            .flat_map(|m| m.thumbnails.iter())
            .map(|t| t.image.uri.clone())
            .next()
            .unwrap_or_default();

        ParsedItem {
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            link: entry
                .links
                .into_iter()
                .next()
                .map(|l| l.href)
                .unwrap_or_default(),
            thumbnail,
        }
    }
}

pub fn try_parse(raw: &[u8]) -> Result<Vec<ParsedItem>, ParseError> {
    let parsed = feed_rs::parser::parse(raw)?;
    Ok(parsed.entries.into_iter().map(ParsedItem::from).collect())
}

/// Best effort: a document that cannot be parsed yields no items.
pub fn parse(raw: &[u8]) -> Vec<ParsedItem> {
    match try_parse(raw) {
        Ok(items) => items,
        Err(e) => {
            log::warn!("{e}, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOM_THREE_ENTRIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <title>Recipes</title>
  <id>urn:feed:recipes</id>
  <updated>2024-03-02T10:00:00Z</updated>
  <entry>
    <id>urn:recipe:1</id>
    <title>Lentil soup</title>
    <updated>2024-03-01T10:00:00Z</updated>
    <link rel="alternate" href="https://recipes.test/lentil-soup"/>
    <media:group>
      <media:title>Lentil soup</media:title>
      <media:thumbnail url="https://img.recipes.test/lentil.jpg" width="480" height="360"/>
    </media:group>
  </entry>
  <entry>
    <id>urn:recipe:2</id>
    <title>Focaccia</title>
    <updated>2024-03-01T11:00:00Z</updated>
    <link rel="alternate" href="https://recipes.test/focaccia"/>
    <media:group>
      <media:title>Focaccia</media:title>
      <media:thumbnail url="https://img.recipes.test/focaccia.jpg" width="480" height="360"/>
    </media:group>
  </entry>
  <entry>
    <id>urn:recipe:3</id>
    <title>Shakshuka</title>
    <updated>2024-03-01T12:00:00Z</updated>
    <link rel="alternate" href="https://recipes.test/shakshuka"/>
    <media:group>
      <media:title>Shakshuka</media:title>
      <media:thumbnail url="https://img.recipes.test/shakshuka.jpg" width="480" height="360"/>
    </media:group>
  </entry>
</feed>"#;

    #[test]
    fn test_parses_three_entries() {
        let items = parse(ATOM_THREE_ENTRIES.as_bytes());
        assert_eq!(
            items,
            vec![
                ParsedItem {
                    title: "Lentil soup".to_string(),
                    link: "https://recipes.test/lentil-soup".to_string(),
                    thumbnail: "https://img.recipes.test/lentil.jpg".to_string(),
                },
                ParsedItem {
                    title: "Focaccia".to_string(),
                    link: "https://recipes.test/focaccia".to_string(),
                    thumbnail: "https://img.recipes.test/focaccia.jpg".to_string(),
                },
                ParsedItem {
                    title: "Shakshuka".to_string(),
                    link: "https://recipes.test/shakshuka".to_string(),
                    thumbnail: "https://img.recipes.test/shakshuka.jpg".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Sparse</title>
  <id>urn:feed:sparse</id>
  <updated>2024-03-02T10:00:00Z</updated>
  <entry>
    <id>urn:entry:1</id>
    <updated>2024-03-01T10:00:00Z</updated>
    <link href="https://sparse.test/1"/>
  </entry>
</feed>"#;
        let items = parse(doc.as_bytes());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "");
        assert_eq!(items[0].link, "https://sparse.test/1");
        assert_eq!(items[0].thumbnail, "");
    }

    #[test]
    fn test_rss_items_are_parsed() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Blog</title>
    <link>https://blog.test</link>
    <description>Posts</description>
    <item>
      <title>First post</title>
      <link>https://blog.test/first</link>
    </item>
    <item>
      <title>Second post</title>
      <link>https://blog.test/second</link>
    </item>
  </channel>
</rss>"#;
        let items = parse(doc.as_bytes());
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "Second post");
        assert_eq!(items[1].link, "https://blog.test/second");
    }

    #[test]
    fn test_no_entries_yields_empty() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Empty</title>
  <id>urn:feed:empty</id>
  <updated>2024-03-02T10:00:00Z</updated>
</feed>"#;
        assert!(parse(doc.as_bytes()).is_empty());
    }

    #[test]
    fn test_malformed_input_yields_empty() {
        assert!(parse(b"this is not a feed").is_empty());
        assert!(parse(b"").is_empty());
        assert!(try_parse(b"this is not a feed").is_err());
    }
}
