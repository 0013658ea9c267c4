use std::time::Duration;

pub const CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Some hosts refuse clients that do not look like a browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/70.0.3538.110 Safari/537.36";

pub const FEED_ACCEPT: &str = "application/rss+xml, application/rdf+xml, application/atom+xml, application/feed+json, application/xml;q=0.9, text/xml;q=0.8";
