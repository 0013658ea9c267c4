pub mod feed_monitor;
pub mod types;
