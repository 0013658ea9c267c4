pub mod fetcher;
pub mod ingest;
pub mod parser;
pub mod runner;
pub mod types;

pub use runner::{start, FeedMonitor};
pub use types::CycleReport;
