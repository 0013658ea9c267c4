pub mod content;
pub mod feed;
