pub mod content;
pub mod feeds;
pub mod health;
pub mod routes;
