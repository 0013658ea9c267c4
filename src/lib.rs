pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod observability;
pub mod schema;
pub mod tasks;
#[cfg(test)]
pub mod test_helpers;

use actix_web::web;

pub use db::DbPool;
pub type RqDbPool = web::Data<DbPool>;
