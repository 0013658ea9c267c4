use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/feeds")
        .service(handlers::list_feeds)
        .service(handlers::register_feed)
        .service(handlers::delete_feed)
        .service(handlers::force_refresh)
}
