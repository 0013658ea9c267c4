use super::{content, feeds};
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/api")
        .service(feeds::routes())
        .service(content::routes())
}
