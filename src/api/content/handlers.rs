use actix_web::{get, HttpResponse};
use serde::Serialize;

use crate::{errors::AppResult, models::content::Content, RqDbPool};

#[derive(Debug, Serialize)]
pub struct ContentList {
    pub content: Vec<Content>,
}

#[get("")]
pub async fn list_content(pool: RqDbPool) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let content = Content::get_all(&mut conn)?;
    Ok(HttpResponse::Ok().json(ContentList { content }))
}
