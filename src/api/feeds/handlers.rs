use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;
use url::Url;

use super::types::{DeleteFeed, FeedList, FeedResponse, Refreshed, Registered, RegisterFeed};
use crate::{
    errors::{AppError, AppResult},
    models::feed::{Feed, NewFeed},
    tasks::feed_monitor::FeedMonitor,
    RqDbPool,
};

fn validate_url(raw: &str) -> Result<(), &'static str> {
    let parsed = Url::parse(raw).map_err(|_| "Invalid feed URL format")?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err("Only http and https feeds are supported"),
    }
}

#[post("")]
pub async fn register_feed(pool: RqDbPool, req: web::Json<RegisterFeed>) -> AppResult<HttpResponse> {
    let url = req.url.trim();
    if let Err(message) = validate_url(url) {
        log::warn!("Rejected feed URL {:?}: {}", url, message);
        return Err(AppError::invalid_input("url", message));
    }
    if req.frequency < 0 {
        return Err(AppError::invalid_input("frequency", "Must not be negative"));
    }

    let mut conn = pool.get()?;
    let feed = NewFeed::new(url, req.frequency).insert(&mut conn)?;
    log::info!("Registered feed {} ({})", feed.id, feed.url);

    Ok(HttpResponse::Ok().json(Registered {
        message: "success",
        feed: feed.into(),
    }))
}

#[get("")]
pub async fn list_feeds(pool: RqDbPool) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let feeds = Feed::get_all(&mut conn)?;

    Ok(HttpResponse::Ok().json(FeedList {
        feeds: feeds.into_iter().map(FeedResponse::from).collect(),
    }))
}

#[delete("")]
pub async fn delete_feed(pool: RqDbPool, req: web::Json<DeleteFeed>) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let deleted = Feed::delete(&mut conn, req.id)?;
    log::info!("Deleted feed {} ({} rows)", req.id, deleted);

    Ok(HttpResponse::Ok().json(json!({ "message": "success" })))
}

/// Runs a forced cycle before answering. The answer is success whatever
/// happened to the individual feeds; the report says what did.
#[put("")]
pub async fn force_refresh(monitor: web::Data<FeedMonitor>) -> HttpResponse {
    let report = monitor.run_forced_cycle().await;
    HttpResponse::Ok().json(Refreshed {
        message: "success",
        report,
    })
}
