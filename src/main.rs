use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use dotenvy::dotenv;
use std::io;

use feedmill::{
    api,
    config::AppConfig,
    db::{initialize_db_pool, run_migrations, DbPool},
    observability,
    tasks::feed_monitor::{self, fetcher::Fetcher, FeedMonitor},
};

/// CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Refresh every registered feed once, then exit without serving
    #[clap(long)]
    refresh_once: bool,

    /// Port to listen on (overrides FM_PORT)
    #[clap(long)]
    port: Option<u16>,
}

fn main() -> io::Result<()> {
    dotenv().ok();
    observability::init_logging();
    let args = Args::parse();

    let mut config = AppConfig::from_env().map_err(|e| fatal("Invalid configuration", e))?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let db_pool = initialize_db_pool(&config.db_path, config.db_pool_size)
        .map_err(|e| fatal("Failed to open database", e))?;
    tracing::info!("Running database migrations");
    run_migrations(&db_pool).map_err(|e| fatal("Failed to run migrations", e))?;

    let fetcher =
        Fetcher::new(config.fetch_timeout).map_err(|e| fatal("Failed to build HTTP client", e))?;
    let monitor = FeedMonitor::new(db_pool.clone(), fetcher);

    if args.refresh_once {
        return refresh_once(monitor);
    }

    run_server(config, db_pool, monitor)
}

fn fatal<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    tracing::error!(error = %err, "{}", context);
    io::Error::other(format!("{context}: {err}"))
}

#[actix_web::main]
async fn refresh_once(monitor: FeedMonitor) -> io::Result<()> {
    let report = monitor.run_forced_cycle().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(io::Error::other)?
    );
    Ok(())
}

#[actix_web::main]
async fn run_server(config: AppConfig, db_pool: DbPool, monitor: FeedMonitor) -> io::Result<()> {
    tracing::info!(
        "Starting server at http://{}:{}, refreshing every {}s",
        config.host,
        config.port,
        config.refresh_interval.as_secs()
    );

    tokio::spawn(feed_monitor::start(monitor.clone(), config.refresh_interval));

    let monitor = web::Data::new(monitor);
    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(monitor.clone())
            .service(api::health::routes())
            .service(api::routes::routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
