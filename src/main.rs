use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use std::sync::Arc;
use tracing::{info, error};
use tripstyle::config::Settings;
use tripstyle::core::Matcher;
use tripstyle::routes::{self, styles::AppState};
use tripstyle::services::{builtin_catalog, load_catalog, MatchCache, StyleEngine};

fn init_logging(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    // LOG_LEVEL / LOG_FORMAT still win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());
    init_logging(&log_level, &log_format);

    info!("Starting tripstyle matching service...");

    // A bad catalog must stop the service before it serves anything
    let catalog = match &settings.catalog.path {
        Some(path) => {
            info!("Loading catalog from {}", path);
            load_catalog(path)
        }
        None => {
            info!("Loading built-in catalog");
            builtin_catalog()
        }
    }
    .map_err(|e| {
        error!("Failed to load catalog: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
    })?;

    let weights = settings.matching.weights();
    let matcher = Matcher::new(weights);
    info!("Matcher initialized with weights: {:?}", weights);

    let mut engine = StyleEngine::new(Arc::new(catalog), matcher);
    if settings.cache.enabled {
        engine = engine.with_cache(Arc::new(MatchCache::new(
            settings.cache.max_entries,
            settings.cache.ttl_secs,
        )));
        info!(
            "Match cache initialized ({} entries, TTL: {}s)",
            settings.cache.max_entries, settings.cache.ttl_secs
        );
    }

    let app_state = AppState { engine };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
