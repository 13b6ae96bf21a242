use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use skillswap_match::config::{LogFormat, LoggingSettings, Settings, StoreSettings};
use skillswap_match::core::Matcher;
use skillswap_match::routes::{self, AppState};
use skillswap_match::services::{InMemoryProfileRepository, ProfileSource, ProfileStoreClient, SnapshotCache};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format() {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Text => subscriber.init(),
    }
}

fn build_store_source(store: StoreSettings, ttl_secs: u64) -> std::io::Result<ProfileSource> {
    let page_size = store.page_size.unwrap_or(500);
    let client = ProfileStoreClient::new(
        store.endpoint,
        store.api_key,
        store.project_id,
        store.database_id,
        store.collection,
        page_size,
    )
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    info!("Profile store client initialized (page size: {}, TTL: {}s)", page_size, ttl_secs);

    Ok(ProfileSource::Remote {
        store: client,
        cache: SnapshotCache::new(ttl_secs),
    })
}

fn build_profile_source(settings: &Settings) -> std::io::Result<ProfileSource> {
    if let Some(store) = settings.profiles.store.clone() {
        return build_store_source(store, settings.cache.ttl_secs.unwrap_or(300));
    }

    let seed_path = settings
        .profiles
        .seed_path
        .clone()
        .unwrap_or_else(|| "data/profiles.json".to_string());

    let repository = InMemoryProfileRepository::from_json_file(&seed_path).map_err(|e| {
        error!("Failed to load profile seed file {}: {}", seed_path, e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    info!("Loaded {} profiles from {}", repository.len(), seed_path);

    Ok(ProfileSource::Static(repository))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_logging(&logging);

    info!("Starting SkillSwap matching service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully (log format: {:?})", logging.format());

    let profiles = Arc::new(build_profile_source(&settings)?);

    let weights = settings.weights();
    let categories = settings.skill_categories();

    info!("Matcher initialized with weights: {:?} ({} skill categories)", weights, categories.len());

    let app_state = AppState {
        profiles,
        matcher: Matcher::new(weights, categories),
        default_limit: settings.matching.default_limit,
        max_limit: settings.matching.max_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
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
