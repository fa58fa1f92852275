//! FAQ Translate - FAQ service with lazy machine translation.
//!
//! Serves a list of question/answer pairs in any language. Missing
//! translations are produced on demand, persisted, and the rendered
//! listing is cached for a short while.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `database` - Record store (MongoDB or in-memory)
//! - `cache` - Listing cache with Moka
//! - `translate` - Translation backends and gateway
//! - `faq` - Domain models and the FAQ service
//! - `web` - axum routes and handlers

mod cache;
mod config;
mod database;
mod faq;
mod translate;
mod web;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cache::{CacheConfig, ListingCache, MokaListingCache};
use config::Config;
use database::{Database, FaqRepository, FaqStore, MemoryFaqStore};
use faq::FaqService;
use translate::{GoogleTranslator, TranslatorGateway};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("faq_translate=info,tower_http=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting FAQ service...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Record store
    let store: Arc<dyn FaqStore> = match &config.mongodb_uri {
        Some(uri) => {
            info!("Connecting to MongoDB...");
            let db = Database::connect(uri, &config.mongodb_database).await?;
            info!("Database connected");
            Arc::new(FaqRepository::new(&db))
        }
        None => {
            warn!("MONGODB_URI is not set, FAQs are kept in memory only");
            Arc::new(MemoryFaqStore::new())
        }
    };

    // Listing cache
    let cache_config = CacheConfig::listings()
        .ttl(config.listing_ttl)
        .max_capacity(config.cache_capacity);
    let cache: Arc<dyn ListingCache> = Arc::new(MokaListingCache::new(cache_config));
    info!("Listing cache initialized (ttl: {:?})", config.listing_ttl);

    // Translator
    let translator = GoogleTranslator::new(config.translate_url.clone(), config.translate_timeout)?;
    info!("Translator endpoint: {}", config.translate_url);

    let service = FaqService::new(store, cache, TranslatorGateway::new(Arc::new(translator)));
    let app = web::router(service);

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when Ctrl+C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
