use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prasaran_backend::controllers::{
    AlertController, AnnouncementController, TranslationController,
};
use prasaran_backend::domain::alert::AlertService;
use prasaran_backend::domain::announcement::{
    AnnouncementQueue, AnnouncementScheduler, LanguagePipeline,
};
use prasaran_backend::domain::language::LanguageRegistry;
use prasaran_backend::domain::metrics::MetricsRegistry;
use prasaran_backend::infrastructure::cache::ResultCache;
use prasaran_backend::infrastructure::config::{Config, LogFormat};
use prasaran_backend::infrastructure::delivery::DeliveryRouter;
use prasaran_backend::infrastructure::http::start_http_server;
use prasaran_backend::infrastructure::provider::{HttpProviderClient, ProviderClient};
use prasaran_backend::infrastructure::retry::RetryExecutor;
use prasaran_backend::infrastructure::storage::AnnouncementStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Prasaran Backend on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Infrastructure: provider client, retry policy, caches, delivery, storage
    let provider: Arc<dyn ProviderClient> = Arc::new(HttpProviderClient::new(
        reqwest::Client::new(),
        config.provider_base_url.clone(),
        config.provider_api_key.clone(),
    ));
    let retry = RetryExecutor::new(
        config.max_retries,
        config.backoff_factor,
        config.base_delay(),
    );
    let translation_cache: ResultCache<String> =
        ResultCache::new(config.translation_cache_capacity);
    let audio_cache: ResultCache<Vec<u8>> = ResultCache::new(config.audio_cache_capacity);

    let delivery = Arc::new(DeliveryRouter::new(&config.audio_dir));
    delivery.ensure_audio_dir().await?;
    tracing::info!(dir = %config.audio_dir, "Audio directory ready");

    let store = Arc::new(AnnouncementStore::new(&config.storage_path));
    tracing::info!(path = %config.storage_path, "Announcement store ready");

    // 2. Domain: registry, metrics, pipeline, queue, scheduler
    let registry = Arc::new(LanguageRegistry::new(config.default_languages.clone()));
    let metrics = Arc::new(MetricsRegistry::new());
    let pipeline = Arc::new(LanguagePipeline::new(
        provider,
        retry,
        registry.clone(),
        translation_cache,
        audio_cache,
        delivery.clone(),
    ));
    let queue = Arc::new(AnnouncementQueue::new());
    let scheduler = Arc::new(AnnouncementScheduler::new(
        queue,
        pipeline.clone(),
        registry.clone(),
        store.clone(),
        metrics.clone(),
        config.worker_pool_size,
    ));
    let alert_service = Arc::new(AlertService::new(
        scheduler.clone(),
        registry.clone(),
        metrics.clone(),
    ));

    // 3. Controllers
    let announcement_controller = Arc::new(AnnouncementController::new(
        scheduler.clone(),
        store.clone(),
    ));
    let alert_controller = Arc::new(AlertController::new(alert_service));
    let translation_controller = Arc::new(TranslationController::new(
        pipeline,
        registry,
        delivery,
    ));

    // 4. Scheduler loop with its own shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx));

    // Serve until ctrl-c, then stop the scheduler
    start_http_server(
        config,
        store,
        metrics,
        announcement_controller,
        alert_controller,
        translation_controller,
        shutdown_signal(),
    )
    .await?;

    tracing::info!("HTTP server stopped, shutting down scheduler");
    let _ = shutdown_tx.send(true);
    scheduler_task.await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "prasaran_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "prasaran_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
