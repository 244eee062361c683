use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::controllers::{
    health, metrics, AlertController, AnnouncementController, TranslationController,
};
use crate::domain::metrics::MetricsRegistry;
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::AnnouncementStore;

/// Assemble the full application router. Split from the server start
/// so integration tests can drive it without binding a socket.
pub fn build_router(
    config: &Config,
    store: Arc<AnnouncementStore>,
    metrics_registry: Arc<MetricsRegistry>,
    announcement_controller: Arc<AnnouncementController>,
    alert_controller: Arc<AlertController>,
    translation_controller: Arc<TranslationController>,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(store);

    let announcement_routes = Router::new()
        .route(
            "/api/announcements",
            get(AnnouncementController::list).post(AnnouncementController::create),
        )
        .route(
            "/api/announcements/:id",
            axum::routing::delete(AnnouncementController::delete),
        )
        .with_state(announcement_controller);

    let alert_routes = Router::new()
        .route("/api/alerts", post(AlertController::trigger))
        .route("/api/alerts/recent", get(AlertController::recent))
        .with_state(alert_controller);

    let translation_routes = Router::new()
        .route("/api/translate", post(TranslationController::translate))
        .with_state(translation_controller);

    let metrics_routes = Router::new()
        .route("/api/metrics", get(metrics::metrics))
        .with_state(metrics_registry);

    Router::new()
        .merge(health_routes)
        .merge(announcement_routes)
        .merge(alert_routes)
        .merge(translation_routes)
        .merge(metrics_routes)
        .nest_service("/audio", ServeDir::new(&config.audio_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured. Returns once the
/// shutdown signal resolves and in-flight requests have drained.
#[allow(clippy::too_many_arguments)]
pub async fn start_http_server(
    config: Arc<Config>,
    store: Arc<AnnouncementStore>,
    metrics_registry: Arc<MetricsRegistry>,
    announcement_controller: Arc<AnnouncementController>,
    alert_controller: Arc<AlertController>,
    translation_controller: Arc<TranslationController>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = build_router(
        &config,
        store,
        metrics_registry,
        announcement_controller,
        alert_controller,
        translation_controller,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
