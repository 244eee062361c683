use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

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
use prasaran_backend::infrastructure::config::Config;
use prasaran_backend::infrastructure::delivery::DeliveryRouter;
use prasaran_backend::infrastructure::http::build_router;
use prasaran_backend::infrastructure::provider::{ProviderClient, ProviderError};
use prasaran_backend::infrastructure::retry::RetryExecutor;
use prasaran_backend::infrastructure::storage::AnnouncementStore;

struct EchoProvider;

#[async_trait]
impl ProviderClient for EchoProvider {
    async fn translate(
        &self,
        text: &str,
        _src_code: &str,
        tgt_code: &str,
    ) -> Result<String, ProviderError> {
        Ok(format!("[{tgt_code}] {text}"))
    }

    async fn synthesize(&self, text: &str, _format: &str) -> Result<Vec<u8>, ProviderError> {
        Ok(text.as_bytes().to_vec())
    }
}

struct App {
    router: Router,
    metrics: Arc<MetricsRegistry>,
    _dir: tempfile::TempDir,
}

fn test_config(dir: &tempfile::TempDir) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        provider_api_key: "test-key".to_string(),
        provider_base_url: "http://localhost:0".to_string(),
        worker_pool_size: 4,
        translation_cache_capacity: 1000,
        audio_cache_capacity: 500,
        max_retries: 3,
        backoff_factor: 2,
        base_delay_seconds: 0,
        default_languages: vec!["hindi".to_string(), "english".to_string()],
        audio_dir: dir.path().join("announcements").display().to_string(),
        storage_path: dir.path().join("records.json").display().to_string(),
        environment: prasaran_backend::infrastructure::config::Environment::Development,
        log_format: prasaran_backend::infrastructure::config::LogFormat::Pretty,
    }
}

fn app() -> App {
    build_app(false)
}

fn build_app(unusable_storage: bool) -> App {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = test_config(&dir);
    if unusable_storage {
        // A directory cannot be read as the record log, so every
        // storage operation fails.
        config.storage_path = dir.path().display().to_string();
    }

    let registry = Arc::new(LanguageRegistry::new(config.default_languages.clone()));
    let metrics = Arc::new(MetricsRegistry::new());
    let delivery = Arc::new(DeliveryRouter::new(&config.audio_dir));
    let store = Arc::new(AnnouncementStore::new(&config.storage_path));
    let pipeline = Arc::new(LanguagePipeline::new(
        Arc::new(EchoProvider),
        RetryExecutor::new(3, 2, Duration::from_millis(1)),
        registry.clone(),
        ResultCache::new(1000),
        ResultCache::new(500),
        delivery.clone(),
    ));
    let scheduler = Arc::new(AnnouncementScheduler::new(
        Arc::new(AnnouncementQueue::new()),
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

    let router = build_router(
        &config,
        store.clone(),
        metrics.clone(),
        Arc::new(AnnouncementController::new(scheduler, store)),
        Arc::new(AlertController::new(alert_service)),
        Arc::new(TranslationController::new(pipeline, registry, delivery)),
    );

    App {
        router,
        metrics,
        _dir: dir,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let (status, _) = send(&app.router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app.router, get("/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["storage"], "available");
}

#[tokio::test]
async fn test_readiness_fails_when_storage_is_unusable() {
    let app = build_app(true);

    let (status, body) = send(&app.router, get("/health/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["storage"], "unavailable");
}

#[tokio::test]
async fn test_create_announcement_returns_queued_ack() {
    let app = app();

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/announcements",
            json!({
                "text": "Road closed near the market",
                "targetLanguages": ["hindi", "tamil"],
                "priority": "general"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "queued");
    assert!(body["sequence"].is_u64());
}

#[tokio::test]
async fn test_create_announcement_rejects_bad_input() {
    let app = app();

    let (status, _) = send(
        &app.router,
        post_json("/api/announcements", json!({ "text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/announcements",
            json!({ "text": "hello", "targetLanguages": ["klingon"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("unsupported target language"));
}

#[tokio::test]
async fn test_list_starts_empty_and_delete_unknown_is_404() {
    let app = app();

    let (status, body) = send(&app.router, get("/api/announcements")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/announcements/{}", uuid::Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_alert_resolves_district_languages() {
    let app = app();

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/alerts",
            json!({
                "message": "Flooding expected along the coast",
                "alertType": "natural_disaster",
                "affectedDistricts": ["Mumbai", "Chennai"],
                "severity": "critical"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "queued");

    let (status, body) = send(&app.router, get("/api/alerts/recent?limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    let alerts = body.as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0]["targetLanguages"],
        json!(["marathi", "hindi", "tamil"])
    );
    assert_eq!(alerts[0]["alertType"], "natural_disaster");

    assert_eq!(app.metrics.snapshot().emergency_alerts, 1);
}

#[tokio::test]
async fn test_alert_with_empty_message_is_rejected() {
    let app = app();

    let (status, _) = send(
        &app.router,
        post_json(
            "/api/alerts",
            json!({ "message": "", "alertType": "health_emergency" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_translate_endpoint() {
    let app = app();

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/translate",
            json!({
                "text": "Hello citizens",
                "sourceLanguage": "english",
                "targetLanguage": "kannada"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedText"], "[kan_Knda] Hello citizens");
    assert!(body.get("audioFile").is_none());
}

#[tokio::test]
async fn test_translate_endpoint_with_audio() {
    let app = app();

    let (status, body) = send(
        &app.router,
        post_json(
            "/api/translate",
            json!({
                "text": "Hello citizens",
                "sourceLanguage": "english",
                "targetLanguage": "kannada",
                "withAudio": true
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let audio_file = body["audioFile"].as_str().unwrap();
    assert!(audio_file.ends_with("_kannada.mp3"));
    assert!(std::path::Path::new(audio_file).exists());
}

#[tokio::test]
async fn test_translate_rejects_unknown_language() {
    let app = app();

    let (status, _) = send(
        &app.router,
        post_json(
            "/api/translate",
            json!({ "text": "Hello", "targetLanguage": "klingon" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint_reports_counters() {
    let app = app();
    app.metrics.record_processed();
    app.metrics.record_language_served("hindi");

    let (status, body) = send(&app.router, get("/api/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["announcementsProcessed"], 1);
    assert_eq!(body["languagesServed"]["hindi"], 1);
    assert_eq!(body["emergencyAlerts"], 0);
}
