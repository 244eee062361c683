use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::metrics::{MetricsRegistry, MetricsSnapshot};

/// GET /api/metrics - Point-in-time pipeline counters.
pub async fn metrics(State(registry): State<Arc<MetricsRegistry>>) -> Json<MetricsSnapshot> {
    Json(registry.snapshot())
}
