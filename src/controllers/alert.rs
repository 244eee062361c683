use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::alert::{AlertService, EmergencyAlert, RecentAlert},
    domain::announcement::dto::CreateAnnouncementResponse,
    error::{AppError, AppResult},
};

const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct RecentAlertsQuery {
    pub limit: Option<usize>,
}

pub struct AlertController {
    alert_service: Arc<AlertService>,
}

impl AlertController {
    pub fn new(alert_service: Arc<AlertService>) -> Self {
        Self { alert_service }
    }

    /// POST /api/alerts - Trigger an emergency broadcast.
    pub async fn trigger(
        State(controller): State<Arc<AlertController>>,
        Json(alert): Json<EmergencyAlert>,
    ) -> AppResult<(StatusCode, Json<CreateAnnouncementResponse>)> {
        let sequence = controller
            .alert_service
            .trigger(alert)
            .map_err(AppError::from)?;

        Ok((
            StatusCode::ACCEPTED,
            Json(CreateAnnouncementResponse {
                status: "queued".to_string(),
                sequence,
            }),
        ))
    }

    /// GET /api/alerts/recent - Latest alerts, newest first.
    pub async fn recent(
        State(controller): State<Arc<AlertController>>,
        Query(query): Query<RecentAlertsQuery>,
    ) -> AppResult<Json<Vec<RecentAlert>>> {
        let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
        Ok(Json(controller.alert_service.recent(limit)))
    }
}
