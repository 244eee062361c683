use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::announcement::{
        dto::{CreateAnnouncementRequest, CreateAnnouncementResponse},
        model::{Announcement, CompletedRecord},
        scheduler::AnnouncementScheduler,
        AnnouncementServiceError,
    },
    error::{AppError, AppResult},
    infrastructure::storage::AnnouncementStore,
};

pub struct AnnouncementController {
    scheduler: Arc<AnnouncementScheduler>,
    store: Arc<AnnouncementStore>,
}

impl AnnouncementController {
    pub fn new(scheduler: Arc<AnnouncementScheduler>, store: Arc<AnnouncementStore>) -> Self {
        Self { scheduler, store }
    }

    /// POST /api/announcements - Validate and enqueue an announcement.
    /// Returns 202: processing happens on the scheduler, not in the
    /// request.
    pub async fn create(
        State(controller): State<Arc<AnnouncementController>>,
        Json(request): Json<CreateAnnouncementRequest>,
    ) -> AppResult<(StatusCode, Json<CreateAnnouncementResponse>)> {
        let announcement = Announcement {
            text: request.text,
            source_language: request.source_language,
            target_languages: request.target_languages,
            channels: request.channels,
            priority: request.priority,
            announcement_type: request.announcement_type,
            districts: request.districts,
            metadata: request.metadata,
        };

        let sequence = controller
            .scheduler
            .submit(announcement)
            .map_err(AppError::from)?;

        Ok((
            StatusCode::ACCEPTED,
            Json(CreateAnnouncementResponse {
                status: "queued".to_string(),
                sequence,
            }),
        ))
    }

    /// GET /api/announcements - All completed records.
    pub async fn list(
        State(controller): State<Arc<AnnouncementController>>,
    ) -> AppResult<Json<Vec<CompletedRecord>>> {
        let records = controller
            .store
            .list()
            .await
            .map_err(|e| AppError::from(AnnouncementServiceError::from(e)))?;
        Ok(Json(records))
    }

    /// DELETE /api/announcements/:id - Remove one completed record.
    pub async fn delete(
        State(controller): State<Arc<AnnouncementController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .store
            .delete(id)
            .await
            .map_err(|e| AppError::from(AnnouncementServiceError::from(e)))?;
        Ok(StatusCode::NO_CONTENT)
    }
}
