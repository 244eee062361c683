use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::announcement::{
        dto::{TranslateAnnouncementRequest, TranslateAnnouncementResponse},
        pipeline::LanguagePipeline,
        AnnouncementServiceError,
    },
    domain::language::LanguageRegistry,
    error::{AppError, AppResult},
    infrastructure::delivery::DeliveryRouter,
};

/// One-off translation endpoint. Runs the same cached pipeline as the
/// scheduler but synchronously, for previewing a translation before
/// queueing a broadcast.
pub struct TranslationController {
    pipeline: Arc<LanguagePipeline>,
    registry: Arc<LanguageRegistry>,
    delivery: Arc<DeliveryRouter>,
}

impl TranslationController {
    pub fn new(
        pipeline: Arc<LanguagePipeline>,
        registry: Arc<LanguageRegistry>,
        delivery: Arc<DeliveryRouter>,
    ) -> Self {
        Self {
            pipeline,
            registry,
            delivery,
        }
    }

    /// POST /api/translate - Translate now, optionally synthesizing.
    pub async fn translate(
        State(controller): State<Arc<TranslationController>>,
        Json(request): Json<TranslateAnnouncementRequest>,
    ) -> AppResult<Json<TranslateAnnouncementResponse>> {
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        let translated = controller
            .pipeline
            .translate(&request.text, &request.source_language, &request.target_language)
            .await
            .map_err(AppError::from)?;

        let audio_file = if request.with_audio {
            let src_code = controller
                .registry
                .code_for(&request.source_language)
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "unsupported source language: {}",
                        request.source_language
                    ))
                })?;
            let tgt_code = controller
                .registry
                .code_for(&request.target_language)
                .ok_or_else(|| {
                    AppError::BadRequest(format!(
                        "unsupported target language: {}",
                        request.target_language
                    ))
                })?;

            let audio = controller
                .pipeline
                .synthesize(&request.text, &translated, src_code, tgt_code)
                .await
                .map_err(AppError::from)?;

            let path = controller
                .delivery
                .deliver_voice(&translated, &audio, &request.target_language)
                .await
                .map_err(|e| {
                    AppError::from(AnnouncementServiceError::Storage(e.to_string()))
                })?;
            Some(path)
        } else {
            None
        };

        Ok(Json(TranslateAnnouncementResponse {
            translated_text: translated,
            audio_file,
        }))
    }
}
