use crate::domain::announcement::error::AnnouncementServiceError;
use crate::domain::announcement::model::{Announcement, CompletedRecord};
use crate::domain::announcement::pipeline::LanguagePipeline;
use crate::domain::announcement::queue::AnnouncementQueue;
use crate::domain::language::LanguageRegistry;
use crate::domain::metrics::MetricsRegistry;
use crate::infrastructure::storage::AnnouncementStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Drains the priority queue and fans each announcement out across its
/// target languages on a bounded worker pool.
///
/// One announcement is drained at a time; its languages run
/// concurrently, each gated by the pool semaphore. Every language
/// reaches a terminal outcome before the single completion record is
/// written, so partial failure shows up as per-language errors in the
/// record, never as a retried announcement.
pub struct AnnouncementScheduler {
    queue: Arc<AnnouncementQueue>,
    pipeline: Arc<LanguagePipeline>,
    registry: Arc<LanguageRegistry>,
    store: Arc<AnnouncementStore>,
    metrics: Arc<MetricsRegistry>,
    pool: Arc<Semaphore>,
}

impl AnnouncementScheduler {
    pub fn new(
        queue: Arc<AnnouncementQueue>,
        pipeline: Arc<LanguagePipeline>,
        registry: Arc<LanguageRegistry>,
        store: Arc<AnnouncementStore>,
        metrics: Arc<MetricsRegistry>,
        worker_pool_size: usize,
    ) -> Self {
        Self {
            queue,
            pipeline,
            registry,
            store,
            metrics,
            pool: Arc::new(Semaphore::new(worker_pool_size.max(1))),
        }
    }

    /// Validate and enqueue; returns the assigned sequence number.
    /// An empty target list expands to every registered language.
    pub fn submit(
        &self,
        mut announcement: Announcement,
    ) -> Result<u64, AnnouncementServiceError> {
        if announcement.text.trim().is_empty() {
            return Err(AnnouncementServiceError::Invalid(
                "announcement text must not be empty".to_string(),
            ));
        }
        if !self.registry.is_supported(&announcement.source_language) {
            return Err(AnnouncementServiceError::Invalid(format!(
                "unsupported source language: {}",
                announcement.source_language
            )));
        }
        for language in &announcement.target_languages {
            if !self.registry.is_supported(language) {
                return Err(AnnouncementServiceError::Invalid(format!(
                    "unsupported target language: {language}"
                )));
            }
        }
        if announcement.channels.is_empty() {
            return Err(AnnouncementServiceError::Invalid(
                "at least one channel is required".to_string(),
            ));
        }

        if announcement.target_languages.is_empty() {
            announcement.target_languages = self.registry.all_languages();
        }

        let priority = announcement.priority;
        let sequence = self.queue.push(announcement);
        info!(sequence, ?priority, "Announcement queued");
        Ok(sequence)
    }

    /// Process the highest-priority queued announcement to completion.
    /// Returns false if the queue was empty.
    pub async fn process_one(self: &Arc<Self>) -> bool {
        let Some((sequence, announcement)) = self.queue.pop() else {
            return false;
        };

        info!(
            sequence,
            priority = ?announcement.priority,
            languages = announcement.target_languages.len(),
            "Processing announcement"
        );

        let announcement = Arc::new(announcement);
        let mut jobs = JoinSet::new();

        for language in announcement.target_languages.clone() {
            let scheduler = Arc::clone(self);
            let announcement = Arc::clone(&announcement);

            jobs.spawn(async move {
                let _permit = scheduler
                    .pool
                    .clone()
                    .acquire_owned()
                    .await
                    .expect("worker pool semaphore closed");
                let outcome = scheduler.pipeline.process(&announcement, &language).await;
                (language, outcome)
            });
        }

        let mut translations = HashMap::new();
        let mut audio_paths = HashMap::new();
        let mut errors = HashMap::new();

        while let Some(joined) = jobs.join_next().await {
            match joined {
                Ok((language, outcome)) => {
                    if outcome.succeeded() {
                        self.metrics.record_language_served(&language);
                    } else {
                        self.metrics.record_failure();
                    }
                    if let Some(translation) = outcome.translation {
                        translations.insert(language.clone(), translation);
                    }
                    if let Some(path) = outcome.audio_path {
                        audio_paths.insert(language.clone(), path);
                    }
                    if let Some(err) = outcome.error {
                        errors.insert(language, err);
                    }
                }
                Err(join_error) => {
                    error!(sequence, error = %join_error, "Language job panicked");
                    self.metrics.record_failure();
                }
            }
        }

        let record = CompletedRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            text: announcement.text.clone(),
            source_language: announcement.source_language.clone(),
            target_languages: announcement.target_languages.clone(),
            channels: announcement.channels.clone(),
            priority: announcement.priority,
            announcement_type: announcement.announcement_type,
            districts: announcement.districts.clone(),
            metadata: announcement.metadata.clone(),
            translations,
            audio_paths,
            errors: errors.clone(),
        };

        // The record is the durable trace; a write failure is logged
        // and the announcement still counts as processed.
        if let Err(e) = self.store.append(&record).await {
            error!(sequence, error = %e, "Failed to persist completion record");
        }

        self.metrics.record_processed();
        if errors.is_empty() {
            info!(sequence, record_id = %record.id, "Announcement completed");
        } else {
            warn!(
                sequence,
                record_id = %record.id,
                failed_languages = errors.len(),
                "Announcement completed with partial failures"
            );
        }

        true
    }

    /// Consumer loop: drain until empty, then sleep until a push or
    /// shutdown. In-flight work finishes before the loop exits.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        info!("Announcement scheduler started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            if !self.process_one().await {
                tokio::select! {
                    _ = self.queue.wait_for_work() => {}
                    _ = shutdown.changed() => {}
                }
            }
        }
        info!(
            remaining = self.queue.len(),
            "Announcement scheduler stopped"
        );
    }
}
