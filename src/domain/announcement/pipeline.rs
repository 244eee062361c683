use crate::domain::announcement::error::AnnouncementServiceError;
use crate::domain::announcement::model::{Announcement, Channel};
use crate::domain::language::LanguageRegistry;
use crate::infrastructure::cache::{fingerprint, Modality, ResultCache};
use crate::infrastructure::delivery::DeliveryRouter;
use crate::infrastructure::provider::ProviderClient;
use crate::infrastructure::retry::RetryExecutor;
use std::sync::Arc;
use tracing::{debug, warn};

/// Terminal result of one language's work, folded into the record.
#[derive(Debug, Default)]
pub struct LanguageOutcome {
    pub translation: Option<String>,
    pub audio_path: Option<String>,
    pub error: Option<String>,
}

impl LanguageOutcome {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            translation: None,
            audio_path: None,
            error: Some(error.into()),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Translate-then-deliver flow for a single target language.
///
/// Shared by the scheduler's fan-out workers and the one-off translate
/// endpoint so both hit the same caches and retry policy.
pub struct LanguagePipeline {
    provider: Arc<dyn ProviderClient>,
    retry: RetryExecutor,
    registry: Arc<LanguageRegistry>,
    translation_cache: ResultCache<String>,
    audio_cache: ResultCache<Vec<u8>>,
    delivery: Arc<DeliveryRouter>,
}

impl LanguagePipeline {
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        retry: RetryExecutor,
        registry: Arc<LanguageRegistry>,
        translation_cache: ResultCache<String>,
        audio_cache: ResultCache<Vec<u8>>,
        delivery: Arc<DeliveryRouter>,
    ) -> Self {
        Self {
            provider,
            retry,
            registry,
            translation_cache,
            audio_cache,
            delivery,
        }
    }

    /// Cached, retried translation between two registered languages.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, AnnouncementServiceError> {
        let src_code = self.registry.code_for(source_language).ok_or_else(|| {
            AnnouncementServiceError::Invalid(format!(
                "unsupported source language: {source_language}"
            ))
        })?;
        let tgt_code = self.registry.code_for(target_language).ok_or_else(|| {
            AnnouncementServiceError::Invalid(format!(
                "unsupported target language: {target_language}"
            ))
        })?;

        if src_code == tgt_code {
            return Ok(text.to_string());
        }

        let key = fingerprint(text, src_code, tgt_code, Modality::Text);
        if let Some(hit) = self.translation_cache.get(&key).await {
            debug!(target_language, "Translation cache hit");
            return Ok(hit);
        }

        let translated = self
            .retry
            .execute("translate", || {
                self.provider.translate(text, src_code, tgt_code)
            })
            .await?;

        self.translation_cache.put(key, translated.clone()).await;
        Ok(translated)
    }

    /// Cached, retried speech synthesis of already-translated text.
    /// The cache key is derived from the source text and language pair,
    /// matching the translation key but for the audio modality.
    pub async fn synthesize(
        &self,
        source_text: &str,
        translated_text: &str,
        src_code: &str,
        tgt_code: &str,
    ) -> Result<Vec<u8>, AnnouncementServiceError> {
        let key = fingerprint(source_text, src_code, tgt_code, Modality::Audio);
        if let Some(hit) = self.audio_cache.get(&key).await {
            debug!(tgt_code, "Audio cache hit");
            return Ok(hit);
        }

        let audio = self
            .retry
            .execute("synthesize", || {
                self.provider.synthesize(translated_text, "mp3")
            })
            .await?;

        self.audio_cache.put(key, audio.clone()).await;
        Ok(audio)
    }

    /// Translate, synthesize and deliver one announcement for one
    /// target language. Never panics; every failure mode lands in the
    /// outcome's error field so a bad language degrades only itself.
    pub async fn process(&self, announcement: &Announcement, language: &str) -> LanguageOutcome {
        let Some(tgt_code) = self.registry.code_for(language) else {
            return LanguageOutcome::failed(format!("unsupported target language: {language}"));
        };
        let Some(src_code) = self.registry.code_for(&announcement.source_language) else {
            return LanguageOutcome::failed(format!(
                "unsupported source language: {}",
                announcement.source_language
            ));
        };

        let translated = match self
            .translate(&announcement.text, &announcement.source_language, language)
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                warn!(language, error = %e, "Translation failed");
                return LanguageOutcome::failed(error_label(&e));
            }
        };

        let mut outcome = LanguageOutcome {
            translation: Some(translated.clone()),
            audio_path: None,
            error: None,
        };

        if announcement.wants(Channel::Voice) {
            match self
                .synthesize(&announcement.text, &translated, src_code, tgt_code)
                .await
            {
                Ok(audio) => match self.delivery.deliver_voice(&translated, &audio, language).await
                {
                    Ok(path) => outcome.audio_path = Some(path),
                    Err(e) => {
                        warn!(language, error = %e, "Voice delivery failed");
                        outcome.error = Some(e.to_string());
                    }
                },
                Err(e) => {
                    warn!(language, error = %e, "Speech synthesis failed");
                    outcome.error = Some(error_label(&e));
                }
            }
        }

        if announcement.wants(Channel::Sms) {
            self.delivery.deliver_sms(&translated, language).await;
        }

        outcome
    }
}

/// Error string stored in a record's per-language error map; provider
/// failures get their stable kind as a prefix.
fn error_label(error: &AnnouncementServiceError) -> String {
    match error {
        AnnouncementServiceError::Provider(p) => format!("{}: {}", p.kind(), p),
        other => other.to_string(),
    }
}
