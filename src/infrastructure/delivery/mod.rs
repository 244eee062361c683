use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to store voice file: {0}")]
    Io(#[from] std::io::Error),
}

/// Routes finished per-language content to its outbound channel.
///
/// Voice delivery writes an mp3 under the audio directory and returns
/// the stored path; SMS delivery only records the intent, there is no
/// gateway integration. A delivery failure degrades that one language,
/// it never aborts the announcement.
pub struct DeliveryRouter {
    audio_dir: PathBuf,
}

impl DeliveryRouter {
    pub fn new(audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            audio_dir: audio_dir.into(),
        }
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    /// Create the audio directory if missing. Called once at startup.
    pub async fn ensure_audio_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.audio_dir).await
    }

    /// Store synthesized audio as `voice_<timestamp>_<hash>_<language>.mp3`
    /// and return the path. The hash is over the translated text, so
    /// identical content produces recognizably related filenames.
    pub async fn deliver_voice(
        &self,
        translated_text: &str,
        audio: &[u8],
        language: &str,
    ) -> Result<String, DeliveryError> {
        let filename = format!(
            "voice_{}_{}_{}.mp3",
            Utc::now().format("%Y%m%d_%H%M%S"),
            content_hash(translated_text),
            language.to_lowercase()
        );
        let path = self.audio_dir.join(&filename);

        tokio::fs::create_dir_all(&self.audio_dir).await?;
        tokio::fs::write(&path, audio).await?;

        let stored = path.to_string_lossy().into_owned();
        info!(language, path = %stored, bytes = audio.len(), "Stored voice announcement");
        Ok(stored)
    }

    /// SMS stub: logs the outbound message and succeeds.
    pub async fn deliver_sms(&self, translated_text: &str, language: &str) {
        info!(
            language,
            preview = %truncate(translated_text, 80),
            "SMS dispatch recorded (no gateway configured)"
        );
    }
}

/// First 10 hex chars of the sha256 of the text.
fn content_hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let hex = format!("{:x}", digest);
    hex[..10].to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}
