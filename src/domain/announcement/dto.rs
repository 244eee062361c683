use crate::domain::announcement::model::{AnnouncementType, Channel, Priority};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_source_language() -> String {
    "english".to_string()
}

fn default_channels() -> Vec<Channel> {
    vec![Channel::Voice]
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    pub text: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Empty or omitted means every registered language.
    #[serde(default)]
    pub target_languages: Vec<String>,
    #[serde(default = "default_channels")]
    pub channels: Vec<Channel>,
    #[serde(default = "CreateAnnouncementRequest::default_priority")]
    pub priority: Priority,
    #[serde(default = "CreateAnnouncementRequest::default_type")]
    pub announcement_type: AnnouncementType,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl CreateAnnouncementRequest {
    fn default_priority() -> Priority {
        Priority::General
    }

    fn default_type() -> AnnouncementType {
        AnnouncementType::General
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementResponse {
    pub status: String,
    pub sequence: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateAnnouncementRequest {
    pub text: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    pub target_language: String,
    /// Synthesize the translation and store the voice file too.
    #[serde(default)]
    pub with_audio: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateAnnouncementResponse {
    pub translated_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
}
