use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Urgency classes, lower rank served first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Emergency,
    HealthAlert,
    WelfareScheme,
    General,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Emergency => 1,
            Priority::HealthAlert => 2,
            Priority::WelfareScheme => 3,
            Priority::General => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Voice,
    Sms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementType {
    WeatherAlert,
    Health,
    Welfare,
    General,
    Security,
}

/// A unit of broadcast intent. Built by the submission API or the
/// alert resolver, immutable once queued; per-language results are
/// aggregated separately and land in the [`CompletedRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub text: String,
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub channels: Vec<Channel>,
    pub priority: Priority,
    pub announcement_type: AnnouncementType,
    pub districts: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Announcement {
    pub fn wants(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }
}

/// Durable, immutable snapshot written once per announcement after
/// every target language reached a terminal state. Partial failures
/// are recorded inline in `errors`, never retried afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub channels: Vec<Channel>,
    pub priority: Priority,
    pub announcement_type: AnnouncementType,
    pub districts: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub translations: HashMap<String, String>,
    #[serde(default)]
    pub audio_paths: HashMap<String, String>,
    #[serde(default)]
    pub errors: HashMap<String, String>,
}
