use crate::domain::announcement::model::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    NaturalDisaster,
    HealthEmergency,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub message: String,
    pub alert_type: AlertType,
    #[serde(default)]
    pub affected_districts: Vec<String>,
    #[serde(default = "EmergencyAlert::default_severity")]
    pub severity: Severity,
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,
}

impl EmergencyAlert {
    fn default_severity() -> Severity {
        Severity::High
    }
}

/// Out-of-band action taken alongside the broadcast. All current
/// actions are notification stubs executed fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SideAction {
    ActivateSirens,
    NotifyAuthorities,
    NotifyHospitals,
}

impl SideAction {
    pub fn describe(&self) -> &'static str {
        match self {
            SideAction::ActivateSirens => "activating public warning sirens",
            SideAction::NotifyAuthorities => "notifying district authorities",
            SideAction::NotifyHospitals => "notifying hospitals and health centers",
        }
    }
}

/// Channel set and side actions an alert type activates.
pub struct AlertProtocol {
    pub channels: Vec<Channel>,
    pub side_actions: Vec<SideAction>,
}

impl AlertProtocol {
    pub fn for_alert_type(alert_type: AlertType) -> Self {
        match alert_type {
            AlertType::NaturalDisaster => Self {
                channels: vec![Channel::Voice, Channel::Sms],
                side_actions: vec![SideAction::ActivateSirens, SideAction::NotifyAuthorities],
            },
            AlertType::HealthEmergency => Self {
                channels: vec![Channel::Voice, Channel::Sms],
                side_actions: vec![SideAction::NotifyHospitals],
            },
            AlertType::Other => Self {
                channels: vec![Channel::Voice, Channel::Sms],
                side_actions: vec![],
            },
        }
    }
}

/// What the recent-alerts endpoint returns, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAlert {
    pub timestamp: DateTime<Utc>,
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub affected_districts: Vec<String>,
    pub target_languages: Vec<String>,
    pub sequence: u64,
}
