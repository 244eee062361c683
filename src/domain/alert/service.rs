use crate::domain::alert::model::{
    AlertProtocol, EmergencyAlert, RecentAlert, SideAction,
};
use crate::domain::announcement::error::AnnouncementServiceError;
use crate::domain::announcement::model::{Announcement, AnnouncementType, Priority};
use crate::domain::announcement::scheduler::AnnouncementScheduler;
use crate::domain::alert::model::AlertType;
use crate::domain::language::LanguageRegistry;
use crate::domain::metrics::MetricsRegistry;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

const RECENT_ALERTS_KEPT: usize = 100;

/// Turns an emergency alert into a forced-priority broadcast.
///
/// Target languages are the union of the affected districts' language
/// coverage, in district order with duplicates dropped. Side actions
/// (sirens, authority notifications) run fire-and-forget so a slow
/// action can never delay the broadcast itself.
pub struct AlertService {
    scheduler: Arc<AnnouncementScheduler>,
    registry: Arc<LanguageRegistry>,
    metrics: Arc<MetricsRegistry>,
    recent: Mutex<Vec<RecentAlert>>,
}

impl AlertService {
    pub fn new(
        scheduler: Arc<AnnouncementScheduler>,
        registry: Arc<LanguageRegistry>,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            scheduler,
            registry,
            metrics,
            recent: Mutex::new(Vec::new()),
        }
    }

    /// Resolve, enqueue and record an alert; returns the broadcast's
    /// sequence number.
    pub fn trigger(&self, alert: EmergencyAlert) -> Result<u64, AnnouncementServiceError> {
        if alert.message.trim().is_empty() {
            return Err(AnnouncementServiceError::Invalid(
                "alert message must not be empty".to_string(),
            ));
        }

        let languages = self.resolve_languages(&alert.affected_districts);
        let protocol = AlertProtocol::for_alert_type(alert.alert_type);

        let mut metadata = HashMap::new();
        metadata.insert(
            "severity".to_string(),
            serde_json::to_value(alert.severity).unwrap_or(serde_json::Value::Null),
        );
        metadata.insert(
            "alertType".to_string(),
            serde_json::to_value(alert.alert_type).unwrap_or(serde_json::Value::Null),
        );
        if let Some(valid_until) = alert.valid_until {
            metadata.insert(
                "validUntil".to_string(),
                serde_json::to_value(valid_until).unwrap_or(serde_json::Value::Null),
            );
        }

        let announcement = Announcement {
            text: alert.message.clone(),
            source_language: "english".to_string(),
            target_languages: languages.clone(),
            channels: protocol.channels,
            // Alerts always jump the queue regardless of what a caller
            // might claim.
            priority: Priority::Emergency,
            announcement_type: match alert.alert_type {
                AlertType::NaturalDisaster => AnnouncementType::WeatherAlert,
                AlertType::HealthEmergency => AnnouncementType::Health,
                AlertType::Other => AnnouncementType::Security,
            },
            districts: alert.affected_districts.clone(),
            metadata,
        };

        let sequence = self.scheduler.submit(announcement)?;
        self.metrics.record_emergency_alert();

        for action in protocol.side_actions {
            spawn_side_action(action, alert.affected_districts.clone());
        }

        info!(
            sequence,
            alert_type = ?alert.alert_type,
            districts = alert.affected_districts.len(),
            languages = languages.len(),
            "Emergency alert broadcast queued"
        );

        let recent = RecentAlert {
            timestamp: Utc::now(),
            alert_type: alert.alert_type,
            severity: alert.severity,
            message: alert.message,
            affected_districts: alert.affected_districts,
            target_languages: languages,
            sequence,
        };
        let mut history = self.recent.lock().expect("recent alerts lock poisoned");
        history.push(recent);
        if history.len() > RECENT_ALERTS_KEPT {
            let overflow = history.len() - RECENT_ALERTS_KEPT;
            history.drain(..overflow);
        }

        Ok(sequence)
    }

    /// Most recent alerts first, capped at `limit`.
    pub fn recent(&self, limit: usize) -> Vec<RecentAlert> {
        let history = self.recent.lock().expect("recent alerts lock poisoned");
        history.iter().rev().take(limit).cloned().collect()
    }

    /// Union of district language coverage, preserving district order.
    /// No districts (or only unmapped ones) falls back to the defaults
    /// via the registry.
    fn resolve_languages(&self, districts: &[String]) -> Vec<String> {
        if districts.is_empty() {
            return self.registry.default_languages().to_vec();
        }

        let mut languages = Vec::new();
        for district in districts {
            for language in self.registry.languages_for_district(district) {
                if !languages.contains(&language) {
                    languages.push(language);
                }
            }
        }
        languages
    }
}

/// Stub protocol hook: the real integrations are out of scope, only
/// the dispatch is recorded.
fn spawn_side_action(action: SideAction, districts: Vec<String>) {
    tokio::spawn(async move {
        if districts.is_empty() {
            warn!(
                action = action.describe(),
                "Side action dispatched without district scope"
            );
        } else {
            info!(action = action.describe(), ?districts, "Side action dispatched");
        }
    });
}
