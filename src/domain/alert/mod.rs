pub mod model;
pub mod service;

pub use model::{AlertProtocol, AlertType, EmergencyAlert, RecentAlert, Severity, SideAction};
pub use service::AlertService;
