pub mod alert;
pub mod announcement;
pub mod language;
pub mod metrics;
