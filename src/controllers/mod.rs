pub mod alert;
pub mod announcement;
pub mod health;
pub mod metrics;
pub mod translation;

pub use alert::AlertController;
pub use announcement::AnnouncementController;
pub use translation::TranslationController;
