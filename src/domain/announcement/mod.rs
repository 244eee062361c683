pub mod dto;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod queue;
pub mod scheduler;

pub use error::AnnouncementServiceError;
pub use model::{Announcement, AnnouncementType, Channel, CompletedRecord, Priority};
pub use pipeline::LanguagePipeline;
pub use queue::AnnouncementQueue;
pub use scheduler::AnnouncementScheduler;
