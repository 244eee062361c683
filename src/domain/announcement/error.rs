use crate::error::AppError;
use crate::infrastructure::provider::ProviderError;
use crate::infrastructure::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AnnouncementServiceError {
    #[error("invalid announcement: {0}")]
    Invalid(String),
    #[error("announcement not found")]
    NotFound,
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<StorageError> for AnnouncementServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => AnnouncementServiceError::NotFound,
            other => AnnouncementServiceError::Storage(other.to_string()),
        }
    }
}

impl From<AnnouncementServiceError> for AppError {
    fn from(err: AnnouncementServiceError) -> Self {
        match err {
            AnnouncementServiceError::Invalid(msg) => AppError::BadRequest(msg),
            AnnouncementServiceError::NotFound => {
                AppError::NotFound("announcement not found".to_string())
            }
            AnnouncementServiceError::Provider(ProviderError::RateLimited(msg)) => {
                AppError::RateLimitExceeded(msg)
            }
            AnnouncementServiceError::Provider(e) => AppError::ExternalService(e.to_string()),
            AnnouncementServiceError::Storage(msg) => AppError::Storage(msg),
            AnnouncementServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
