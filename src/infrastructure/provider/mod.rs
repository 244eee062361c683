pub mod error;
pub mod http_client;

pub use error::ProviderError;
pub use http_client::HttpProviderClient;

use async_trait::async_trait;

/// Adapter over the remote translation/speech provider.
///
/// Implementations are responsible for:
/// - Carrying the provider's authentication
/// - Normalizing heterogeneous response payloads into a single
///   success/failure outcome
/// - Classifying transport and payload failures as [`ProviderError`]
///   kinds so the retry layer can tell retryable from terminal
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Translate `text` between two provider language codes.
    ///
    /// An empty or absent translated string is reported as
    /// [`ProviderError::EmptyResult`], never as success.
    async fn translate(
        &self,
        text: &str,
        src_code: &str,
        tgt_code: &str,
    ) -> Result<String, ProviderError>;

    /// Synthesize speech for already-translated text.
    ///
    /// Returns raw audio bytes in the requested format ("mp3").
    async fn synthesize(&self, text: &str, format: &str) -> Result<Vec<u8>, ProviderError>;
}
