use moka::future::Cache;
use sha2::{Digest, Sha256};

/// What a cached value represents; part of the fingerprint so a
/// translation and its audio never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Audio,
}

impl Modality {
    fn as_str(&self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Audio => "audio",
        }
    }
}

/// Deterministic cache key over (normalized text, source code, target
/// code, modality).
pub fn fingerprint(text: &str, src_code: &str, tgt_code: &str, modality: Modality) -> String {
    let normalized = normalize(text);
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hasher.update([0u8]);
    hasher.update(src_code.as_bytes());
    hasher.update([0u8]);
    hasher.update(tgt_code.as_bytes());
    hasher.update([0u8]);
    hasher.update(modality.as_str().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Collapse runs of whitespace so trivially reformatted text shares a
/// fingerprint.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bounded cache for provider results, one instance per modality.
///
/// Purely an optimization: a miss costs one provider round-trip, never
/// a wrong answer. Internal bookkeeping is synchronized by the moka
/// cache itself, so worker jobs share an instance freely.
#[derive(Clone)]
pub struct ResultCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> ResultCache<V> {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.cache.get(key).await
    }

    pub async fn put(&self, key: String, value: V) {
        self.cache.insert(key, value).await;
    }
}
