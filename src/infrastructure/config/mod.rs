use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    // Translation/speech provider
    pub provider_api_key: String,
    pub provider_base_url: String,
    // Scheduler
    pub worker_pool_size: usize,
    // Caches
    pub translation_cache_capacity: u64,
    pub audio_cache_capacity: u64,
    // Retry policy
    pub max_retries: u32,
    pub backoff_factor: u32,
    pub base_delay_seconds: u64,
    // Languages
    pub default_languages: Vec<String>,
    // Paths
    pub audio_dir: String,
    pub storage_path: String,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            // The provider credential is the one fatal misconfiguration:
            // without it no announcement can ever be processed.
            provider_api_key: env::var("PROVIDER_API_KEY")
                .map_err(|_| "PROVIDER_API_KEY must be set")?,
            provider_base_url: env::var("PROVIDER_BASE_URL")
                .unwrap_or_else(|_| "https://api.dwani.ai/v1".to_string()),
            worker_pool_size: env::var("WORKER_POOL_SIZE")
                .unwrap_or_else(|_| "4".to_string())
                .parse()?,
            translation_cache_capacity: env::var("TRANSLATION_CACHE_CAPACITY")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()?,
            audio_cache_capacity: env::var("AUDIO_CACHE_CAPACITY")
                .unwrap_or_else(|_| "500".to_string())
                .parse()?,
            max_retries: env::var("MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()?,
            backoff_factor: env::var("BACKOFF_FACTOR")
                .unwrap_or_else(|_| "2".to_string())
                .parse()?,
            base_delay_seconds: env::var("BASE_DELAY_SECONDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            default_languages: env::var("DEFAULT_LANGUAGES")
                .unwrap_or_else(|_| "hindi,english".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            audio_dir: env::var("AUDIO_DIR").unwrap_or_else(|_| "announcements".to_string()),
            storage_path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "announcement_logs.json".to_string()),
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_secs(self.base_delay_seconds)
    }
}
