pub mod cache;
pub mod config;
pub mod delivery;
pub mod http;
pub mod provider;
pub mod retry;
pub mod storage;
