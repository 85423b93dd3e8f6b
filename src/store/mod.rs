//! Storage abstractions for the two external services the handlers talk to:
//! a string-keyed config store holding JSON documents, and a key-addressed
//! media store holding uploaded blobs.
//!
//! Handlers receive these as injected trait objects so tests can swap in the
//! in-memory fakes from [`memory`].

pub mod fs;
pub mod memory;
pub mod pg;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// Store keys for every config document.
pub mod keys {
    pub const HERO: &str = "settings:hero";
    pub const BRANDING: &str = "settings:branding";
    pub const CONTACT: &str = "settings:contact";
    pub const SOCIAL: &str = "settings:social";
    pub const SEO: &str = "settings:seo";
    pub const SHOWREEL: &str = "settings:showreel";
    pub const REELS: &str = "reels";
    pub const TOOLS: &str = "tools";
    pub const PHOTO_CATEGORIES: &str = "photography:categories";
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// String-keyed get/put/delete store for JSON-serialized config documents.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Key-addressed binary object store for uploaded media.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Read a key and parse it as JSON, mapping a missing key, a read failure,
/// or malformed stored JSON to the given fallback.
///
/// This is the deliberate lossy-read policy: bad stored state is recovered
/// to a default, never surfaced to the caller.
pub async fn read_json_lossy<T, F>(store: &dyn ConfigStore, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "stored JSON is malformed, using fallback");
                fallback()
            }
        },
        Ok(None) => fallback(),
        Err(err) => {
            tracing::warn!(key, %err, "config store read failed, using fallback");
            fallback()
        }
    }
}

/// Serialize a document and overwrite its key wholesale (last-writer-wins).
pub async fn write_json<T: Serialize>(
    store: &dyn ConfigStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Backend(e.to_string()))?;
    store.put(key, &raw).await
}
