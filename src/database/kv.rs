use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

use crate::error::{Error, Result};

/// A keyed slot that is read whole and written whole.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing has been written under `key` yet.
    async fn get(&self, key: &str) -> Result<Option<JsonValue>>;

    async fn put(&self, key: &str, value: &JsonValue) -> Result<()>;
}

#[derive(Clone)]
pub struct PgKeyValueStore {
    pool: PgPool,
}

impl PgKeyValueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for PgKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        let row = sqlx::query(r#"SELECT value FROM kv_store WHERE key = $1"#)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(row.try_get::<JsonValue, _>("value")?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &JsonValue) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Every slot lives in one JSON object on disk, keyed by slot name. Writes go
/// through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_slots(&self) -> Result<HashMap<String, JsonValue>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(Error::Io(err)),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        let mut slots = self.read_slots().await?;
        Ok(slots.remove(key))
    }

    async fn put(&self, key: &str, value: &JsonValue) -> Result<()> {
        // Only unparseable content is replaced; I/O failures must not wipe other slots.
        let mut slots = match self.read_slots().await {
            Ok(slots) => slots,
            Err(Error::Json(err)) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Replacing unparseable store file");
                HashMap::new()
            }
            Err(err) => return Err(err),
        };
        slots.insert(key.to_string(), value.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&slots)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: Arc<Mutex<HashMap<String, JsonValue>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, JsonValue>>> {
        self.slots
            .lock()
            .map_err(|_| Error::Internal("memory store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &JsonValue) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.clone());
        Ok(())
    }
}
