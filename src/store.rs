use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SupabaseConfig;
use crate::error::{AppError, Result};

/// Collection the submitted novels are recorded in.
pub const NOVELS_TABLE: &str = "novels";

/// Title written until the analysis backend fills in the real one.
pub const PENDING_TITLE: &str = "分析中...";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NovelStatus {
    Pending,
    #[serde(other)]
    Unknown,
}

/// Row shape on write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewNovel {
    pub title: String,
    pub url: String,
    pub status: NovelStatus,
}

impl NewNovel {
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            title: PENDING_TITLE.to_string(),
            url: url.into(),
            status: NovelStatus::Pending,
        }
    }
}

/// Row shape on read-back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novel {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub url: String,
    pub status: NovelStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// Tables keyed by bigint identity columns return numeric ids.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!("unsupported id: {}", other))),
    }
}

#[async_trait]
pub trait NovelStore: Send + Sync {
    /// Inserts one record and returns it as stored.
    async fn insert_novel(&self, novel: NewNovel) -> Result<Novel>;
}

/// PostgREST client for a Supabase project.
pub struct SupabaseStore {
    client: Client,
    endpoint: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        let endpoint = format!("{}/rest/v1/{}", config.url.trim_end_matches('/'), NOVELS_TABLE);

        Ok(Self {
            client,
            endpoint,
            anon_key: config.anon_key.clone(),
        })
    }
}

#[async_trait]
impl NovelStore for SupabaseStore {
    async fn insert_novel(&self, novel: NewNovel) -> Result<Novel> {
        tracing::debug!(endpoint = %self.endpoint, url = %novel.url, "Inserting novel record");

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            // Ask PostgREST for a single object instead of a one-element array.
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(&novel)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::StoreError(format!("Insert into {} returned {}: {}", NOVELS_TABLE, status, body)));
        }

        let stored = response.json::<Novel>().await?;
        tracing::info!(id = %stored.id, "Novel record created");
        Ok(stored)
    }
}

/// In-process store used when no remote project is configured.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<String, Novel>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NovelStore for MemoryStore {
    async fn insert_novel(&self, novel: NewNovel) -> Result<Novel> {
        let stored = Novel {
            id: Uuid::new_v4().to_string(),
            title: novel.title,
            url: novel.url,
            status: novel.status,
            created_at: Some(Utc::now()),
        };

        self.rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }
}
