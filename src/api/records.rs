//! In-memory equipment records

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A stored record; `data` is an arbitrary JSON object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub data: serde_json::Map<String, serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<HashMap<String, Record>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first
    pub async fn list(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, data: serde_json::Value) -> Result<Record> {
        let data = into_object(data)?;
        let now = chrono::Utc::now();
        let record = Record {
            id: uuid::Uuid::new_v4().to_string(),
            data,
            created_at: now,
            updated_at: now,
        };
        self.records
            .write()
            .await
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    /// Replace a record's data
    pub async fn update(&self, id: &str, data: serde_json::Value) -> Result<Record> {
        let data = into_object(data)?;
        let mut records = self.records.write().await;
        let record = records.get_mut(id).ok_or_else(|| not_found(id))?;
        record.data = data;
        record.updated_at = chrono::Utc::now();
        Ok(record.clone())
    }

    pub async fn delete(&self, id: &str) -> Result<Record> {
        self.records
            .write()
            .await
            .remove(id)
            .ok_or_else(|| not_found(id))
    }
}

fn into_object(data: serde_json::Value) -> Result<serde_json::Map<String, serde_json::Value>> {
    match data {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(Error::Validation("record body must be a JSON object".to_string())),
    }
}

fn not_found(id: &str) -> Error {
    Error::NotFound(format!("Record '{}' not found", id))
}
