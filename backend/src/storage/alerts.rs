//! Alert repositories

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{Alert, AlertUpdate};
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};

use crate::error::{AppError, AppResult};

/// Storage for alerts
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// All alerts in insertion order
    async fn list(&self) -> AppResult<Vec<Alert>>;

    async fn find(&self, id: &str) -> AppResult<Option<Alert>>;

    async fn insert(&self, alert: Alert) -> AppResult<()>;

    /// Apply `update` to the alert with `id`; `None` if there is no such alert
    async fn update(&self, id: &str, update: AlertUpdate) -> AppResult<Option<Alert>>;

    /// Returns whether an alert was removed
    async fn remove(&self, id: &str) -> AppResult<bool>;
}

/// One entry of the alerts file
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum StoredAlert {
    Alert(Alert),
    /// A record that does not fit [`Alert`]; hidden from reads, written back as is
    Unrecognized(Value),
}

impl StoredAlert {
    fn decode(record: Value) -> Self {
        match Alert::deserialize(&record) {
            Ok(alert) => StoredAlert::Alert(alert),
            Err(e) => {
                tracing::warn!(
                    "Keeping unrecognized alert record {}: {}",
                    record.get("id").unwrap_or(&serde_json::Value::Null),
                    e
                );
                StoredAlert::Unrecognized(record)
            }
        }
    }

    fn alert(&self) -> Option<&Alert> {
        match self {
            StoredAlert::Alert(alert) => Some(alert),
            StoredAlert::Unrecognized(_) => None,
        }
    }

    fn alert_mut(&mut self) -> Option<&mut Alert> {
        match self {
            StoredAlert::Alert(alert) => Some(alert),
            StoredAlert::Unrecognized(_) => None,
        }
    }

    fn has_id(&self, id: &str) -> bool {
        self.alert().is_some_and(|a| a.id == id)
    }
}

/// Alerts kept as a pretty-printed JSON array in a single file.
///
/// Every operation reads the whole file and mutations write it back whole.
/// Records are decoded one by one; those that do not decode are skipped by
/// reads and preserved verbatim by writes. A mutex serializes operations
/// within this process; other writers to the same file are not coordinated
/// with.
pub struct JsonFileAlertRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileAlertRepository {
    /// Open the store at `path`, creating the directory and an empty array if needed
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        if !tokio::fs::try_exists(&path).await? {
            tracing::info!("Creating alerts file at {}", path.display());
            tokio::fs::write(&path, "[]").await?;
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable files, and files that are not a JSON array, read as empty
    async fn read_all(&self) -> Vec<StoredAlert> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Value>>(&contents) {
            Ok(records) => records.into_iter().map(StoredAlert::decode).collect(),
            Err(e) => {
                tracing::warn!("Ignoring malformed alerts file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn read_alerts(&self) -> Vec<Alert> {
        self.read_all()
            .await
            .into_iter()
            .filter_map(|record| match record {
                StoredAlert::Alert(alert) => Some(alert),
                StoredAlert::Unrecognized(_) => None,
            })
            .collect()
    }

    async fn write_all(&self, records: &[StoredAlert]) -> AppResult<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::StorageError(format!("Failed to serialize alerts: {}", e)))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl AlertRepository for JsonFileAlertRepository {
    async fn list(&self) -> AppResult<Vec<Alert>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_alerts().await)
    }

    async fn find(&self, id: &str) -> AppResult<Option<Alert>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_alerts().await.into_iter().find(|a| a.id == id))
    }

    async fn insert(&self, alert: Alert) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await;
        records.push(StoredAlert::Alert(alert));
        self.write_all(&records).await
    }

    async fn update(&self, id: &str, update: AlertUpdate) -> AppResult<Option<Alert>> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await;
        let Some(alert) = records
            .iter_mut()
            .filter_map(StoredAlert::alert_mut)
            .find(|a| a.id == id)
        else {
            return Ok(None);
        };
        alert.apply(update);
        let updated = alert.clone();
        self.write_all(&records).await?;
        Ok(Some(updated))
    }

    async fn remove(&self, id: &str) -> AppResult<bool> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_all().await;
        let before = records.len();
        records.retain(|r| !r.has_id(id));
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records).await?;
        Ok(true)
    }
}

/// Alerts held in memory only; lost on restart
#[derive(Default)]
pub struct InMemoryAlertRepository {
    alerts: RwLock<Vec<Alert>>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRepository for InMemoryAlertRepository {
    async fn list(&self) -> AppResult<Vec<Alert>> {
        Ok(self.alerts.read().await.clone())
    }

    async fn find(&self, id: &str) -> AppResult<Option<Alert>> {
        Ok(self.alerts.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, alert: Alert) -> AppResult<()> {
        self.alerts.write().await.push(alert);
        Ok(())
    }

    async fn update(&self, id: &str, update: AlertUpdate) -> AppResult<Option<Alert>> {
        let mut alerts = self.alerts.write().await;
        Ok(alerts.iter_mut().find(|a| a.id == id).map(|alert| {
            alert.apply(update);
            alert.clone()
        }))
    }

    async fn remove(&self, id: &str) -> AppResult<bool> {
        let mut alerts = self.alerts.write().await;
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        Ok(alerts.len() != before)
    }
}
