//! In-memory implementation of WriteExecutor for testing and development

use crate::core::{WriteAction, WriteArgs, WriteData, WriteExecutor, WriteParams};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory store for guarded rows
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Rows are keyed by a generated id which is also written to the row's
/// `id` field when the payload does not carry one.
#[derive(Clone)]
pub struct InMemoryUserStore {
    rows: Arc<RwLock<HashMap<Uuid, WriteData>>>,
}

impl InMemoryUserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// All stored rows
    pub fn list(&self) -> Result<Vec<WriteData>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.values().cloned().collect())
    }

    /// Rows whose `field` equals `value`
    pub fn find_by(&self, field: &str, value: &Value) -> Result<Vec<WriteData>> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows
            .values()
            .filter(|row| row.get(field) == Some(value))
            .cloned()
            .collect())
    }

    pub fn len(&self) -> Result<usize> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn insert(rows: &mut HashMap<Uuid, WriteData>, data: &WriteData) -> WriteData {
        let id = Uuid::new_v4();
        let mut row = data.clone();
        if !row.contains_field("id") {
            row.set("id", id.to_string());
        }
        rows.insert(id, row.clone());
        row
    }

    fn matching_ids(rows: &HashMap<Uuid, WriteData>, selector: Option<&WriteData>) -> Vec<Uuid> {
        rows.iter()
            .filter(|(_, row)| row_matches(row, selector))
            .map(|(id, _)| *id)
            .collect()
    }

    /// The single row matching `selector`, if any
    ///
    /// Fails when the selector matches more than one row.
    fn unique_match(
        rows: &HashMap<Uuid, WriteData>,
        selector: Option<&WriteData>,
        model: &str,
    ) -> Result<Option<Uuid>> {
        match Self::matching_ids(rows, selector).as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            many => Err(anyhow!(
                "Selector matches {} records in {}; expected a unique match",
                many.len(),
                model
            )),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A row matches when every selector field equals the row's value
fn row_matches(row: &WriteData, selector: Option<&WriteData>) -> bool {
    selector.is_none_or(|sel| sel.iter().all(|(k, v)| row.get(k) == Some(v)))
}

#[async_trait]
impl WriteExecutor for InMemoryUserStore {
    async fn execute(&self, params: WriteParams) -> Result<Value> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let selector = params.selector.as_ref();

        match (params.action, &params.args) {
            (WriteAction::Create, WriteArgs::Data(data)) => {
                Ok(Self::insert(&mut rows, data).to_json())
            }

            (WriteAction::Update, WriteArgs::Data(patch)) => {
                let id = Self::unique_match(&rows, selector, &params.model)?
                    .ok_or_else(|| anyhow!("Record to update not found in {}", params.model))?;

                let row = rows
                    .get_mut(&id)
                    .ok_or_else(|| anyhow!("Record to update not found in {}", params.model))?;
                row.merge(patch);
                Ok(row.to_json())
            }

            (WriteAction::UpdateMany, WriteArgs::Data(patch)) => {
                let ids = Self::matching_ids(&rows, selector);
                for id in &ids {
                    if let Some(row) = rows.get_mut(id) {
                        row.merge(patch);
                    }
                }
                Ok(json!({ "count": ids.len() }))
            }

            (WriteAction::Upsert, WriteArgs::Upsert { create, update }) => {
                match Self::unique_match(&rows, selector, &params.model)? {
                    Some(id) => {
                        let row = rows
                            .get_mut(&id)
                            .ok_or_else(|| anyhow!("Record vanished during upsert"))?;
                        row.merge(update);
                        Ok(row.to_json())
                    }
                    None => Ok(Self::insert(&mut rows, create).to_json()),
                }
            }

            (action, _) => Err(anyhow!(
                "Invalid arguments for {} on {}",
                action,
                params.model
            )),
        }
    }
}
