use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering},
        Arc,
    },
};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};

use crate::{
    entities::{FundBackend, RowFilter, SortDirection, Table},
    errors::{BackendRequestFailed, InvalidJson},
};

/// Backend keeping every table in memory. Supports the equality filters and
/// single-column ordering of `RowFilter`, embeds budget items and receipts
/// into activity rows on read, and can simulate being offline, rejecting
/// writes for specific rows, or stalling writes.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
    unreachable: AtomicBool,
    rejected_keys: Mutex<HashSet<String>>,
    write_log: Mutex<Vec<String>>,
    write_gate: Arc<RwLock<()>>,
    stalled_writes: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rows to `table`, serialized the same way the write path does.
    pub fn with_rows<T: Serialize>(
        mut self,
        table: Table,
        rows: impl IntoIterator<Item = T>,
    ) -> Result<Self, ServerError> {
        let encoded = rows
            .into_iter()
            .map(|r| serde_json::to_value(r).map_err(|e| InvalidJson::with_debug(table.name(), &e)))
            .collect::<Result<Vec<_>, _>>()?;
        self.tables.get_mut().entry(table).or_default().extend(encoded);
        Ok(self)
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, AtomicOrdering::SeqCst);
    }

    /// Writes touching the row with this key fail until `accept` is called.
    pub async fn reject(&self, key: &str) {
        self.rejected_keys.lock().await.insert(key.to_string());
    }

    pub async fn accept(&self, key: &str) {
        self.rejected_keys.lock().await.remove(key);
    }

    /// Writes wait until the returned guard is dropped.
    pub async fn hold_writes(&self) -> OwnedRwLockWriteGuard<()> {
        self.write_gate.clone().write_owned().await
    }

    /// Number of writes currently waiting on `hold_writes`.
    pub fn stalled_writes(&self) -> usize {
        self.stalled_writes.load(AtomicOrdering::SeqCst)
    }

    pub async fn rows(&self, table: Table) -> Vec<Value> {
        self.tables
            .lock()
            .await
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    /// Successful writes, oldest first, as `"<op> <table> <key>"`.
    pub async fn write_log(&self) -> Vec<String> {
        self.write_log.lock().await.clone()
    }

    async fn check_writable(&self, table: Table, key: &str) -> Result<(), ServerError> {
        self.stalled_writes.fetch_add(1, AtomicOrdering::SeqCst);
        drop(self.write_gate.read().await);
        self.stalled_writes.fetch_sub(1, AtomicOrdering::SeqCst);
        if self.unreachable.load(AtomicOrdering::SeqCst) {
            return Err(BackendRequestFailed::new(table.name(), "backend unreachable"));
        }
        if self.rejected_keys.lock().await.contains(key) {
            return Err(BackendRequestFailed::new(table.name(), "write rejected"));
        }
        Ok(())
    }

    async fn log(&self, op: &str, table: Table, key: &str) {
        self.write_log
            .lock()
            .await
            .push(format!("{} {} {}", op, table.name(), key));
    }
}

fn row_key(table: Table, row: &Value) -> Option<String> {
    match table {
        Table::WorkflowStatus => Some(format!(
            "{}:{}",
            row.get("community_id")?.as_str()?,
            row.get("fiscal_year_id")?.as_str()?
        )),
        _ => row.get("id")?.as_str().map(str::to_string),
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
    }
}

/// Nulls sort last in either direction.
fn compare_cells(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let ordering = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or_default()
            .total_cmp(&y.as_f64().unwrap_or_default()),
        (Some(x), Some(y)) => cell_text(Some(x)).cmp(&cell_text(Some(y))),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Merges child rows stored in their own table into the parent's embedded
/// array, replacing embedded entries with the same id.
fn embed_children(parent: &mut Value, field: &str, children: &[Value]) {
    let Some(parent_id) = parent.get("id").and_then(Value::as_str).map(str::to_string) else {
        return;
    };
    let Some(object) = parent.as_object_mut() else {
        return;
    };
    let embedded = object
        .entry(field)
        .or_insert_with(|| Value::Array(Vec::new()));
    if embedded.is_null() {
        *embedded = Value::Array(Vec::new());
    }
    let Some(embedded) = embedded.as_array_mut() else {
        return;
    };
    for child in children
        .iter()
        .filter(|c| c.get("activity_id").and_then(Value::as_str) == Some(parent_id.as_str()))
    {
        let child_id = child.get("id");
        match embedded.iter_mut().find(|e| e.get("id") == child_id) {
            Some(existing) => *existing = child.clone(),
            None => embedded.push(child.clone()),
        }
    }
}

#[async_trait]
impl FundBackend for InMemoryBackend {
    async fn select(&self, table: Table, filter: &RowFilter) -> Result<Vec<Value>, ServerError> {
        if self.unreachable.load(AtomicOrdering::SeqCst) {
            return Err(BackendRequestFailed::new(table.name(), "backend unreachable"));
        }
        let tables = self.tables.lock().await;
        let mut rows: Vec<Value> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        filter
                            .equals
                            .iter()
                            .all(|(column, expected)| cell_text(row.get(column)) == *expected)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if table == Table::PlanActivities {
            let items = tables.get(&Table::BudgetItems).cloned().unwrap_or_default();
            let receipts = tables.get(&Table::Receipts).cloned().unwrap_or_default();
            for row in rows.iter_mut() {
                embed_children(row, "budget_items", &items);
                embed_children(row, "receipts", &receipts);
            }
        }
        if let Some((column, direction)) = &filter.order_by {
            rows.sort_by(|a, b| compare_cells(a.get(column), b.get(column), *direction));
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<(), ServerError> {
        let key = row_key(table, &row)
            .ok_or_else(|| BackendRequestFailed::new(table.name(), "row has no key"))?;
        self.check_writable(table, &key).await?;
        {
            let mut tables = self.tables.lock().await;
            let rows = tables.entry(table).or_default();
            if rows.iter().any(|r| row_key(table, r).as_deref() == Some(key.as_str())) {
                return Err(BackendRequestFailed::new(table.name(), "duplicate key"));
            }
            rows.push(row);
        }
        self.log("insert", table, &key).await;
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, row: Value) -> Result<(), ServerError> {
        self.check_writable(table, id).await?;
        {
            let mut tables = self.tables.lock().await;
            let existing = tables
                .get_mut(&table)
                .and_then(|rows| {
                    rows.iter_mut()
                        .find(|r| row_key(table, r).as_deref() == Some(id))
                })
                .ok_or_else(|| BackendRequestFailed::new(table.name(), "row not found"))?;
            *existing = row;
        }
        self.log("update", table, id).await;
        Ok(())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), ServerError> {
        self.check_writable(table, id).await?;
        if let Some(rows) = self.tables.lock().await.get_mut(&table) {
            rows.retain(|r| row_key(table, r).as_deref() != Some(id));
        }
        self.log("delete", table, id).await;
        Ok(())
    }

    async fn is_reachable(&self) -> bool {
        !self.unreachable.load(AtomicOrdering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn backend() -> InMemoryBackend {
        InMemoryBackend::new()
            .with_rows(
                Table::PlanActivities,
                [
                    json!({"id": "a1", "fiscal_year_id": "fy", "period_start": "2024-01-01", "budget_items": []}),
                    json!({"id": "a2", "fiscal_year_id": "fy", "period_start": "2024-06-01"}),
                    json!({"id": "a3", "fiscal_year_id": "other", "period_start": null}),
                ],
            )
            .unwrap()
            .with_rows(
                Table::BudgetItems,
                [json!({"id": "i1", "activity_id": "a1", "name": "Fuel"})],
            )
            .unwrap()
    }

    #[tokio::test]
    async fn filters_orders_and_embeds() {
        let rows = backend()
            .select(
                Table::PlanActivities,
                &RowFilter::new().eq("fiscal_year_id", "fy").order_desc("period_start"),
            )
            .await
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a2", "a1"]);
        assert_eq!(rows[1]["budget_items"][0]["id"], "i1");
        assert_eq!(rows[0]["budget_items"], json!([]));
    }

    #[tokio::test]
    async fn nulls_sort_last() {
        let rows = backend()
            .select(Table::PlanActivities, &RowFilter::new().order_asc("period_start"))
            .await
            .unwrap();
        assert_eq!(rows[2]["id"], "a3");
    }

    #[tokio::test]
    async fn offline_and_rejected_writes_fail() {
        let backend = backend();
        backend.set_reachable(false);
        assert!(!backend.is_reachable().await);
        assert!(backend
            .insert(Table::Ideas, json!({"id": "x"}))
            .await
            .is_err());
        backend.set_reachable(true);
        backend.reject("x").await;
        assert!(backend
            .insert(Table::Ideas, json!({"id": "x"}))
            .await
            .is_err());
        backend.accept("x").await;
        backend.insert(Table::Ideas, json!({"id": "x"})).await.unwrap();
        assert!(backend
            .insert(Table::Ideas, json!({"id": "x"}))
            .await
            .is_err());
        assert_eq!(backend.write_log().await, vec!["insert ideas x"]);
    }

    #[tokio::test]
    async fn workflow_rows_are_keyed_by_pair() {
        let backend = InMemoryBackend::new();
        let row = json!({"community_id": "v1", "fiscal_year_id": "fy", "fund_registered": false});
        backend.insert(Table::WorkflowStatus, row).await.unwrap();
        let updated = json!({"community_id": "v1", "fiscal_year_id": "fy", "fund_registered": true});
        backend
            .update(Table::WorkflowStatus, "v1:fy", updated)
            .await
            .unwrap();
        let rows = backend.rows(Table::WorkflowStatus).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["fund_registered"], true);
    }
}
