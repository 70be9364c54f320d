/// Persisted key-value data: the last search pattern and staged export results
use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TabError};
use crate::grouping::{GroupedTabs, GroupingMode};
use crate::tab_data::TabRecord;

pub const LAST_PATTERN_KEY: &str = "lastPattern";
pub const GROUPED_TAB_DATA_KEY: &str = "groupedTabData";
pub const GROUPING_TITLE_KEY: &str = "groupingTitle";
pub const GROUP_TYPE_KEY: &str = "groupType";

pub const DEFAULT_RESULTS_TITLE: &str = "Open Tab Organizer";

/// Host key-value storage (`storage.local` in the browser)
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-process store for tests and non-browser callers
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.entries.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Export results as staged for the results page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedResults {
    #[serde(default)]
    pub grouped_tab_data: HashMap<String, Vec<TabRecord>>,
    #[serde(default = "default_results_title")]
    pub grouping_title: String,
    #[serde(default)]
    pub group_type: GroupingMode,
}

fn default_results_title() -> String {
    DEFAULT_RESULTS_TITLE.to_string()
}

impl From<GroupedTabs> for StagedResults {
    fn from(grouped: GroupedTabs) -> Self {
        StagedResults {
            grouped_tab_data: grouped.groups,
            grouping_title: grouped.title,
            group_type: grouped.group_type,
        }
    }
}

pub async fn load_last_pattern<S: KeyValueStore>(store: &S) -> Result<Option<String>> {
    Ok(store
        .get(LAST_PATTERN_KEY)
        .await?
        .and_then(|value| value.as_str().map(str::to_string))
        .filter(|pattern| !pattern.is_empty()))
}

pub async fn save_last_pattern<S: KeyValueStore>(store: &S, pattern: &str) -> Result<()> {
    store.set(LAST_PATTERN_KEY, Value::from(pattern)).await
}

pub async fn stage_results<S: KeyValueStore>(store: &S, staged: &StagedResults) -> Result<()> {
    store
        .set(GROUPED_TAB_DATA_KEY, serde_json::to_value(&staged.grouped_tab_data)?)
        .await?;
    store
        .set(GROUPING_TITLE_KEY, Value::from(staged.grouping_title.as_str()))
        .await?;
    store
        .set(GROUP_TYPE_KEY, Value::from(staged.group_type.as_str()))
        .await
}

/// Read the staged keys, defaulting whatever is missing
pub async fn load_staged_results<S: KeyValueStore>(store: &S) -> Result<StagedResults> {
    let mut record = serde_json::Map::new();
    for key in [GROUPED_TAB_DATA_KEY, GROUPING_TITLE_KEY, GROUP_TYPE_KEY] {
        if let Some(value) = store.get(key).await? {
            if !value.is_null() {
                record.insert(key.to_string(), value);
            }
        }
    }

    serde_json::from_value(Value::Object(record))
        .map_err(|e| TabError::Storage(format!("Failed to parse staged results: {}", e)))
}
