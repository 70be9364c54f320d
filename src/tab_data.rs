/// Data structures for Tab Sweeper
use serde::{Deserialize, Serialize};

/// Snapshot of one open browser tab, as reported by `tabs.query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRecord {
    pub id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub window_id: i32,
    /// Milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<f64>,
    #[serde(default)]
    pub pinned: bool,
}

impl TabRecord {
    pub fn new(id: i32, url: &str, title: &str) -> TabRecord {
        TabRecord {
            id,
            url: Some(url.to_string()),
            title: Some(title.to_string()),
            index: 0,
            window_id: 0,
            last_accessed: None,
            pinned: false,
        }
    }

    /// Title if the tab has a non-empty one, otherwise its URL
    pub fn display_label(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => self.url.as_deref().unwrap_or(""),
        }
    }

    #[cfg(test)]
    pub fn with_last_accessed(mut self, last_accessed: f64) -> TabRecord {
        self.last_accessed = Some(last_accessed);
        self
    }
}
