/// Grouping of open tabs by last-accessed date or by domain
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::domain_key_for;
use crate::error::{Result, TabError};
use crate::tab_data::TabRecord;

pub const DATE_TITLE: &str = "All Open Tabs Grouped by Last Accessed Date";
pub const DOMAIN_TITLE: &str = "All Open Tabs Grouped by Domain Name";

/// Key used when a timestamp falls outside the representable date range
pub const UNKNOWN_DATE_KEY: &str = "Unknown Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    #[default]
    Date,
    Domain,
}

impl GroupingMode {
    pub fn title(self) -> &'static str {
        match self {
            GroupingMode::Date => DATE_TITLE,
            GroupingMode::Domain => DOMAIN_TITLE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GroupingMode::Date => "date",
            GroupingMode::Domain => "domain",
        }
    }
}

impl FromStr for GroupingMode {
    type Err = TabError;

    fn from_str(mode: &str) -> Result<Self> {
        match mode {
            "date" => Ok(GroupingMode::Date),
            "domain" => Ok(GroupingMode::Domain),
            other => Err(TabError::InvalidGroupingMode(other.to_string())),
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a grouping request, in the shape the results page stores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedTabs {
    pub title: String,
    pub group_type: GroupingMode,
    pub groups: HashMap<String, Vec<TabRecord>>,
}

impl GroupedTabs {
    pub fn tab_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Group keys in display order
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Group tabs using the current wall-clock time for missing timestamps
pub fn group_tabs(tabs: &[TabRecord], mode: &str) -> Result<GroupedTabs> {
    let mode: GroupingMode = mode.parse()?;
    Ok(group_tabs_at(tabs, mode, current_time_millis()))
}

/// Group tabs in local time, substituting `now_ms` for missing `lastAccessed`
pub fn group_tabs_at(tabs: &[TabRecord], mode: GroupingMode, now_ms: f64) -> GroupedTabs {
    group_tabs_in(tabs, mode, now_ms, &Local)
}

/// Group tabs with date keys computed in the given time zone
pub fn group_tabs_in<Tz>(tabs: &[TabRecord], mode: GroupingMode, now_ms: f64, tz: &Tz) -> GroupedTabs
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let groups = tabs
        .iter()
        .map(|tab| {
            // Stamped at grouping time, not when the tab was opened
            let mut tab = tab.clone();
            let last_accessed = *tab.last_accessed.get_or_insert(now_ms);
            let key = match mode {
                GroupingMode::Date => date_key_in(last_accessed, tz),
                GroupingMode::Domain => domain_key_for(tab.url.as_deref()),
            };
            (key, tab)
        })
        .fold(HashMap::new(), |mut groups: HashMap<String, Vec<TabRecord>>, (key, tab)| {
            groups.entry(key).or_default().push(tab);
            groups
        });

    GroupedTabs {
        title: mode.title().to_string(),
        group_type: mode,
        groups,
    }
}

/// `YYYY-MM-DD` of a millisecond timestamp in local time
pub fn date_key(ms: f64) -> String {
    date_key_in(ms, &Local)
}

fn date_key_in<Tz>(ms: f64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    format_timestamp_in(ms, tz)
        .map(|stamp| stamp[..10].to_string())
        .unwrap_or_else(|| UNKNOWN_DATE_KEY.to_string())
}

/// `YYYY-MM-DD HH:MM:SS` of a millisecond timestamp in local time
pub fn format_timestamp(ms: f64) -> Option<String> {
    format_timestamp_in(ms, &Local)
}

pub(crate) fn format_timestamp_in<Tz>(ms: f64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !ms.is_finite() {
        return None;
    }
    let stamp = tz.timestamp_millis_opt(ms.floor() as i64).single()?;
    let formatted = stamp.format("%Y-%m-%d %H:%M:%S").to_string();
    // Years beyond 9999 or before 0 do not fit the fixed-width layout
    (formatted.len() == 19).then_some(formatted)
}

pub fn current_time_millis() -> f64 {
    Utc::now().timestamp_millis() as f64
}
