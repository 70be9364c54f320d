/// Display model for the grouped-tabs results page
use serde::Serialize;

use crate::grouping::{GroupingMode, format_timestamp};
use crate::storage::StagedResults;
use crate::tab_data::TabRecord;

pub const EMPTY_RESULTS_MESSAGE: &str = "No tab data found or all tabs are closed.";
pub const CLOSE_SINGLE_TAB_CONFIRMATION: &str = "Are you sure you want to close this single tab?";

const MISSING_TIMESTAMP: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub title: String,
    pub group_type: GroupingMode,
    pub groups: Vec<GroupView>,
    /// Set when there is nothing to show
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    pub key: String,
    pub tab_ids: Vec<i32>,
    pub move_label: String,
    pub close_label: String,
    pub move_confirmation: String,
    pub close_confirmation: String,
    pub rows: Vec<TabRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRow {
    pub id: i32,
    pub time_label: String,
    /// HTML-escaped title, or URL for untitled tabs
    pub label: String,
    pub url: String,
    pub index: i32,
    pub close_confirmation: String,
}

impl ResultsView {
    pub fn from_staged(staged: StagedResults) -> ResultsView {
        let mode = staged.group_type;
        let mut entries: Vec<(String, Vec<TabRecord>)> = staged.grouped_tab_data.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        let groups: Vec<GroupView> = entries
            .into_iter()
            .map(|(key, tabs)| GroupView::new(key, tabs, mode))
            .collect();

        let empty_message = groups
            .is_empty()
            .then(|| EMPTY_RESULTS_MESSAGE.to_string());

        ResultsView {
            title: staged.grouping_title,
            group_type: mode,
            groups,
            empty_message,
        }
    }
}

impl GroupView {
    fn new(key: String, mut tabs: Vec<TabRecord>, mode: GroupingMode) -> GroupView {
        sort_by_recency(&mut tabs);

        let count = tabs.len();
        let tab_ids = tabs.iter().map(|tab| tab.id).collect();
        let rows = tabs.iter().map(|tab| TabRow::new(tab, mode)).collect();

        GroupView {
            move_label: format!("Move to New Window ({})", count),
            close_label: format!("Close Group ({})", count),
            move_confirmation: format!(
                "Are you sure you want to move all {} tabs from {} to a new window?",
                count, key
            ),
            close_confirmation: format!("Are you sure you want to close all {} tabs from {}?", count, key),
            key,
            tab_ids,
            rows,
        }
    }
}

impl TabRow {
    fn new(tab: &TabRecord, mode: GroupingMode) -> TabRow {
        TabRow {
            id: tab.id,
            time_label: time_label(tab.last_accessed, mode),
            label: escape_html(tab.display_label()),
            url: tab.url.clone().unwrap_or_default(),
            index: tab.index,
            close_confirmation: CLOSE_SINGLE_TAB_CONFIRMATION.to_string(),
        }
    }
}

/// Most recently accessed first; a missing timestamp sorts as 0
pub fn sort_by_recency(tabs: &mut [TabRecord]) {
    tabs.sort_by(|a, b| {
        let a = a.last_accessed.unwrap_or(0.0);
        let b = b.last_accessed.unwrap_or(0.0);
        b.total_cmp(&a)
    });
}

/// Full timestamp when grouped by domain, time of day when grouped by date
pub fn time_label(last_accessed: Option<f64>, mode: GroupingMode) -> String {
    let stamp = match last_accessed.filter(|ms| *ms != 0.0).and_then(format_timestamp) {
        Some(stamp) => stamp,
        None => return MISSING_TIMESTAMP.to_string(),
    };

    match mode {
        GroupingMode::Domain => stamp,
        GroupingMode::Date => stamp[11..].to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::collections::HashMap;

    fn local_ms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> f64 {
        Local
            .with_ymd_and_hms(y, m, d, h, min, s)
            .earliest()
            .unwrap()
            .timestamp_millis() as f64
    }

    fn create_test_tab(id: i32, url: &str, title: Option<&str>, last_accessed: Option<f64>) -> TabRecord {
        TabRecord {
            id,
            url: Some(url.to_string()),
            title: title.map(str::to_string),
            index: id * 10,
            window_id: 1,
            last_accessed,
            pinned: false,
        }
    }

    fn staged(mode: GroupingMode, groups: Vec<(&str, Vec<TabRecord>)>) -> StagedResults {
        StagedResults {
            grouped_tab_data: groups
                .into_iter()
                .map(|(key, tabs)| (key.to_string(), tabs))
                .collect::<HashMap<_, _>>(),
            grouping_title: mode.title().to_string(),
            group_type: mode,
        }
    }

    #[test]
    fn test_groups_sorted_by_key_and_rows_by_recency() {
        let view = ResultsView::from_staged(staged(
            GroupingMode::Domain,
            vec![
                (
                    "google.com",
                    vec![
                        create_test_tab(1, "https://google.com/a", Some("A"), Some(100.0)),
                        create_test_tab(2, "https://google.com/b", Some("B"), Some(300.0)),
                        create_test_tab(3, "https://google.com/c", Some("C"), None),
                    ],
                ),
                (
                    "github.com",
                    vec![create_test_tab(4, "https://github.com", Some("GitHub"), Some(200.0))],
                ),
            ],
        ));

        let keys: Vec<&str> = view.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["github.com", "google.com"]);
        assert_eq!(view.groups[1].tab_ids, vec![2, 1, 3]);
        assert_eq!(view.empty_message, None);
        assert_eq!(view.title, "All Open Tabs Grouped by Domain Name");
    }

    #[test]
    fn test_group_labels_and_confirmations() {
        let view = ResultsView::from_staged(staged(
            GroupingMode::Date,
            vec![(
                "2024-03-05",
                vec![
                    create_test_tab(1, "https://a.com", Some("A"), Some(1.0)),
                    create_test_tab(2, "https://b.com", Some("B"), Some(2.0)),
                ],
            )],
        ));

        let group = &view.groups[0];
        assert_eq!(group.move_label, "Move to New Window (2)");
        assert_eq!(group.close_label, "Close Group (2)");
        assert_eq!(
            group.move_confirmation,
            "Are you sure you want to move all 2 tabs from 2024-03-05 to a new window?"
        );
        assert_eq!(
            group.close_confirmation,
            "Are you sure you want to close all 2 tabs from 2024-03-05?"
        );
    }

    #[test]
    fn test_row_label_escaped_with_url_fallback() {
        let view = ResultsView::from_staged(staged(
            GroupingMode::Domain,
            vec![(
                "a.com",
                vec![
                    create_test_tab(1, "https://a.com/x", Some("<b>Tom & Jerry</b>"), Some(2.0)),
                    create_test_tab(2, "https://a.com/y", None, Some(1.0)),
                ],
            )],
        ));

        let rows = &view.groups[0].rows;
        assert_eq!(rows[0].label, "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
        assert_eq!(rows[1].label, "https://a.com/y");
        assert_eq!(rows[1].index, 20);
    }

    #[test]
    fn test_rows_carry_single_close_confirmation() {
        let view = ResultsView::from_staged(staged(
            GroupingMode::Domain,
            vec![("a.com", vec![create_test_tab(1, "https://a.com/x", Some("A"), Some(1.0))])],
        ));

        let row = serde_json::to_value(&view.groups[0].rows[0]).unwrap();

        assert_eq!(row["closeConfirmation"], CLOSE_SINGLE_TAB_CONFIRMATION);
        assert_eq!(row["timeLabel"], view.groups[0].rows[0].time_label.as_str());
    }

    #[test]
    fn test_time_label_by_mode() {
        let ms = local_ms(2024, 3, 5, 14, 7, 9);

        assert_eq!(time_label(Some(ms), GroupingMode::Domain), "2024-03-05 14:07:09");
        assert_eq!(time_label(Some(ms), GroupingMode::Date), "14:07:09");
        assert_eq!(time_label(None, GroupingMode::Date), "N/A");
        assert_eq!(time_label(Some(0.0), GroupingMode::Domain), "N/A");
    }

    #[test]
    fn test_empty_results() {
        let view = ResultsView::from_staged(StagedResults {
            grouped_tab_data: HashMap::new(),
            grouping_title: "Open Tab Organizer".to_string(),
            group_type: GroupingMode::Date,
        });

        assert!(view.groups.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some(EMPTY_RESULTS_MESSAGE));
    }
}
