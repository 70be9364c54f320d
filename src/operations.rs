/// Tab search: filtering a snapshot with a compiled pattern
use serde::{Deserialize, Serialize};

use crate::error::{Result, TabError};
use crate::pattern::CompiledPattern;
use crate::tab_data::TabRecord;

/// Matches listed by name in the popup before collapsing into "... and N more"
pub const PREVIEW_LIMIT: usize = 3;

/// Tabs with a URL, not pinned, whose URL matches the pattern
pub fn find_matching_tabs<'a>(tabs: &'a [TabRecord], pattern: &CompiledPattern) -> Vec<&'a TabRecord> {
    tabs.iter()
        .filter(|tab| !tab.pinned)
        .filter(|tab| match tab.url.as_deref() {
            Some(url) if !url.is_empty() => pattern.matches(url),
            _ => false,
        })
        .collect()
}

/// Trim the raw input and reject a blank pattern
pub fn require_pattern(raw: &str) -> Result<&str> {
    let pattern = raw.trim();
    if pattern.is_empty() {
        Err(TabError::NoPatternSupplied)
    } else {
        Ok(pattern)
    }
}

/// Compile `raw` and search `tabs` with it
pub fn search_tabs(tabs: &[TabRecord], raw: &str) -> Result<SearchOutcome> {
    let pattern = CompiledPattern::compile(require_pattern(raw)?)?;
    Ok(SearchOutcome::new(&pattern, find_matching_tabs(tabs, &pattern)))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewEntry {
    pub label: String,
    pub url: String,
}

/// What the popup shows after a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    /// Pattern after scheme normalization
    pub pattern: String,
    pub tab_ids: Vec<i32>,
    pub preview: Vec<PreviewEntry>,
    /// Matches not listed in `preview`
    pub remaining: usize,
    pub status_message: String,
    pub more_message: Option<String>,
    pub close_button_label: String,
    pub close_confirmation: String,
}

impl SearchOutcome {
    pub fn new(pattern: &CompiledPattern, matches: Vec<&TabRecord>) -> SearchOutcome {
        let count = matches.len();
        let remaining = count.saturating_sub(PREVIEW_LIMIT);
        let preview = matches
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|tab| PreviewEntry {
                label: tab.display_label().to_string(),
                url: tab.url.clone().unwrap_or_default(),
            })
            .collect();

        let status_message = if count == 0 {
            format!("No matching tabs found for this pattern. Pattern: {}", pattern.pattern())
        } else {
            format!("Total matching tabs: {}", count)
        };

        SearchOutcome {
            pattern: pattern.pattern().to_string(),
            tab_ids: matches.iter().map(|tab| tab.id).collect(),
            preview,
            remaining,
            status_message,
            more_message: (remaining > 0).then(|| format!("... and {} more tabs", remaining)),
            close_button_label: format!("Close Matching Tabs ({})", count),
            close_confirmation: format!("Are you sure you want to close {} matching tabs?", count),
        }
    }

    pub fn count(&self) -> usize {
        self.tab_ids.len()
    }
}

/// Result of a bulk close, as reported back to the popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseOutcome {
    pub closed: usize,
    pub message: String,
}

impl CloseOutcome {
    pub fn new(closed: usize) -> CloseOutcome {
        CloseOutcome {
            closed,
            message: format!("Closed {} tabs.", closed),
        }
    }
}
