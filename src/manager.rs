/// Orchestration behind the popup and results page
use log::{debug, info, warn};

use crate::domain::pattern_for_url;
use crate::error::{Result, TabError};
use crate::grouping::{GroupedTabs, GroupingMode, current_time_millis, group_tabs_at};
use crate::host::TabHost;
use crate::operations::{CloseOutcome, SearchOutcome, find_matching_tabs, require_pattern};
use crate::pattern::CompiledPattern;
use crate::results::ResultsView;
use crate::storage::{
    KeyValueStore, StagedResults, load_last_pattern, load_staged_results, save_last_pattern, stage_results,
};

pub struct TabManager<H, S> {
    host: H,
    store: S,
}

impl<H: TabHost, S: KeyValueStore> TabManager<H, S> {
    pub fn new(host: H, store: S) -> Self {
        TabManager { host, store }
    }

    #[cfg(test)]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Pattern from the previous search, to pre-fill the popup
    pub async fn last_pattern(&self) -> Result<Option<String>> {
        load_last_pattern(&self.store).await
    }

    /// Pattern covering the active tab's host
    pub async fn suggest_pattern(&self) -> Result<Option<String>> {
        let url = self.host.current_tab_url().await?;
        Ok(url.as_deref().and_then(pattern_for_url))
    }

    /// Search all open tabs; the trimmed pattern is remembered even if it fails to compile
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome> {
        let pattern = require_pattern(raw)?;
        save_last_pattern(&self.store, pattern).await?;

        let compiled = CompiledPattern::compile(pattern)?;
        let tabs = self.host.query_tabs().await?;
        let outcome = SearchOutcome::new(&compiled, find_matching_tabs(&tabs, &compiled));

        debug!(
            "Pattern {} matched {} of {} tabs",
            outcome.pattern,
            outcome.count(),
            tabs.len()
        );
        Ok(outcome)
    }

    /// Close the given tabs and report how many were closed
    pub async fn close_tabs(&self, tab_ids: &[i32]) -> Result<CloseOutcome> {
        if tab_ids.is_empty() {
            return Err(TabError::NothingToClose);
        }

        self.host.close_tabs(tab_ids).await.inspect_err(|e| {
            warn!("Error closing tabs: {}", e);
        })?;
        info!("Closed {} tabs", tab_ids.len());
        Ok(CloseOutcome::new(tab_ids.len()))
    }

    pub async fn move_tabs_to_new_window(&self, tab_ids: &[i32]) -> Result<()> {
        if tab_ids.is_empty() {
            return Ok(());
        }

        self.host.move_tabs_to_new_window(tab_ids).await.inspect_err(|e| {
            warn!("Error moving tabs to a new window: {}", e);
        })?;
        info!("Moved {} tabs to a new window", tab_ids.len());
        Ok(())
    }

    pub async fn go_to_tab(&self, tab_id: i32) -> Result<()> {
        self.host.focus_tab(tab_id).await
    }

    /// Group every open tab, stage the result and open the results page
    pub async fn export(&self, mode: &str) -> Result<GroupedTabs> {
        let mode: GroupingMode = mode.parse()?;
        let tabs = self.host.query_tabs().await?;
        let grouped = group_tabs_at(&tabs, mode, current_time_millis());

        info!(
            "Grouped {} tabs into {} {} groups",
            grouped.tab_count(),
            grouped.groups.len(),
            mode
        );

        stage_results(&self.store, &StagedResults::from(grouped.clone())).await?;
        self.host.open_results_page().await?;
        Ok(grouped)
    }

    /// Build the results page from whatever was last staged
    pub async fn load_results(&self) -> Result<ResultsView> {
        let staged = load_staged_results(&self.store).await?;
        Ok(ResultsView::from_staged(staged))
    }
}
