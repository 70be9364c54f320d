/// Browser tab and window capabilities the extension relies on
use crate::error::Result;
use crate::tab_data::TabRecord;

/// Tab/window API of the host browser
///
/// Implemented over `chrome.tabs`/`browser.tabs` by `bridge::BrowserHost`
/// and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait TabHost {
    /// Every open tab in every window
    async fn query_tabs(&self) -> Result<Vec<TabRecord>>;

    /// URL of the active tab in the current window, if it has one
    async fn current_tab_url(&self) -> Result<Option<String>>;

    async fn close_tabs(&self, tab_ids: &[i32]) -> Result<()>;

    /// Move tabs into a freshly created, focused window
    async fn move_tabs_to_new_window(&self, tab_ids: &[i32]) -> Result<()>;

    /// Activate a tab and focus its window
    async fn focus_tab(&self, tab_id: i32) -> Result<()>;

    async fn open_results_page(&self) -> Result<()>;
}
