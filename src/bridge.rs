/// wasm-bindgen implementations of the host seams, and the async API the
/// popup and results page call
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::error::{Result as TabResult, TabError};
use crate::host::TabHost;
use crate::manager::TabManager;
use crate::storage::KeyValueStore;
use crate::tab_data::TabRecord;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn queryTabs() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getCurrentTabUrl() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn closeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveTabsToNewWindow(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn focusTab(tab_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openResultsPage() -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeStorage(key: &str) -> Result<(), JsValue>;
}

/// `tabs`/`windows` API of the running browser
pub struct BrowserHost;

/// `storage.local` of the running browser
pub struct BrowserStorage;

fn host_error(context: &str, e: JsValue) -> TabError {
    TabError::Host(format!("{}: {:?}", context, e))
}

/// Serialize with plain JS objects for maps, as storage and page scripts expect
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> TabResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| TabError::Serialization(format!("{:?}", e)))
}

pub(crate) fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> TabResult<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| TabError::Serialization(format!("{:?}", e)))
}

impl TabHost for BrowserHost {
    async fn query_tabs(&self) -> TabResult<Vec<TabRecord>> {
        let tabs_js = queryTabs()
            .await
            .map_err(|e| host_error("Failed to get tabs", e))?;
        from_js(tabs_js)
    }

    async fn current_tab_url(&self) -> TabResult<Option<String>> {
        let url_js = getCurrentTabUrl()
            .await
            .map_err(|e| host_error("Failed to get current tab", e))?;
        Ok(url_js.as_string())
    }

    async fn close_tabs(&self, tab_ids: &[i32]) -> TabResult<()> {
        closeTabs(to_js(tab_ids)?)
            .await
            .map_err(|e| host_error("Close failed", e))
    }

    async fn move_tabs_to_new_window(&self, tab_ids: &[i32]) -> TabResult<()> {
        moveTabsToNewWindow(to_js(tab_ids)?)
            .await
            .map_err(|e| host_error("Move failed", e))
    }

    async fn focus_tab(&self, tab_id: i32) -> TabResult<()> {
        focusTab(tab_id)
            .await
            .map_err(|e| host_error("Failed to switch to tab", e))
    }

    async fn open_results_page(&self) -> TabResult<()> {
        openResultsPage()
            .await
            .map_err(|e| host_error("Failed to open results page", e))
    }
}

impl KeyValueStore for BrowserStorage {
    async fn get(&self, key: &str) -> TabResult<Option<Value>> {
        let value_js = getStorage(key)
            .await
            .map_err(|e| TabError::Storage(format!("Failed to get {}: {:?}", key, e)))?;
        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }
        from_js(value_js).map(Some)
    }

    async fn set(&self, key: &str, value: Value) -> TabResult<()> {
        setStorage(key, to_js(&value)?)
            .await
            .map_err(|e| TabError::Storage(format!("Failed to save {}: {:?}", key, e)))
    }

    async fn remove(&self, key: &str) -> TabResult<()> {
        removeStorage(key)
            .await
            .map_err(|e| TabError::Storage(format!("Failed to remove {}: {:?}", key, e)))
    }
}

fn browser_manager() -> TabManager<BrowserHost, BrowserStorage> {
    TabManager::new(BrowserHost, BrowserStorage)
}

pub(crate) fn js_error(e: TabError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// Popup

#[wasm_bindgen]
pub async fn last_pattern() -> Result<JsValue, JsValue> {
    let pattern = browser_manager().last_pattern().await.map_err(js_error)?;
    Ok(pattern.map(JsValue::from).unwrap_or(JsValue::NULL))
}

#[wasm_bindgen]
pub async fn suggest_pattern() -> Result<JsValue, JsValue> {
    let pattern = browser_manager().suggest_pattern().await.map_err(js_error)?;
    Ok(pattern.map(JsValue::from).unwrap_or(JsValue::NULL))
}

#[wasm_bindgen]
pub async fn search_open_tabs(pattern: String) -> Result<JsValue, JsValue> {
    let outcome = browser_manager().search(&pattern).await.map_err(js_error)?;
    to_js(&outcome).map_err(js_error)
}

#[wasm_bindgen]
pub async fn export_open_tabs(mode: String) -> Result<JsValue, JsValue> {
    let grouped = browser_manager().export(&mode).await.map_err(js_error)?;
    to_js(&grouped).map_err(js_error)
}

// Popup and results page

#[wasm_bindgen]
pub async fn close_tabs(tab_ids: Vec<i32>) -> Result<JsValue, JsValue> {
    let outcome = browser_manager().close_tabs(&tab_ids).await.map_err(js_error)?;
    to_js(&outcome).map_err(js_error)
}

#[wasm_bindgen]
pub async fn move_tabs_to_new_window(tab_ids: Vec<i32>) -> Result<(), JsValue> {
    browser_manager()
        .move_tabs_to_new_window(&tab_ids)
        .await
        .map_err(js_error)
}

#[wasm_bindgen]
pub async fn go_to_tab(tab_id: i32) -> Result<(), JsValue> {
    browser_manager().go_to_tab(tab_id).await.map_err(js_error)
}

#[wasm_bindgen]
pub async fn load_results_view() -> Result<JsValue, JsValue> {
    let view = browser_manager().load_results().await.map_err(js_error)?;
    to_js(&view).map_err(js_error)
}
