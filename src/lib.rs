/// Tab Sweeper - browser extension for searching, bulk-closing and exporting tabs
/// Built with Rust + WASM

mod bridge;
pub mod domain;
pub mod error;
pub mod grouping;
pub mod host;
pub mod manager;
pub mod operations;
pub mod pattern;
pub mod results;
pub mod storage;
pub mod tab_data;

pub use bridge::{BrowserHost, BrowserStorage};
pub use error::{Result, TabError};
pub use grouping::{GroupedTabs, GroupingMode};
pub use pattern::CompiledPattern;
pub use tab_data::TabRecord;

use bridge::{from_js, js_error, to_js};
use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export core functions for JavaScript access
#[wasm_bindgen]
pub fn domain_key(url: &str) -> String {
    domain::domain_key(url)
}

#[wasm_bindgen]
pub fn url_matches(pattern: &str, url: &str) -> std::result::Result<bool, JsValue> {
    let pattern = operations::require_pattern(pattern).map_err(js_error)?;
    let compiled = CompiledPattern::compile(pattern).map_err(js_error)?;
    Ok(compiled.matches(url))
}

#[wasm_bindgen]
pub fn search_tabs(tabs: JsValue, pattern: &str) -> std::result::Result<JsValue, JsValue> {
    let tabs: Vec<TabRecord> = from_js(tabs).map_err(js_error)?;
    let outcome = operations::search_tabs(&tabs, pattern).map_err(js_error)?;
    to_js(&outcome).map_err(js_error)
}

#[wasm_bindgen]
pub fn group_tabs(tabs: JsValue, mode: &str) -> std::result::Result<JsValue, JsValue> {
    let tabs: Vec<TabRecord> = from_js(tabs).map_err(js_error)?;
    let grouped = grouping::group_tabs(&tabs, mode).map_err(js_error)?;
    to_js(&grouped).map_err(js_error)
}
