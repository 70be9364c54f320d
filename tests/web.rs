//! Tests for the JS-facing exports, run in a browser with wasm-pack
#![cfg(target_arch = "wasm32")]

use serde::Serialize;
use serde_json::json;
use tab_sweeper::{domain_key, group_tabs, search_tabs, url_matches};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn tabs_js() -> JsValue {
    let tabs = json!([
        { "id": 1, "url": "https://github.com/rust-lang", "title": "Rust", "index": 0, "windowId": 1, "lastAccessed": 1700000000000.0, "pinned": false },
        { "id": 2, "url": "https://www.google.com/", "title": "Google", "index": 1, "windowId": 1, "lastAccessed": 1700000000000.0, "pinned": false },
        { "id": 3, "url": "https://github.com/pinned", "title": "Pinned", "index": 2, "windowId": 1, "pinned": true }
    ]);
    tabs.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

#[wasm_bindgen_test]
fn test_domain_key_export() {
    assert_eq!(domain_key("https://a.b.mail.google.com/x"), "mail.google.com");
    assert_eq!(domain_key("about:blank"), "Other / Local");
}

#[wasm_bindgen_test]
fn test_url_matches_export() {
    assert_eq!(url_matches("*example.com/*", "https://www.example.com/path"), Ok(true));
    assert_eq!(url_matches("*example.com/*", "https://example.org/path"), Ok(false));
    assert!(url_matches("  ", "https://example.org/").is_err());
}

#[wasm_bindgen_test]
fn test_search_tabs_export() {
    let outcome: serde_json::Value =
        serde_wasm_bindgen::from_value(search_tabs(tabs_js(), "github.com/*").unwrap()).unwrap();

    assert_eq!(outcome["tabIds"], json!([1]));
    assert_eq!(outcome["pattern"], json!("*://github.com/*"));
    assert_eq!(outcome["statusMessage"], json!("Total matching tabs: 1"));
    assert_eq!(outcome["closeButtonLabel"], json!("Close Matching Tabs (1)"));
}

#[wasm_bindgen_test]
fn test_group_tabs_export() {
    let grouped: serde_json::Value =
        serde_wasm_bindgen::from_value(group_tabs(tabs_js(), "domain").unwrap()).unwrap();

    assert_eq!(grouped["title"], json!("All Open Tabs Grouped by Domain Name"));
    assert_eq!(grouped["groups"]["github.com"].as_array().unwrap().len(), 2);
    assert!(group_tabs(tabs_js(), "bogus").is_err());
}
