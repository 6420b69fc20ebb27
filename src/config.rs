//! Runtime Configuration
//!
//! Optional `window.LOAN_DESK_CONFIG` object set by the hosting page; every
//! field falls back to a default.

use serde::Deserialize;

use crate::pagination::PageConfig;

pub const CONFIG_GLOBAL: &str = "LOAN_DESK_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Absolute API root. Derived from the page origin when unset.
    pub api_base: Option<String>,
    pub page_size: u64,
    pub max_offset: u64,
    pub display_page_size: u64,
    /// Rows per page on the loans list
    pub loans_page_size: u64,
    pub login_route: String,
    pub search_debounce_ms: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            page_size: 50,
            max_offset: 500,
            display_page_size: 50,
            loans_page_size: 20,
            login_route: "/login".to_string(),
            search_debounce_ms: 300,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read the page-provided config; defaults when absent or invalid.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()).unwrap_or(wasm_bindgen::JsValue::UNDEFINED);
        let mut config = if raw.is_undefined() || raw.is_null() {
            Self::default()
        } else {
            serde_wasm_bindgen::from_value(raw).unwrap_or_else(|e| {
                web_sys::console::warn_1(&format!("[CONFIG] ignoring invalid {}: {}", CONFIG_GLOBAL, e).into());
                Self::default()
            })
        };
        if config.api_base.is_none() {
            config.api_base = window.location().origin().ok().map(|origin| api_base_for(&origin));
        }
        config
    }

    pub fn page_config(&self) -> PageConfig {
        PageConfig {
            page_size: self.page_size.max(1),
            max_offset: self.max_offset,
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or_default()
    }
}

pub fn api_base_for(origin: &str) -> String {
    format!("{}/api", origin.trim_end_matches('/'))
}
