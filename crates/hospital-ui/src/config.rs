//! Page-level configuration.
//!
//! The server may render a `<script type="application/json"
//! id="hospital-ui-config">` element. Every key is optional.

use log::LevelFilter;
use serde::Deserialize;

use crate::page::{Page, PageNode};

pub const CONFIG_ELEMENT_ID: &str = "hospital-ui-config";
pub const DEFAULT_AMBULANCE_STATS_URL: &str = "/analytics/ambulance";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Endpoint answering with the ambulance response-time aggregate.
    pub ambulance_stats_url: String,
    /// Endpoint serving a region map that replaces the built-in one.
    pub regions_url: Option<String>,
    pub log_level: LevelFilter,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            ambulance_stats_url: DEFAULT_AMBULANCE_STATS_URL.to_string(),
            regions_url: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the configuration element of `page`.
    ///
    /// A missing element means defaults. A malformed one is reported and
    /// also falls back to defaults.
    pub fn from_page<P: Page>(page: &P) -> Self {
        let Some(element) = page.element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let text = element.text();
        if text.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&text) {
            Ok(config) => config,
            Err(error) => {
                log::warn!("Ignoring malformed #{CONFIG_ELEMENT_ID}: {error}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_page::TestPage;

    #[test]
    fn test_missing_element_gives_defaults() {
        let page = TestPage::new();
        assert_eq!(PageConfig::from_page(&page), PageConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let page = TestPage::new();
        page.script(CONFIG_ELEMENT_ID)
            .set_text(r#"{"regions_url": "/static/regions.json", "log_level": "debug"}"#);

        let config = PageConfig::from_page(&page);
        assert_eq!(config.regions_url.as_deref(), Some("/static/regions.json"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.ambulance_stats_url, DEFAULT_AMBULANCE_STATS_URL);
    }

    #[test]
    fn test_malformed_config_gives_defaults() {
        let page = TestPage::new();
        page.script(CONFIG_ELEMENT_ID).set_text("{ regions_url: ");
        assert_eq!(PageConfig::from_page(&page), PageConfig::default());

        let page = TestPage::new();
        page.script(CONFIG_ELEMENT_ID).set_text(r#"{"unknown_key": 1}"#);
        assert_eq!(PageConfig::from_page(&page), PageConfig::default());
    }
}
