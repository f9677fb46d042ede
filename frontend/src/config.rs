use serde::Deserialize;
use web_sys::Document;

use crate::error::UiError;

/// Id of the optional inline JSON block that overrides [`LandingConfig`].
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Backend origin prefixed to every API path. Empty means same origin.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

/// Tunables for every landing and admin component.
///
/// All fields have defaults, so a page only needs to ship the keys it wants
/// to change:
///
/// ```html
/// <script type="application/json" id="landing-config">
///   { "products_autoplay_ms": 8000, "log_level": "debug" }
/// </script>
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub log_level: String,
    /// Height of the fixed header subtracted from anchor scroll targets.
    pub header_offset: f64,
    pub header_scrolled_threshold: f64,
    pub back_to_top_threshold: f64,
    /// How far ahead of the viewport top a section becomes active.
    pub section_lookahead: f64,
    pub products_autoplay_ms: u32,
    pub reviews_autoplay_ms: u32,
    pub swipe_threshold: f64,
    pub flash_timeout_ms: u32,
    pub fade_out_ms: u32,
    pub autosave_debounce_ms: u32,
    pub notification_ms: u32,
    pub default_language: String,
    pub supported_languages: Vec<String>,
    pub messages: Messages,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            header_offset: 80.0,
            header_scrolled_threshold: 100.0,
            back_to_top_threshold: 300.0,
            section_lookahead: 100.0,
            products_autoplay_ms: 6000,
            reviews_autoplay_ms: 5000,
            swipe_threshold: 50.0,
            flash_timeout_ms: 5000,
            fade_out_ms: 300,
            autosave_debounce_ms: 2000,
            notification_ms: 3000,
            default_language: "ru".to_string(),
            supported_languages: vec!["ru".to_string(), "lv".to_string(), "en".to_string()],
            messages: Messages::default(),
        }
    }
}

/// User-visible strings. `{n}` in `review_dot_label` is replaced by the
/// one-based slide number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub contact_sent: String,
    pub subscribed: String,
    pub review_dot_label: String,
    pub required_field: String,
    pub invalid_email: String,
    pub confirm_delete: String,
    pub saved_locally: String,
    pub copied: String,
    pub copy_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            contact_sent: "Thank you! We will contact you shortly.".to_string(),
            subscribed: "Thank you for subscribing!".to_string(),
            review_dot_label: "Go to review {n}".to_string(),
            required_field: "This field is required".to_string(),
            invalid_email: "Enter a valid email address".to_string(),
            confirm_delete: "Are you sure you want to delete this item?".to_string(),
            saved_locally: "Saved locally".to_string(),
            copied: "Copied to clipboard".to_string(),
            copy_failed: "Copy failed".to_string(),
        }
    }
}

impl Messages {
    pub fn review_dot_label(&self, index: usize) -> String {
        self.review_dot_label.replace("{n}", &(index + 1).to_string())
    }
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline config block if the page has one. A malformed block
    /// is reported and the defaults are used instead.
    pub fn load(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring landing config: {}", e);
                Self::default()
            }
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn is_supported_language(&self, lang: &str) -> bool {
        self.supported_languages.iter().any(|l| l == lang)
    }
}
