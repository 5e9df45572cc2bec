//! Site branding configuration

use serde::Deserialize;

/// Branding shown by the hosted portal. Loaded once at startup and shared
/// process-wide through the application state.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Portal title
    #[serde(default = "default_title")]
    pub title: String,

    /// Support contact shown on billing pages
    #[serde(default)]
    pub support_email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            support_email: None,
        }
    }
}

fn default_title() -> String {
    "CliniCore".to_string()
}
