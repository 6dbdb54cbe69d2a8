use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Site content configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Directory holding one `<page>.html` template per page.
    /// TOML: `site.theme_path`. Default: `theme/templates`.
    #[serde(default = "default_theme_path")]
    pub theme_path: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            theme_path: default_theme_path(),
        }
    }
}

fn default_theme_path() -> PathBuf {
    PathBuf::from("theme/templates")
}
