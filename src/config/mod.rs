mod basic;
mod site;

pub use basic::BasicConfig;
pub use site::SiteConfig;

use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::LazyLock};

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Theme and page storage settings (see `site` table in config.toml).
    #[serde(default)]
    pub site: SiteConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const CONFIG_FILE_ENV: &str = "PAGEWRIGHT_CONFIG";

fn config_file() -> PathBuf {
    std::env::var_os(CONFIG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

impl Config {
    /// Builds a Figment that merges defaults and a config TOML file.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let path = config_file();
        if path.is_file() {
            figment.merge(Toml::file(path))
        } else {
            figment
        }
    }

    /// Loads configuration from the TOML file (with defaults) and validates required fields.
    pub fn from_toml() -> Self {
        let path = config_file();
        if !path.is_file() {
            panic!("config file not found: {}", path.display());
        }
        let cfg: Self = Self::figment().extract().unwrap_or_else(|err| {
            panic!(
                "failed to extract configuration from {}: {err}",
                path.display()
            )
        });
        if cfg.basic.admin_password.trim().is_empty() {
            panic!("basic.admin_password must be set and non-empty");
        }
        cfg
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_toml);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_extract_without_file() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .extract()
            .unwrap();
        assert_eq!(cfg.basic.listen_port, 8190);
        assert_eq!(cfg.basic.database_url, "sqlite://pages.db");
        assert_eq!(cfg.site.theme_path, PathBuf::from("theme/templates"));
        assert!(!cfg.basic.insecure_cookie);
    }

    #[test]
    fn toml_overrides_defaults() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [basic]
                listen_port = 9000
                admin_password = 12345

                [site]
                theme_path = "/srv/theme"
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(cfg.basic.listen_port, 9000);
        assert_eq!(cfg.basic.admin_password, "12345");
        assert_eq!(cfg.site.theme_path, PathBuf::from("/srv/theme"));
        assert_eq!(cfg.basic.loglevel, "info");
    }
}
