use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable that points at an explicit config file
pub const CONFIG_ENV: &str = "LANGINFLUENCE_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

/// Where the traversal starts
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    #[serde(default = "default_root_name")]
    pub root_name: String,
    #[serde(default = "default_root_locator")]
    pub root_locator: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
            root_locator: default_root_locator(),
            log_level: default_log_level(),
        }
    }
}

/// Remote knowledge source settings
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds. Unset means requests never time out.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// CSS selector for the infobox rows holding the relationship lists
    #[serde(default = "default_row_selector")]
    pub row_selector: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
            row_selector: default_row_selector(),
        }
    }
}

fn default_root_name() -> String {
    "Go".to_string()
}

fn default_root_locator() -> String {
    "/wiki/Go_(programming_language)".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_user_agent() -> String {
    format!("langinfluence/{}", env!("CARGO_PKG_VERSION"))
}

fn default_row_selector() -> String {
    "#mw-content-text > div > table.infobox.vevent > tbody > tr".to_string()
}

impl Config {
    /// Load configuration
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in LANGINFLUENCE_CONFIG environment variable
    /// 2. ./config.toml in current directory
    ///
    /// With neither present the built-in defaults are used. An explicitly named
    /// file that cannot be read is an error.
    pub fn load() -> Result<Self> {
        let _ = dotenv::dotenv();

        match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::load_from(PathBuf::from(path)),
            Err(_) => {
                let path = PathBuf::from("config.toml");
                if path.is_file() {
                    Self::load_from(path)
                } else {
                    log::debug!("No config.toml found, using built-in defaults");
                    let config = Config::default();
                    config.validate()?;
                    Ok(config)
                }
            }
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawl.root_name.trim().is_empty() {
            anyhow::bail!("crawl.root_name must not be empty");
        }

        if self.crawl.root_locator.trim().is_empty() {
            anyhow::bail!("crawl.root_locator must not be empty");
        }

        url::Url::parse(&self.source.base_url)
            .with_context(|| format!("source.base_url is not a valid URL: {}", self.source.base_url))?;

        if self.source.timeout_secs == Some(0) {
            anyhow::bail!("source.timeout_secs must be greater than 0 (omit it to disable the timeout)");
        }

        scraper::Selector::parse(&self.source.row_selector).map_err(|e| {
            anyhow::anyhow!("source.row_selector is not a valid selector: {:?}", e)
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_config_env(config_path: &std::path::Path, f: impl FnOnce()) {
        let original = std::env::var(CONFIG_ENV).ok();
        std::env::set_var(CONFIG_ENV, config_path.to_str().unwrap());
        f();
        std::env::remove_var(CONFIG_ENV);
        if let Some(val) = original {
            std::env::set_var(CONFIG_ENV, val);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawl.root_name, "Go");
        assert_eq!(config.crawl.root_locator, "/wiki/Go_(programming_language)");
        assert_eq!(config.source.base_url, "https://en.wikipedia.org");
        assert!(config.source.timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
[crawl]
root_name = "Oberon"
root_locator = "/wiki/Oberon_(programming_language)"
"#,
        )
        .unwrap();
        assert_eq!(config.crawl.root_name, "Oberon");
        assert_eq!(config.crawl.log_level, "info");
        assert_eq!(config.source.base_url, "https://en.wikipedia.org");
    }

    #[test]
    fn test_empty_root_rejected() {
        let err = Config::from_toml_str("[crawl]\nroot_name = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("root_name"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = Config::from_toml_str("[source]\nbase_url = \"not a url\"\n").unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Config::from_toml_str("[source]\ntimeout_secs = 0\n").is_err());
        let config = Config::from_toml_str("[source]\ntimeout_secs = 15\n").unwrap();
        assert_eq!(config.source.timeout_secs, Some(15));
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let err = Config::from_toml_str("[source]\nrow_selector = \"tr >> [\"\n").unwrap_err();
        assert!(err.to_string().contains("row_selector"));
    }

    #[test]
    fn test_config_load_from_env_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("langinfluence.toml");
        fs::write(
            &config_path,
            "[crawl]\nroot_name = \"C\"\nroot_locator = \"/wiki/C_(programming_language)\"\nlog_level = \"debug\"\n",
        )
        .unwrap();
        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.crawl.root_name, "C");
            assert_eq!(config.crawl.log_level, "debug");
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(std::path::Path::new("nonexistent.toml"), || {
            let config = Config::load();
            assert!(config.is_err());
        });
    }
}
