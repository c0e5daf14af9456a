//! Application configuration structures.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DocError, Result};
use crate::models::{CasePolicy, DuplicateCheck, ParseOptions};
use crate::parsers::Site;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and extraction behavior settings
    #[serde(default)]
    pub searcher: SearcherConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration, returning `None` if the file does not exist.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Ok(Some(toml::from_str(&content)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path.as_ref());
                Ok(None)
            }
            Err(e) => Err(DocError::Io(e)),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.searcher.validate()?;
        if self.logging.level.trim().is_empty() {
            return Err(DocError::validation("logging.level is empty"));
        }
        Ok(())
    }
}

/// Search facade settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearcherConfig {
    /// Documentation site adapter
    #[serde(default = "defaults::site")]
    pub site: Option<Site>,

    /// Override for the site's base URL (must end with `/`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Identifier casing policy for map keys
    #[serde(default)]
    pub case: CasePolicy,

    /// Also list a type's functions among the package functions
    #[serde(default = "defaults::duplicate_type_functions")]
    pub duplicate_type_functions: bool,

    /// How duplicated type functions detect collisions
    #[serde(default)]
    pub duplicate_check: DuplicateCheck,

    /// Expand stdlib short names such as `http` to `net/http`
    #[serde(default)]
    pub expand_std_aliases: bool,
}

impl Default for SearcherConfig {
    fn default() -> Self {
        Self {
            site: defaults::site(),
            base_url: None,
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            case: CasePolicy::default(),
            duplicate_type_functions: defaults::duplicate_type_functions(),
            duplicate_check: DuplicateCheck::default(),
            expand_std_aliases: false,
        }
    }
}

impl SearcherConfig {
    /// Parser options derived from the policies in this config.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            case: self.case,
            duplicate_type_functions: self.duplicate_type_functions,
            duplicate_check: self.duplicate_check,
        }
    }

    /// Validate searcher settings.
    pub fn validate(&self) -> Result<()> {
        if self.site.is_none() {
            return Err(DocError::NoParser);
        }
        if self.user_agent.trim().is_empty() {
            return Err(DocError::validation("searcher.user_agent is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(DocError::validation("searcher.timeout_secs must be > 0"));
        }
        if let Some(base) = &self.base_url {
            let url = Url::parse(base)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(DocError::validation(format!(
                    "searcher.base_url must be http(s): {base}"
                )));
            }
            if !base.ends_with('/') {
                return Err(DocError::validation(format!(
                    "searcher.base_url must end with '/': {base}"
                )));
            }
        }
        Ok(())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    use crate::parsers::Site;

    pub fn site() -> Option<Site> {
        Some(Site::Pkgsite)
    }
    pub fn user_agent() -> String {
        concat!("godocs/", env!("CARGO_PKG_VERSION"), " (documentation viewer)").into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn duplicate_type_functions() -> bool {
        true
    }
    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.searcher.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.searcher.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_missing_site_is_no_parser() {
        let mut config = Config::default();
        config.searcher.site = None;
        assert!(matches!(config.validate(), Err(DocError::NoParser)));
    }

    #[test]
    fn validate_base_url() {
        let mut config = Config::default();
        config.searcher.base_url = Some("http://127.0.0.1:8080/".to_string());
        assert!(config.validate().is_ok());

        config.searcher.base_url = Some("http://127.0.0.1:8080".to_string());
        assert!(config.validate().is_err());

        config.searcher.base_url = Some("ftp://example.com/".to_string());
        assert!(config.validate().is_err());

        config.searcher.base_url = Some("not a url".to_string());
        assert!(matches!(config.validate(), Err(DocError::Url(_))));
    }

    #[test]
    fn load_partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[searcher]\nsite = \"godocs\"\ncase = \"sensitive\"\nduplicate_check = \"before_casing\"\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.searcher.site, Some(Site::Godocs));
        assert_eq!(config.searcher.case, CasePolicy::Sensitive);
        assert_eq!(config.searcher.duplicate_check, DuplicateCheck::BeforeCasing);
        assert!(config.searcher.duplicate_type_functions);
        assert_eq!(config.searcher.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn load_optional_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_optional(dir.path().join("godocs.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[searcher\nsite = ").unwrap();
        assert!(matches!(Config::load(file.path()), Err(DocError::Toml(_))));
    }
}
