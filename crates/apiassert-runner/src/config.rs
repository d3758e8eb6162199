//! Runner configuration
//!
//! Read from a TOML file, usually `apiassert.toml`:
//!
//! ```toml
//! [case_paths]
//! smoke = "cases/smoke.json"
//!
//! [http]
//! base_url = "http://localhost:8080"
//! timeout_ms = 10000
//!
//! [logging]
//! profile = "development"
//! ```
//!
//! Relative case paths are resolved against the directory holding the
//! configuration file.

use apiassert_core::logging_facility::Profile;
use apiassert_core::{AssertError, Result};
use apiassert_core_types::Sensitive;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Case fixture file per suite name
    #[serde(alias = "case-path")]
    pub case_paths: BTreeMap<String, PathBuf>,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Prefix for request URLs that are not absolute
    pub base_url: Option<String>,
    pub timeout_ms: u64,
    /// Sent as `Authorization` unless a request sets its own
    pub auth_token: Option<Sensitive<String>>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            auth_token: None,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

impl RunnerConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Config`] if the file cannot be read or is not
    /// valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AssertError::Config {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|e| AssertError::Config {
            reason: format!("{}: {}", path.display(), config_reason(e)),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Config`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| AssertError::Config {
            reason: e.to_string(),
        })?;
        if config.http.timeout_ms == 0 {
            return Err(AssertError::Config {
                reason: "http.timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(config)
    }

    /// Case fixture file registered for `suite`
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Config`] for an unknown suite name.
    pub fn case_path(&self, suite: &str) -> Result<PathBuf> {
        let path = self
            .case_paths
            .get(suite)
            .ok_or_else(|| AssertError::Config {
                reason: format!(
                    "no case path configured for suite `{}` (known: {})",
                    suite,
                    self.case_paths.keys().cloned().collect::<Vec<_>>().join(", ")
                ),
            })?;
        Ok(match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.clone(),
        })
    }
}

fn config_reason(err: AssertError) -> String {
    match err {
        AssertError::Config { reason } => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RunnerConfig::from_toml_str("").unwrap();
        assert!(config.case_paths.is_empty());
        assert_eq!(config.http.base_url, None);
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.logging.profile, Profile::Development);
    }

    #[test]
    fn test_full_config() {
        let config = RunnerConfig::from_toml_str(
            r#"
            [case_paths]
            smoke = "cases/smoke.json"

            [http]
            base_url = "http://localhost:8080"
            timeout_ms = 2500
            auth_token = "Bearer s3cret"

            [logging]
            profile = "production"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.case_path("smoke").unwrap(),
            PathBuf::from("cases/smoke.json")
        );
        assert_eq!(config.http.timeout_ms, 2500);
        assert_eq!(config.logging.profile, Profile::Production);
        assert_eq!(
            config.http.auth_token.as_ref().map(|t| t.expose().as_str()),
            Some("Bearer s3cret")
        );
        assert!(!format!("{:?}", config).contains("s3cret"));
    }

    #[test]
    fn test_legacy_case_path_key() {
        let config = RunnerConfig::from_toml_str("[case-path]\nsmoke = \"a.json\"\n").unwrap();
        assert!(config.case_paths.contains_key("smoke"));
    }

    #[test]
    fn test_unknown_suite_is_config_error() {
        let config = RunnerConfig::from_toml_str("[case_paths]\nsmoke = \"a.json\"\n").unwrap();
        let err = config.case_path("nightly").unwrap_err();
        assert!(matches!(err, AssertError::Config { .. }));
        assert!(err.to_string().contains("smoke"));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = RunnerConfig::from_toml_str("[http\ntimeout_ms = 1").unwrap_err();
        assert!(matches!(err, AssertError::Config { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = RunnerConfig::from_toml_str("[http]\ntimeout_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_load_resolves_case_paths_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apiassert.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[case_paths]\nsmoke = \"cases/smoke.json\"").unwrap();

        let config = RunnerConfig::load(&path).unwrap();
        assert_eq!(
            config.case_path("smoke").unwrap(),
            dir.path().join("cases/smoke.json")
        );
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunnerConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, AssertError::Config { .. }));
    }
}
