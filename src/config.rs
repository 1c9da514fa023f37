use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONFIG_FILE: &str = "study_tools.toml";

/// Runtime configuration, read from an optional TOML file and then from
/// `STUDY_TOOLS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base address of the summarization/quiz service.
    pub backend_url: String,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    /// `EnvFilter` directive, e.g. `info` or `study_tools=debug`.
    pub log_filter: String,
    /// Where exported study sheets are written.
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: None,
            log_file: PathBuf::from("study_tools.log"),
            log_filter: "info".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration for the binary: file named by `STUDY_TOOLS_CONFIG`
    /// (or `study_tools.toml` when it exists), then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var("STUDY_TOOLS_CONFIG").ok().map(PathBuf::from);
        let base = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STUDY_TOOLS_*` overrides using `lookup` as the variable source.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STUDY_TOOLS_BACKEND_URL") {
            self.backend_url = url;
        }
        if let Some(secs) = lookup("STUDY_TOOLS_TIMEOUT_SECS") {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "STUDY_TOOLS_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
            self.request_timeout_secs = Some(parsed);
        }
        if let Some(file) = lookup("STUDY_TOOLS_LOG_FILE") {
            self.log_file = PathBuf::from(file);
        }
        if let Some(filter) = lookup("STUDY_TOOLS_LOG") {
            self.log_filter = filter;
        }
        if let Some(dir) = lookup("STUDY_TOOLS_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.backend_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::InvalidUrl(self.backend_url.clone())),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Absolute URL for an API path such as `/api/summarize`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.backend_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), None);
        assert_eq!(
            config.endpoint("/api/summarize"),
            "http://localhost:5000/api/summarize"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
backend_url = "http://10.0.0.5:8080/"
request_timeout_secs = 30
"#,
        )
        .unwrap();
        assert_eq!(config.endpoint("api/generate-quiz"), "http://10.0.0.5:8080/api/generate-quiz");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_env_overrides_win() {
        let config = Config::default()
            .with_overrides(lookup_from(&[
                ("STUDY_TOOLS_BACKEND_URL", "https://study.example.com"),
                ("STUDY_TOOLS_LOG", "debug"),
                ("STUDY_TOOLS_EXPORT_DIR", "/tmp/sheets"),
            ]))
            .unwrap();
        assert_eq!(config.backend_url, "https://study.example.com");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/sheets"));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let result = Config::default()
            .with_overrides(lookup_from(&[("STUDY_TOOLS_BACKEND_URL", "ftp://files")]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));

        let result = Config::from_toml_str(r#"backend_url = "not a url""#);
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let result = Config::default()
            .with_overrides(lookup_from(&[("STUDY_TOOLS_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_from_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::from_file(&missing),
            Err(ConfigError::Read { .. })
        ));
    }
}
