use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::api::fetch::{DEFAULT_TIMEOUT_SECS, HttpFetcher, USER_AGENT};
use crate::domain::Format;
use crate::error::Result;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

/// Defaults for requests issued by the `geocode` binary
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub format: Format,
    #[serde(default)]
    pub sensor: bool,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            https: false,
            format: Format::default(),
            sensor: false,
            region: None,
            language: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl FileConfig {
    /// First parseable config file from the search path, if any
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => warn!(path = %path.display(), "failed to parse config file: {}", e),
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::with_options(&self.user_agent, self.timeout())
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("geocoder.toml"),
        PathBuf::from(".geocoder.toml"),
    ];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geocoder").join("config.toml"));
        paths.push(config_dir.join("geocoder.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geocoder.toml"));
        paths.push(home.join(".config").join("geocoder").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "https = true\nformat = \"xml\"\nregion = \"es\"\nlanguage = \"es\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = FileConfig::from_path(file.path()).unwrap();
        assert!(config.https);
        assert_eq!(config.format, Format::Xml);
        assert_eq!(config.region.as_deref(), Some("es"));
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.sensor);
        assert!(config.fetcher().is_ok());
    }

    #[test]
    fn test_from_path_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format = \"yaml\"").unwrap();
        assert!(FileConfig::from_path(file.path()).is_err());
        assert!(FileConfig::from_path(Path::new("/definitely/not/here.toml")).is_err());
    }

    #[test]
    fn test_search_paths_start_in_cwd() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("geocoder.toml"));
        assert_eq!(paths[1], PathBuf::from(".geocoder.toml"));
    }
}
