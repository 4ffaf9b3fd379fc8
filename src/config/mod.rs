pub mod toml_config;

use crate::adapters::http::DEFAULT_FEED_URL;
use crate::core::suggestions::DEFAULT_SUGGESTION_LIMIT;
use crate::core::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use toml_config::{DEFAULT_PAGE_URL, MAX_SUGGESTION_LIMIT};
use url::Url;

#[cfg(feature = "cli")]
use crate::app::export::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "doctor-directory")]
#[command(about = "Search, filter and sort a practitioner directory feed")]
pub struct CliConfig {
    /// Practitioner feed URL (defaults to the public mock feed)
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Page address whose query string holds the search/filter/sort state
    #[arg(long)]
    pub url: Option<String>,

    /// Query string to apply to the page address, e.g. "specialty=Dentist&sort=fees"
    #[arg(short, long)]
    pub query: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Read commands from stdin instead of rendering once
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(long)]
    pub suggestion_limit: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges the optional TOML file with the flags; flags win.
    pub fn resolve(&self) -> Result<DirectorySettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = toml_config::DirectoryConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };

        let api_endpoint = self
            .api_endpoint
            .clone()
            .or_else(|| file.as_ref().and_then(|f| f.source.endpoint.clone()))
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        let page_url = self
            .url
            .clone()
            .or_else(|| file.as_ref().map(|f| f.page_url().to_string()))
            .unwrap_or_else(|| DEFAULT_PAGE_URL.to_string());

        let suggestion_limit = self
            .suggestion_limit
            .or_else(|| file.as_ref().map(|f| f.suggestion_limit()))
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT);

        let settings = DirectorySettings {
            api_endpoint,
            page_url,
            suggestion_limit,
        };

        match &self.query {
            Some(query) => settings.with_query(query),
            None => Ok(settings),
        }
    }
}

/// Effective settings after merging flags and the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorySettings {
    pub api_endpoint: String,
    pub page_url: String,
    pub suggestion_limit: usize,
}

impl DirectorySettings {
    /// Replaces the query part of `page_url`.
    pub fn with_query(mut self, query: &str) -> Result<Self> {
        let mut url =
            Url::parse(&self.page_url).map_err(|e| DirectoryError::InvalidConfigValueError {
                field: "page_url".to_string(),
                value: self.page_url.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        let query = query.strip_prefix('?').unwrap_or(query);
        url.set_query((!query.is_empty()).then_some(query));
        self.page_url = url.into();
        Ok(self)
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_FEED_URL.to_string(),
            page_url: DEFAULT_PAGE_URL.to_string(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

impl ConfigProvider for DirectorySettings {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn suggestion_limit(&self) -> usize {
        self.suggestion_limit
    }
}

impl Validate for DirectorySettings {
    fn validate(&self) -> Result<()> {
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_url("url", &self.page_url)?;
        validate_range("suggestion_limit", self.suggestion_limit, 1, MAX_SUGGESTION_LIMIT)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_replaces_query() {
        let settings = DirectorySettings {
            page_url: "https://doctors.example.com/listing?sort=fees".to_string(),
            ..DirectorySettings::default()
        }
        .with_query("?specialty=Dentist")
        .unwrap();

        assert_eq!(settings.page_url, "https://doctors.example.com/listing?specialty=Dentist");
        assert_eq!(
            settings.with_query("").unwrap().page_url,
            "https://doctors.example.com/listing"
        );
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(DirectorySettings::default().validate().is_ok());

        let settings = DirectorySettings {
            suggestion_limit: 0,
            ..DirectorySettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    fn config_file(content: &str) -> tempfile::NamedTempFile {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_flags_override_file() {
        let temp_file = config_file(concat!(
            "[source]\nendpoint = \"https://file.example.com/feed.json\"\n",
            "[view]\nsuggestion_limit = 7\npage_url = \"https://file.example.com/page\"\n",
        ));
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "doctor-directory",
            "--config",
            path.as_str(),
            "--suggestion-limit",
            "2",
            "--query",
            "sort=experience",
        ]);
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.api_endpoint, "https://file.example.com/feed.json");
        assert_eq!(settings.suggestion_limit, 2);
        assert_eq!(settings.page_url, "https://file.example.com/page?sort=experience");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_defaults() {
        let cli = CliConfig::parse_from(["doctor-directory"]);
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.resolve().unwrap(), DirectorySettings::default());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_view_only_file_falls_back_to_default_feed() {
        let temp_file = config_file("[view]\nsuggestion_limit = 5\n");
        let path = temp_file.path().to_str().unwrap().to_string();

        let settings = CliConfig::parse_from(["doctor-directory", "--config", path.as_str()])
            .resolve()
            .unwrap();

        assert_eq!(settings.api_endpoint, DEFAULT_FEED_URL);
        assert_eq!(settings.suggestion_limit, 5);
        assert_eq!(settings.page_url, DEFAULT_PAGE_URL);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_invalid_file_values_are_rejected() {
        let temp_file = config_file("[view]\nsuggestion_limit = 0\n");
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["doctor-directory", "--config", path.as_str()]);
        let result = cli.resolve();
        assert!(matches!(
            result,
            Err(DirectoryError::InvalidConfigValueError { ref field, .. })
                if field == "view.suggestion_limit"
        ));
    }
}
