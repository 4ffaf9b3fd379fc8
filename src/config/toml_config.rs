use crate::core::suggestions::DEFAULT_SUGGESTION_LIMIT;
use crate::core::ConfigProvider;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_PAGE_URL: &str = "http://localhost/doctors";
pub const MAX_SUGGESTION_LIMIT: usize = 20;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub view: Option<ViewConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub page_url: Option<String>,
    pub suggestion_limit: Option<usize>,
}

impl DirectoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIRECTORY_FEED_URL})；未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 只檢查檔案中實際填寫的值；缺少的欄位沿用預設值
    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.source.endpoint {
            validate_url("source.endpoint", endpoint)?;
        }
        validate_url("view.page_url", self.page_url())?;
        validate_range("view.suggestion_limit", self.suggestion_limit(), 1, MAX_SUGGESTION_LIMIT)?;
        Ok(())
    }
}

impl ConfigProvider for DirectoryConfig {
    fn api_endpoint(&self) -> &str {
        self.source.endpoint.as_deref().unwrap_or("")
    }

    fn page_url(&self) -> &str {
        self.view
            .as_ref()
            .and_then(|v| v.page_url.as_deref())
            .unwrap_or(DEFAULT_PAGE_URL)
    }

    fn suggestion_limit(&self) -> usize {
        self.view
            .as_ref()
            .and_then(|v| v.suggestion_limit)
            .unwrap_or(DEFAULT_SUGGESTION_LIMIT)
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
