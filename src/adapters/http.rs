use crate::core::PractitionerSource;
use crate::utils::error::{DirectoryError, Result};
use reqwest::Client;

pub const DEFAULT_FEED_URL: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// Fetches the practitioner feed with a single GET. No retry, no timeout.
pub struct HttpPractitionerSource {
    endpoint: String,
    client: Client,
}

impl HttpPractitionerSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl PractitionerSource for HttpPractitionerSource {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("API response status: {}", response.status());
        let response = response.error_for_status()?;

        match response.json::<serde_json::Value>().await? {
            serde_json::Value::Array(items) => {
                tracing::info!("Fetched {} practitioner entries", items.len());
                Ok(items)
            }
            other => Err(DirectoryError::ProcessingError {
                message: format!(
                    "expected a JSON array of practitioners, got {}",
                    json_kind(&other)
                ),
            }),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
