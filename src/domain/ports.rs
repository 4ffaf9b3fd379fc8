use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the raw practitioner feed comes from.
#[async_trait]
pub trait PractitionerSource: Send + Sync {
    /// Fetches the feed as loosely-typed JSON items.
    async fn fetch(&self) -> Result<Vec<serde_json::Value>>;
}

/// The page address: the single source of truth for query state.
pub trait Navigator {
    /// Query string of the current address, without the leading `?`.
    fn current_query(&self) -> &str;

    /// Full navigation to the same path with a new query string.
    fn navigate(&mut self, query: &str);

    /// Returns `false` when there is no earlier entry.
    fn back(&mut self) -> bool;

    /// Returns `false` when there is no later entry.
    fn forward(&mut self) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn page_url(&self) -> &str;
    fn suggestion_limit(&self) -> usize;
}
