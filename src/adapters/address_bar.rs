use crate::core::Navigator;
use crate::utils::error::{DirectoryError, Result};
use url::Url;

/// In-process stand-in for the browser address bar: a page URL plus a
/// back/forward history of full navigations.
#[derive(Debug, Clone)]
pub struct AddressBar {
    history: Vec<Url>,
    cursor: usize,
}

impl AddressBar {
    pub fn new(page_url: &str) -> Result<Self> {
        let url = Url::parse(page_url).map_err(|e| DirectoryError::InvalidConfigValueError {
            field: "page_url".to_string(),
            value: page_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            history: vec![url],
            cursor: 0,
        })
    }

    pub fn current_url(&self) -> &Url {
        &self.history[self.cursor]
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Navigator for AddressBar {
    fn current_query(&self) -> &str {
        self.current_url().query().unwrap_or("")
    }

    fn navigate(&mut self, query: &str) {
        let mut next = self.current_url().clone();
        next.set_query((!query.is_empty()).then_some(query));
        tracing::debug!("Navigating to {}", next);

        // A new navigation drops the forward entries, as a browser does.
        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor += 1;
    }

    fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}
