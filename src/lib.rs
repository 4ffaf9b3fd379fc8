pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{address_bar::AddressBar, http::HttpPractitionerSource};
pub use crate::app::page::{DirectoryPage, LoadState, PageView};
pub use crate::config::DirectorySettings;
pub use crate::core::{engine::apply, query_codec, suggestions::suggest};
pub use crate::domain::model::{
    ConsultationMode, FieldUpdate, PractitionerRecord, QueryDelta, QueryState, SortKey,
};
pub use crate::utils::error::{DirectoryError, Result};
