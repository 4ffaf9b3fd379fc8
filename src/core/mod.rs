pub mod engine;
pub mod normalizer;
pub mod query_codec;
pub mod suggestions;

pub use crate::domain::model::{
    ConsultationMode, FieldUpdate, PractitionerRecord, QueryDelta, QueryState, SortKey,
};
pub use crate::domain::ports::{ConfigProvider, Navigator, PractitionerSource};
pub use crate::utils::error::Result;
