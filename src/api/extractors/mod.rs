//! Custom request extractors.

mod api_query;
mod validated_json;

pub use api_query::ApiQuery;
pub use validated_json::{not_blank, ValidatedJson};
