//! The compound catalog: store identifiers, statement builders and
//! post-processing of fetched rows.

pub mod query;
pub mod schema;
pub mod shaper;

pub use query::{build_api_query, build_listing_query};
pub use schema::Drugs;
pub use shaper::{TOP_N, renderable_columns, top_n};
