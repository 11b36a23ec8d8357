//! Search form to Solr query translation.
//!
//! A request's form fields are parsed into [`SearchParameters`], then
//! [`QueryBuilder`] folds the clause steps in [`clauses`] onto the collection
//! restriction and percent-encodes the result.

pub mod builder;
pub mod clauses;
pub mod error;
pub mod pagination;
pub mod params;

pub use builder::{encode_query, QueryBuilder};
pub use clauses::Clause;
pub use error::QueryError;
pub use pagination::{page_url, start_offset, PageLinks};
pub use params::{
    normalize_referrer_url, requested_page, FromParam, ParameterSource, SearchParameters,
    DEFAULT_FIRST_DATE, DEFAULT_SECOND_DATE, MAX_PAGE,
};
