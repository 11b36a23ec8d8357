//! morgan-search - full-text search over the Morgan manuscript collection.
//!
//! Translates search form submissions into Islandora Solr queries restricted
//! to a single archival collection, and serves them over a small JSON API.

pub mod cli;
pub mod config;
pub mod query;
pub mod server;
pub mod service;

pub use config::{Config, SolrConfig};
pub use query::{QueryBuilder, QueryError, SearchParameters};
pub use service::{IslandoraService, ServiceError};
