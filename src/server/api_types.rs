//! JSON response envelope for the search API.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::query::PageLinks;

/// Standard API response envelope.
///
/// ```json
/// { "error": false, "data": { ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub error: bool,
    pub data: T,
}

/// Error payload inside the envelope.
#[derive(Debug, Serialize)]
pub struct ErrorData {
    pub message: String,
}

impl ApiResponse<ErrorData> {
    pub fn error(status: StatusCode, message: impl Into<String>) -> impl IntoResponse {
        (
            status,
            Json(ApiResponse {
                error: true,
                data: ErrorData {
                    message: message.into(),
                },
            }),
        )
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<ApiResponse<T>> {
        Json(ApiResponse { error: false, data })
    }
}

/// A built backend query and the pagination links around it.
#[derive(Debug, Serialize)]
pub struct SearchQueryData {
    pub solr_url: String,
    pub page: usize,
    pub start: usize,
    pub referrer_url: String,
    pub previous_page_url: Option<String>,
    pub next_page_url: Option<String>,
}

impl SearchQueryData {
    pub fn new(solr_url: String, referrer_url: &str, links: PageLinks) -> Self {
        Self {
            solr_url,
            page: links.page,
            start: links.start,
            referrer_url: referrer_url.to_string(),
            previous_page_url: links.previous,
            next_page_url: links.next,
        }
    }
}

/// One page of search results.
#[derive(Debug, Serialize)]
pub struct SearchResultsData {
    pub query: SearchQueryData,
    pub num_found: u64,
    pub docs: Vec<serde_json::Value>,
}
