//! Search API handlers.

use std::collections::HashMap;

use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::api_types::{ApiResponse, SearchQueryData, SearchResultsData};
use super::AppState;
use crate::query::{requested_page, PageLinks, SearchParameters};

/// Build the backend query for a search form submission without running it.
pub async fn api_search_query(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(form): Query<HashMap<String, String>>,
) -> Response {
    let params = SearchParameters::from_source(&form, &uri.to_string());
    let builder = state.service.builder();
    let links = PageLinks::new(
        &params.normalized_referrer_url,
        requested_page(&form),
        builder.page_size(),
        None,
    );

    match builder.build_query(&params, links.start) {
        Ok(solr_url) => ApiResponse::ok(SearchQueryData::new(
            solr_url,
            &params.normalized_referrer_url,
            links,
        ))
        .into_response(),
        Err(e) => ApiResponse::error(StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

/// Run a search against the backend and return one page of results.
pub async fn api_search(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(form): Query<HashMap<String, String>>,
) -> Response {
    let params = SearchParameters::from_source(&form, &uri.to_string());
    let builder = state.service.builder();
    let page = requested_page(&form);
    let start = PageLinks::new(&params.normalized_referrer_url, page, builder.page_size(), None).start;

    let solr_url = match builder.build_query(&params, start) {
        Ok(url) => url,
        Err(e) => {
            return ApiResponse::error(StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    };

    let results = match state.service.fetch(&solr_url).await {
        Ok(results) => results,
        Err(e) => {
            tracing::warn!("Search backend request failed: {}", e);
            return ApiResponse::error(StatusCode::BAD_GATEWAY, e.to_string()).into_response();
        }
    };

    let links = PageLinks::new(
        &params.normalized_referrer_url,
        page,
        builder.page_size(),
        Some(results.response.num_found),
    );

    ApiResponse::ok(SearchResultsData {
        query: SearchQueryData::new(solr_url, &params.normalized_referrer_url, links),
        num_found: results.response.num_found,
        docs: results.response.docs,
    })
    .into_response()
}
