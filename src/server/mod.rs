//! Web server exposing the collection search.
//!
//! - `GET /api/search/query` builds the backend query for a search form
//! - `GET /api/search` runs it and returns one page of results

mod api_types;
mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::service::IslandoraService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IslandoraService>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(IslandoraService::new(&config.solr)?),
        })
    }
}

/// Start the web server.
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::SolrConfig;

    fn setup_test_app(base_url: &str) -> axum::Router {
        let config = Config {
            solr: SolrConfig {
                base_url: base_url.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        create_router(AppState::new(&config).unwrap())
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_search_query_defaults() {
        let app = setup_test_app("http://islandora.example.edu/");
        let (status, json) = get_json(app, "/api/search/query").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["error"], false);
        assert_eq!(json["data"]["page"], 1);
        assert_eq!(json["data"]["start"], 0);
        assert!(json["data"]["previous_page_url"].is_null());
        assert_eq!(
            json["data"]["solr_url"],
            "http://islandora.example.edu/solr/\
             (RELS_EXT_hasModel_uri_t:bookCModel%20AND%20ancestors_ms:%22rekl:morgan-ms010%22)\
             ?rows=15&omitHeader=true&wt=json&start=0"
        );
    }

    #[tokio::test]
    async fn test_search_query_with_form_fields() {
        let app = setup_test_app("http://islandora.example.edu/");
        let (status, json) = get_json(
            app,
            "/api/search/query?query=ship&exclude_letters=on&author=Smith&exclude_author=true&page=3",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["page"], 3);
        assert_eq!(data["start"], 30);
        assert_eq!(
            data["referrer_url"],
            "/api/search/query?query=ship&exclude_letters=on&author=Smith&exclude_author=true"
        );
        assert_eq!(
            data["previous_page_url"],
            "/api/search/query?query=ship&exclude_letters=on&author=Smith&exclude_author=true&page=2"
        );

        let solr_url = data["solr_url"].as_str().unwrap();
        assert!(solr_url.contains("dc.title:ship~"));
        assert!(solr_url.contains("-(mods_genre_t:letter)"));
        assert!(solr_url.contains("-(mods_name_personal_author_namePart_t:Smith)"));
        assert!(solr_url.ends_with("start=30"));
    }

    #[tokio::test]
    async fn test_search_query_huge_page_falls_back() {
        let app = setup_test_app("http://islandora.example.edu/");
        let (status, json) =
            get_json(app, "/api/search/query?query=ship&page=18446744073709551615").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["page"], 1);
        assert_eq!(json["data"]["start"], 0);
        assert!(json["data"]["previous_page_url"].is_null());
        assert!(json["data"]["solr_url"].as_str().unwrap().ends_with("start=0"));
    }

    #[tokio::test]
    async fn test_search_query_encoding_failure() {
        let app = setup_test_app("not a url");
        let (status, json) = get_json(app, "/api/search/query?query=ship").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], true);
        assert!(json["data"]["message"]
            .as_str()
            .unwrap()
            .contains("Failed to encode search query"));
    }

    #[tokio::test]
    async fn test_search_backend_unreachable() {
        let app = setup_test_app("http://127.0.0.1:9/");
        let (status, json) = get_json(app, "/api/search?query=ship").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"], true);
    }
}
