//! Assembles the Solr request URL for a search.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::clauses;
use super::error::QueryError;
use super::params::SearchParameters;
use crate::config::SolrConfig;

/// Characters left unescaped in a URL query component.
///
/// Everything outside `A-Z a-z 0-9 ! $ & ' ( ) * + , - . / : ; = ? @ _ ~`
/// is percent-encoded.
const QUERY_ALLOWED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'?')
    .remove(b'@')
    .remove(b'_')
    .remove(b'~');

/// Builds backend query URLs restricted to one collection.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    /// `<base_url>solr/`
    endpoint: String,
    /// Always-applied collection restriction.
    collection_clause: String,
    page_size: usize,
}

impl QueryBuilder {
    pub fn new(config: &SolrConfig) -> Self {
        let mut endpoint = config.base_url.clone();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        endpoint.push_str("solr/");

        Self {
            endpoint,
            collection_clause: format!(
                "(RELS_EXT_hasModel_uri_t:{} AND ancestors_ms:\"{}\")",
                config.model, config.ancestor
            ),
            page_size: config.page_size,
        }
    }

    /// Results returned per backend request.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The assembled request before percent-encoding.
    pub fn raw_query(&self, params: &SearchParameters, start: usize) -> String {
        let mut query = String::with_capacity(256);
        query.push_str(&self.endpoint);
        query.push_str(&self.collection_clause);

        for clause in clauses::collect(params) {
            query.push_str(&clause.render());
        }

        query.push_str(&format!(
            "?rows={}&omitHeader=true&wt=json&start={}",
            self.page_size, start
        ));
        query
    }

    /// Build the percent-encoded request URL starting at result `start`.
    pub fn build_query(&self, params: &SearchParameters, start: usize) -> Result<String, QueryError> {
        let raw = self.raw_query(params, start);
        let encoded = encode_query(&raw);

        url::Url::parse(&encoded).map_err(|e| QueryError::Encoding(format!("{}: {}", e, raw)))?;

        tracing::debug!("Built Solr query: {}", raw);
        Ok(encoded)
    }
}

/// Percent-encode everything that is not allowed in a URL query component.
pub fn encode_query(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_ALLOWED).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder {
        QueryBuilder::new(&SolrConfig {
            base_url: "http://islandora.example.edu:8080".to_string(),
            ..Default::default()
        })
    }

    const BASE: &str = "http://islandora.example.edu:8080/solr/\
        (RELS_EXT_hasModel_uri_t:bookCModel AND ancestors_ms:\"rekl:morgan-ms010\")";

    #[test]
    fn empty_parameters_yield_collection_clause_and_suffix() {
        let raw = builder().raw_query(&SearchParameters::default(), 30);
        assert_eq!(
            raw,
            format!("{}?rows=15&omitHeader=true&wt=json&start=30", BASE)
        );
    }

    #[test]
    fn encoded_query_escapes_spaces_and_quotes() {
        let encoded = builder()
            .build_query(&SearchParameters::default(), 0)
            .unwrap();
        assert_eq!(
            encoded,
            "http://islandora.example.edu:8080/solr/\
             (RELS_EXT_hasModel_uri_t:bookCModel%20AND%20ancestors_ms:%22rekl:morgan-ms010%22)\
             ?rows=15&omitHeader=true&wt=json&start=0"
        );
    }

    #[test]
    fn encoding_escapes_brackets_and_non_ascii() {
        assert_eq!(encode_query("[a TO b]"), "%5Ba%20TO%20b%5D");
        assert_eq!(encode_query("Zürich"), "Z%C3%BCrich");
        assert_eq!(encode_query("a~ b*"), "a~%20b*");
        assert_eq!(encode_query("100%#"), "100%25%23");
    }

    #[test]
    fn clauses_follow_documented_order() {
        let params = SearchParameters {
            free_text: Some("ship".to_string()),
            none_terms: Some("draft".to_string()),
            author: Some("Smith".to_string()),
            exclude_letters: true,
            first_date: "1920-01-01".to_string(),
            ..Default::default()
        };
        let raw = builder().raw_query(&params, 0);

        let free = raw.find("dc.title:ship~").unwrap();
        let none = raw.find("-(OCR_BOOK_t:\"draft\")").unwrap();
        let author = raw.find("(mods_name_personal_author_namePart_t:Smith)").unwrap();
        let genre = raw.find("-(mods_genre_t:letter)").unwrap();
        let date = raw.find("mods_originInfo_dateCreated_dt:[1920-01-01").unwrap();
        let suffix = raw.find("?rows=15").unwrap();

        assert!(free < none && none < author && author < genre && genre < date && date < suffix);
    }

    #[test]
    fn invalid_base_url_is_encoding_failure() {
        let builder = QueryBuilder::new(&SolrConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        let err = builder
            .build_query(&SearchParameters::default(), 0)
            .unwrap_err();
        assert!(matches!(err, QueryError::Encoding(_)));
    }

    #[test]
    fn custom_page_size_and_collection() {
        let builder = QueryBuilder::new(&SolrConfig {
            base_url: "http://localhost/".to_string(),
            page_size: 25,
            model: "sp_basic_image".to_string(),
            ancestor: "rekl:other".to_string(),
            ..Default::default()
        });
        assert_eq!(builder.page_size(), 25);
        assert_eq!(
            builder.raw_query(&SearchParameters::default(), 50),
            "http://localhost/solr/(RELS_EXT_hasModel_uri_t:sp_basic_image AND \
             ancestors_ms:\"rekl:other\")?rows=25&omitHeader=true&wt=json&start=50"
        );
    }
}
