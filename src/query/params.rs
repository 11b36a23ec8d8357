//! Typed search parameters parsed from a submitted search form.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::error::QueryError;

pub const DEFAULT_FIRST_DATE: &str = "1915-01-01";
pub const DEFAULT_SECOND_DATE: &str = "1945-12-31";

/// Matches the pagination parameter so links can be rebuilt with a new page.
static PAGE_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&?page=\d*").unwrap());

/// A value that can be read out of a raw form field.
pub trait FromParam: Sized {
    /// Human readable type name used in error messages.
    const EXPECTED: &'static str;

    fn from_param(raw: &str) -> Option<Self>;
}

impl FromParam for String {
    const EXPECTED: &'static str = "string";

    fn from_param(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromParam for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_param(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => None,
        }
    }
}

impl FromParam for usize {
    const EXPECTED: &'static str = "non-negative integer";

    fn from_param(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

/// A string-keyed source of form or query-string parameters.
pub trait ParameterSource {
    /// Raw value stored under `key`, if any.
    fn raw(&self, key: &str) -> Option<&str>;

    /// Look up `key` and convert it to `T`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    fn lookup<T: FromParam>(&self, key: &str) -> Result<Option<T>, QueryError> {
        match self.raw(key) {
            None => Ok(None),
            Some(raw) => T::from_param(raw)
                .map(Some)
                .ok_or_else(|| QueryError::InvalidParameter {
                    key: key.to_string(),
                    value: raw.to_string(),
                    expected: T::EXPECTED,
                }),
        }
    }
}

impl ParameterSource for HashMap<String, String> {
    fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn raw(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Pair lists keep the first occurrence of a key, as form parsers do.
impl ParameterSource for [(String, String)] {
    fn raw(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl ParameterSource for Vec<(String, String)> {
    fn raw(&self, key: &str) -> Option<&str> {
        self.as_slice().raw(key)
    }
}

/// Read `key`, collapsing conversion failures to `None`.
fn soft_lookup<T: FromParam, S: ParameterSource + ?Sized>(source: &S, key: &str) -> Option<T> {
    match source.lookup(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Ignoring search parameter: {}", e);
            None
        }
    }
}

/// Parameters of a single search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParameters {
    pub free_text: Option<String>,
    pub all_terms: Option<String>,
    pub any_terms: Option<String>,
    pub phrase_terms: Option<String>,
    pub none_terms: Option<String>,

    pub author: Option<String>,
    pub exclude_author: bool,

    pub title: Option<String>,
    pub exclude_title: bool,

    pub location: Option<String>,
    pub exclude_location: bool,

    pub exclude_letters: bool,
    pub exclude_telegrams: bool,
    pub exclude_documents: bool,
    pub exclude_drawings: bool,
    pub exclude_invoices: bool,

    pub first_date: String,
    pub second_date: String,
    pub exclude_dates: bool,

    /// Current search URL with any `page=<n>` parameter stripped.
    pub normalized_referrer_url: String,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            free_text: None,
            all_terms: None,
            any_terms: None,
            phrase_terms: None,
            none_terms: None,
            author: None,
            exclude_author: false,
            title: None,
            exclude_title: false,
            location: None,
            exclude_location: false,
            exclude_letters: false,
            exclude_telegrams: false,
            exclude_documents: false,
            exclude_drawings: false,
            exclude_invoices: false,
            first_date: DEFAULT_FIRST_DATE.to_string(),
            second_date: DEFAULT_SECOND_DATE.to_string(),
            exclude_dates: false,
            normalized_referrer_url: String::new(),
        }
    }
}

impl SearchParameters {
    /// Build parameters from a form or query-string map.
    ///
    /// Values that fail to convert are logged and leave the field at its
    /// default; construction itself never fails.
    pub fn from_source<S: ParameterSource + ?Sized>(source: &S, current_url: &str) -> Self {
        let defaults = Self::default();

        Self {
            free_text: soft_lookup(source, "query"),
            all_terms: soft_lookup(source, "all_explicit"),
            any_terms: soft_lookup(source, "any_explicit"),
            phrase_terms: soft_lookup(source, "phrase_explicit"),
            none_terms: soft_lookup(source, "none_explicit"),
            author: soft_lookup(source, "author"),
            exclude_author: soft_lookup(source, "exclude_author").unwrap_or_default(),
            title: soft_lookup(source, "title"),
            exclude_title: soft_lookup(source, "exclude_title").unwrap_or_default(),
            location: soft_lookup(source, "location"),
            exclude_location: soft_lookup(source, "exclude_location").unwrap_or_default(),
            exclude_letters: soft_lookup(source, "exclude_letters").unwrap_or_default(),
            exclude_telegrams: soft_lookup(source, "exclude_telegrams").unwrap_or_default(),
            exclude_documents: soft_lookup(source, "exclude_documents").unwrap_or_default(),
            exclude_drawings: soft_lookup(source, "exclude_drawings").unwrap_or_default(),
            exclude_invoices: soft_lookup(source, "exclude_invoices").unwrap_or_default(),
            first_date: soft_lookup(source, "first_date").unwrap_or(defaults.first_date),
            second_date: soft_lookup(source, "second_date").unwrap_or(defaults.second_date),
            exclude_dates: soft_lookup(source, "exclude_dates").unwrap_or_default(),
            normalized_referrer_url: normalize_referrer_url(current_url),
        }
    }

    /// Whether either date differs from its "no range selected" sentinel.
    pub fn has_date_range(&self) -> bool {
        self.first_date != DEFAULT_FIRST_DATE || self.second_date != DEFAULT_SECOND_DATE
    }
}

/// Remove every `page=<n>` parameter (and its leading `&`) from a URL.
pub fn normalize_referrer_url(url: &str) -> String {
    PAGE_PARAM.replace_all(url, "").into_owned()
}

/// Highest page number accepted from a request.
pub const MAX_PAGE: usize = 100_000;

/// Read the 1-based `page` parameter, falling back to the first page.
///
/// Zero and anything above [`MAX_PAGE`] count as invalid.
pub fn requested_page<S: ParameterSource + ?Sized>(source: &S) -> usize {
    soft_lookup::<usize, _>(source, "page")
        .filter(|page| (1..=MAX_PAGE).contains(page))
        .unwrap_or(1)
}
