//! Solr clause steps.
//!
//! Each step maps [`SearchParameters`] to zero or more clauses. The steps run
//! in a fixed order and their output is concatenated, so every clause is
//! ANDed onto the collection restriction.

use super::params::SearchParameters;

/// Title field of the Dublin Core datastream.
pub const DC_TITLE: &str = "dc.title";
/// Description field of the Dublin Core datastream.
pub const DC_DESCRIPTION: &str = "dc.description";
/// Full OCR text of a book object.
pub const OCR_TEXT: &str = "OCR_BOOK_t";
pub const AUTHOR_NAME: &str = "mods_name_personal_author_namePart_t";
pub const TITLE: &str = "mods_titleInfo_title_t";
pub const CITY: &str = "mods_subject_hierarchicalGeographic_city_t";
pub const STATE: &str = "mods_subject_hierarchicalGeographic_state_s";
pub const GENRE: &str = "mods_genre_t";
pub const DATE_CREATED: &str = "mods_originInfo_dateCreated_dt";

/// A single conjunctive clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `AND (expr)`
    Require(String),
    /// `AND -(expr)`
    Exclude(String),
}

impl Clause {
    /// Require `expr`, or exclude it when `negate` is set.
    pub fn new(expr: String, negate: bool) -> Self {
        if negate {
            Clause::Exclude(expr)
        } else {
            Clause::Require(expr)
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Clause::Exclude(_))
    }

    /// Render with the leading ` AND ` conjunction.
    pub fn render(&self) -> String {
        match self {
            Clause::Require(expr) => format!(" AND ({})", expr),
            Clause::Exclude(expr) => format!(" AND -({})", expr),
        }
    }
}

/// A clause step.
pub type ClauseStep = fn(&SearchParameters) -> Vec<Clause>;

/// Every step, in output order.
pub const CLAUSE_STEPS: &[(&str, ClauseStep)] = &[
    ("free_text", free_text),
    ("all_terms", all_terms),
    ("any_terms", any_terms),
    ("phrase_terms", phrase_terms),
    ("none_terms", none_terms),
    ("author", author),
    ("title", title),
    ("location", location),
    ("genres", genres),
    ("date_range", date_range),
];

/// Run every step in order.
pub fn collect(params: &SearchParameters) -> Vec<Clause> {
    CLAUSE_STEPS
        .iter()
        .flat_map(|(_, step)| step(params))
        .collect()
}

/// Split an explicit-term field on spaces.
///
/// Runs of spaces do not produce empty terms.
pub fn split_terms(terms: &str) -> impl Iterator<Item = &str> {
    terms.split(' ').filter(|term| !term.is_empty())
}

/// Split a phrase field on the `" "` separator between quoted phrases.
///
/// Pieces are kept even when empty, and stray quotes are removed.
pub fn split_phrases(phrases: &str) -> Vec<String> {
    phrases
        .split("\" \"")
        .map(|phrase| phrase.replace('"', ""))
        .collect()
}

/// Suffix every space-separated token with `marker`.
fn mark_tokens(text: &str, marker: char) -> String {
    text.split(' ')
        .map(|token| format!("{}{}", token, marker))
        .collect::<Vec<_>>()
        .join(" ")
}

fn ocr_term(term: &str) -> String {
    format!("{}:\"{}\"", OCR_TEXT, term)
}

pub fn free_text(params: &SearchParameters) -> Vec<Clause> {
    let Some(query) = params.free_text.as_deref() else {
        return Vec::new();
    };

    let query = query.trim();
    let fuzzy = mark_tokens(query, '~');
    let prefix = mark_tokens(query, '*');

    let expr = [&fuzzy, &prefix]
        .iter()
        .flat_map(|variant| {
            [DC_TITLE, DC_DESCRIPTION, OCR_TEXT]
                .into_iter()
                .map(move |field| format!("{}:{}", field, variant))
        })
        .collect::<Vec<_>>()
        .join(" OR ");

    vec![Clause::Require(expr)]
}

pub fn all_terms(params: &SearchParameters) -> Vec<Clause> {
    params
        .all_terms
        .as_deref()
        .map(|terms| split_terms(terms).map(|t| Clause::Require(ocr_term(t))).collect())
        .unwrap_or_default()
}

pub fn any_terms(params: &SearchParameters) -> Vec<Clause> {
    let Some(terms) = params.any_terms.as_deref() else {
        return Vec::new();
    };

    let group: Vec<String> = split_terms(terms)
        .map(|t| format!("({})", ocr_term(t)))
        .collect();

    if group.is_empty() {
        return Vec::new();
    }

    vec![Clause::Require(group.join(" OR "))]
}

pub fn phrase_terms(params: &SearchParameters) -> Vec<Clause> {
    params
        .phrase_terms
        .as_deref()
        .map(|phrases| {
            split_phrases(phrases)
                .iter()
                .map(|p| Clause::Require(ocr_term(p)))
                .collect()
        })
        .unwrap_or_default()
}

pub fn none_terms(params: &SearchParameters) -> Vec<Clause> {
    params
        .none_terms
        .as_deref()
        .map(|terms| split_terms(terms).map(|t| Clause::Exclude(ocr_term(t))).collect())
        .unwrap_or_default()
}

pub fn author(params: &SearchParameters) -> Vec<Clause> {
    params
        .author
        .as_ref()
        .map(|author| {
            vec![Clause::new(
                format!("{}:{}", AUTHOR_NAME, author),
                params.exclude_author,
            )]
        })
        .unwrap_or_default()
}

pub fn title(params: &SearchParameters) -> Vec<Clause> {
    params
        .title
        .as_ref()
        .map(|title| vec![Clause::new(format!("{}:{}", TITLE, title), params.exclude_title)])
        .unwrap_or_default()
}

pub fn location(params: &SearchParameters) -> Vec<Clause> {
    params
        .location
        .as_ref()
        .map(|location| {
            vec![Clause::new(
                format!("({}:{}) OR ({}:{})", CITY, location, STATE, location),
                params.exclude_location,
            )]
        })
        .unwrap_or_default()
}

/// Genres that can be excluded, in output order.
pub fn excluded_genres(params: &SearchParameters) -> Vec<&'static str> {
    [
        (params.exclude_letters, "letter"),
        (params.exclude_telegrams, "telegram"),
        (params.exclude_documents, "document"),
        (params.exclude_drawings, "drawing"),
        (params.exclude_invoices, "invoice"),
    ]
    .into_iter()
    .filter_map(|(excluded, genre)| excluded.then_some(genre))
    .collect()
}

pub fn genres(params: &SearchParameters) -> Vec<Clause> {
    excluded_genres(params)
        .into_iter()
        .map(|genre| Clause::Exclude(format!("{}:{}", GENRE, genre)))
        .collect()
}

pub fn date_range(params: &SearchParameters) -> Vec<Clause> {
    if !params.has_date_range() {
        return Vec::new();
    }

    vec![Clause::new(
        format!(
            "{}:[{}T00:00:00Z TO {}T00:00:00Z]",
            DATE_CREATED, params.first_date, params.second_date
        ),
        params.exclude_dates,
    )]
}
