//! Query command: print the backend URL for a set of form fields.

use console::style;

use crate::config::Config;
use crate::query::{start_offset, QueryBuilder, SearchParameters};

/// Split `key=value` arguments into form fields.
fn parse_fields(fields: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    fields
        .iter()
        .map(|field| {
            field
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| anyhow::anyhow!("Expected KEY=VALUE, got '{}'", field))
        })
        .collect()
}

pub fn cmd_query(
    config: &Config,
    fields: &[String],
    start: Option<usize>,
    page: usize,
    url: &str,
    raw: bool,
) -> anyhow::Result<()> {
    let form = parse_fields(fields)?;
    let params = SearchParameters::from_source(&form, url);
    let builder = QueryBuilder::new(&config.solr);
    let start = start.unwrap_or_else(|| start_offset(page, builder.page_size()));

    if raw {
        println!("{}", builder.raw_query(&params, start));
        return Ok(());
    }

    match builder.build_query(&params, start) {
        Ok(encoded) => {
            println!("{}", encoded);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            Err(e.into())
        }
    }
}
