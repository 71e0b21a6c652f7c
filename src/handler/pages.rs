//! Dynamic page handlers
//!
//! `/pokemon.html` renders one record into the page template, or toggles its
//! favourite flag. `/pokedex.html` answers filtered list queries. Both are
//! only reached when the request carries a query string; without one the
//! files are served as they are.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::io;

use super::static_files::disk_path;
use crate::config::AppState;
use crate::db::{Row, Table};
use crate::error::{NotFoundHint, RequestError};
use crate::http::{self, mime, query};
use crate::template;

/// Pages with parameter-driven behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// `/pokemon.html`: record page and favourite toggle
    Record,
    /// `/pokedex.html`: list query by type or ID
    Search,
}

pub const DYNAMIC_PAGES: &[(&str, Page)] = &[
    ("/pokemon.html", Page::Record),
    ("/pokedex.html", Page::Search),
];

const fn bad_params() -> RequestError {
    RequestError::NotFound(NotFoundHint::Params)
}

/// Dispatch a dynamic page request
pub async fn handle(
    page: Page,
    path: &str,
    raw_query: &str,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, RequestError> {
    let params = query::parse_query(raw_query);

    match page {
        Page::Record => match params.as_slice() {
            // The single parameter's value is the ID, whatever its name
            [(_, id)] => render_record(state, path, parse_id(id)?).await,
            // Positional: favourite flag, then ID
            [(_, flag), (_, id)] => toggle_favourite(state, parse_flag(flag)?, parse_id(id)?).await,
            _ => Err(bad_params()),
        },
        Page::Search => {
            let rows = match params.as_slice() {
                [("TYPE", "ALL")] => state.store.all_rows(Table::Pokedex).await?,
                [("TYPE", type_tag)] => state.store.rows_by_type((*type_tag).to_string()).await?,
                [("ID", id)] => state.store.rows_by_id(parse_id(id)?).await?,
                _ => return Err(bad_params()),
            };
            Ok(http::build_json_response(&rows))
        }
    }
}

fn parse_id(raw: &str) -> Result<i64, RequestError> {
    raw.parse().map_err(|_| bad_params())
}

fn parse_flag(raw: &str) -> Result<bool, RequestError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => raw.parse::<i64>().map(|n| n != 0).map_err(|_| bad_params()),
    }
}

async fn render_record(
    state: &AppState,
    path: &str,
    id: i64,
) -> Result<Response<Full<Bytes>>, RequestError> {
    let row = state.store.row_by_id(id).await?.ok_or_else(bad_params)?;

    let page = tokio::fs::read_to_string(disk_path(state, path))
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RequestError::NotFound(NotFoundHint::Case),
            _ => RequestError::Io(e),
        })?;

    Ok(http::build_content_response(render(&page, &row), mime::HTML))
}

async fn toggle_favourite(
    state: &AppState,
    favourite: bool,
    id: i64,
) -> Result<Response<Full<Bytes>>, RequestError> {
    let row = state
        .store
        .set_favourite(id, favourite)
        .await?
        .ok_or_else(bad_params)?;
    Ok(http::build_json_response(&[row]))
}

/// Fill the record template with one row
///
/// Tokens are matched in list order, so `PokemonNumber` is taken before
/// `Number` can match inside it. A favourite switches the star markup to its
/// "on" state.
pub fn render(page: &str, row: &Row) -> String {
    let id = row.id.to_string();
    let padded = row.padded_id();
    let mut substitutions = vec![
        ("PokemonName", row.name.as_str()),
        ("PokemonNumber", padded.as_str()),
        ("Number", id.as_str()),
        ("type1", row.type1.as_str()),
        ("type2", row.type2.as_deref().unwrap_or("")),
    ];
    if row.ps {
        substitutions.push(("id=\"off\"", "id=\"on\""));
        substitutions.push(("polystaroff", "polystaron"));
    }
    template::substitute(page, &substitutions)
}
