//! Bulk data endpoints
//!
//! Fixed URLs that answer with every matching row as a JSON array, ordered
//! by ID.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::db::{Store, Table};
use crate::error::RequestError;
use crate::http;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEndpoint {
    Starters,
    Pokemons,
    FavouritesOn,
    /// Favourite filter switched off: the full list
    FavouritesOff,
}

pub const REGISTERED_ENDPOINTS: &[(&str, DataEndpoint)] = &[
    ("/startersData", DataEndpoint::Starters),
    ("/pokemonsData", DataEndpoint::Pokemons),
    ("/favoonData", DataEndpoint::FavouritesOn),
    ("/favooffData", DataEndpoint::FavouritesOff),
];

pub async fn handle(
    endpoint: DataEndpoint,
    store: &Store,
) -> Result<Response<Full<Bytes>>, RequestError> {
    let rows = match endpoint {
        DataEndpoint::Starters => store.all_rows(Table::Starters).await?,
        DataEndpoint::Pokemons | DataEndpoint::FavouritesOff => {
            store.all_rows(Table::Pokedex).await?
        }
        DataEndpoint::FavouritesOn => store.favourites().await?,
    };
    Ok(http::build_json_response(&rows))
}
