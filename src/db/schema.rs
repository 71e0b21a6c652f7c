//! SQLite schema and seed data
//!
//! `initialize` drops both tables, recreates them and inserts the fixed
//! records in a single transaction.

use rusqlite::{params, Connection, Result};

/// (id, name, type1, type2)
type Seed = (i64, &'static str, &'static str, Option<&'static str>);

const POKEDEX: &[Seed] = &[
    (1, "Bulbasaur", "Grass", Some("Poison")),
    (2, "Ivysaur", "Grass", Some("Poison")),
    (3, "Venusaur", "Grass", Some("Poison")),
    (4, "Charmander", "Fire", None),
    (5, "Charmeleon", "Fire", None),
    (6, "Charizard", "Fire", Some("Flying")),
    (7, "Squirtle", "Water", None),
    (8, "Wartortle", "Water", None),
    (9, "Blastoise", "Water", None),
    (10, "Caterpie", "Bug", None),
    (11, "Metapod", "Bug", None),
    (12, "Butterfree", "Bug", Some("Flying")),
    (13, "Weedle", "Bug", Some("Poison")),
    (14, "Kakuna", "Bug", Some("Poison")),
    (15, "Beedrill", "Bug", Some("Poison")),
    (16, "Pidgey", "Normal", Some("Flying")),
    (17, "Pidgeotto", "Normal", Some("Flying")),
    (18, "Pidgeot", "Normal", Some("Flying")),
    (19, "Rattata", "Normal", None),
    (20, "Raticate", "Normal", None),
    (21, "Spearow", "Normal", Some("Flying")),
    (22, "Fearow", "Normal", Some("Flying")),
    (23, "Ekans", "Poison", None),
    (24, "Arbok", "Poison", None),
    (25, "Pikachu", "Electric", None),
];

const STARTERS: &[i64] = &[1, 4, 7, 25];

fn create_table(conn: &Connection, table: &str) -> Result<()> {
    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table};
        CREATE TABLE {table} (
            ID INTEGER PRIMARY KEY,
            NAME TEXT NOT NULL,
            TYPE1 TEXT NOT NULL,
            TYPE2 TEXT,
            PS INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_{table}_types ON {table}(TYPE1, TYPE2);"
    ))
}

fn insert_seeds<'a>(
    conn: &Connection,
    table: &str,
    seeds: impl IntoIterator<Item = &'a Seed>,
) -> Result<usize> {
    let mut stmt = conn.prepare(&format!(
        "INSERT INTO {table} (ID, NAME, TYPE1, TYPE2, PS) VALUES (?1, ?2, ?3, ?4, 0)"
    ))?;
    let mut count = 0;
    for (id, name, type1, type2) in seeds {
        count += stmt.execute(params![id, name, type1, type2])?;
    }
    Ok(count)
}

/// Recreate and seed both tables, returning the number of rows inserted
pub fn initialize(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;

    create_table(&tx, "POKEDEX")?;
    create_table(&tx, "POKEDEX_STARTERS")?;

    let mut count = insert_seeds(&tx, "POKEDEX", POKEDEX)?;
    count += insert_seeds(
        &tx,
        "POKEDEX_STARTERS",
        POKEDEX.iter().filter(|(id, ..)| STARTERS.contains(id)),
    )?;

    tx.commit()?;
    Ok(count)
}
