//! Relational store for pokedex records
//!
//! One SQLite connection is opened at startup and shared by every request.
//! Queries run on the blocking pool so the serving thread keeps accepting
//! while SQLite works. Reads and the favourite toggle are not sequenced
//! against each other; the last write wins.

mod row;
pub mod schema;

pub use row::{Row, Table};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::error::StoreError;

/// Shared handle to the pokedex database
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        Connection::open(path).map(Self::from_connection)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Connection::open_in_memory().map(Self::from_connection)
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Drop, recreate and seed the tables
    pub async fn initialize(&self) -> Result<usize, StoreError> {
        let conn = Arc::clone(&self.conn);
        let inserted =
            tokio::task::spawn_blocking(move || schema::initialize(&mut *conn.lock())).await??;
        Ok(inserted)
    }

    /// Run `f` against the connection on the blocking pool
    async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let value = tokio::task::spawn_blocking(move || f(&*conn.lock())).await??;
        Ok(value)
    }

    /// Fetch one row of `POKEDEX` by ID
    pub async fn row_by_id(&self, id: i64) -> Result<Option<Row>, StoreError> {
        self.run(move |conn| {
            conn.query_row(
                "SELECT * FROM POKEDEX WHERE ID = ?1",
                params![id],
                Row::from_sql,
            )
            .optional()
        })
        .await
    }

    /// Every row of `table`, ordered by ID
    pub async fn all_rows(&self, table: Table) -> Result<Vec<Row>, StoreError> {
        let sql = format!("SELECT * FROM {} ORDER BY ID", table.name());
        self.run(move |conn| collect_rows(conn, &sql, params![])).await
    }

    /// Rows of `POKEDEX` whose first or second type equals `type_tag`
    pub async fn rows_by_type(&self, type_tag: String) -> Result<Vec<Row>, StoreError> {
        self.run(move |conn| {
            collect_rows(
                conn,
                "SELECT * FROM POKEDEX WHERE TYPE1 = ?1 OR TYPE2 = ?1 ORDER BY ID",
                params![type_tag],
            )
        })
        .await
    }

    /// Rows of `POKEDEX` with exactly this ID (zero or one)
    pub async fn rows_by_id(&self, id: i64) -> Result<Vec<Row>, StoreError> {
        self.run(move |conn| {
            collect_rows(
                conn,
                "SELECT * FROM POKEDEX WHERE ID = ?1 ORDER BY ID",
                params![id],
            )
        })
        .await
    }

    /// Rows of `POKEDEX` marked as favourite
    pub async fn favourites(&self) -> Result<Vec<Row>, StoreError> {
        self.run(|conn| {
            collect_rows(
                conn,
                "SELECT * FROM POKEDEX WHERE PS = 1 ORDER BY ID",
                params![],
            )
        })
        .await
    }

    /// Set the favourite flag of one row and return the updated row
    ///
    /// `Ok(None)` when no row has this ID.
    pub async fn set_favourite(&self, id: i64, favourite: bool) -> Result<Option<Row>, StoreError> {
        self.run(move |conn| {
            let changed = conn.execute(
                "UPDATE POKEDEX SET PS = ?1 WHERE ID = ?2",
                params![favourite, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            conn.query_row(
                "SELECT * FROM POKEDEX WHERE ID = ?1",
                params![id],
                Row::from_sql,
            )
            .optional()
        })
        .await
    }
}

fn collect_rows(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> rusqlite::Result<Vec<Row>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, Row::from_sql)?
        .collect::<rusqlite::Result<Vec<_>>>();
    rows
}
