//! Pokedex record types

use serde::Serialize;

/// One catalog entry
///
/// Serialized with the column names as keys, which is what the site's
/// scripts read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Row {
    pub id: i64,
    pub name: String,
    pub type1: String,
    pub type2: Option<String>,
    /// Favourite flag
    pub ps: bool,
}

impl Row {
    pub(crate) fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("ID")?,
            name: row.get("NAME")?,
            type1: row.get("TYPE1")?,
            type2: row.get("TYPE2")?,
            ps: row.get("PS")?,
        })
    }

    /// ID padded to three digits, as printed on the record page
    pub fn padded_id(&self) -> String {
        format!("{:03}", self.id)
    }
}

/// Tables holding rows; never built from request input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Pokedex,
    Starters,
}

impl Table {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pokedex => "POKEDEX",
            Self::Starters => "POKEDEX_STARTERS",
        }
    }
}
