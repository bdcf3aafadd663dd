//! Read-only access to the per-callee morpheme weight model.
//!
//! The model is a single-table SQLite database produced by the offline
//! statistics pipeline:
//!
//! ```sql
//! CREATE TABLE weights (
//!     func TEXT NOT NULL,
//!     arg INTEGER NOT NULL CHECK(arg >= 0),
//!     morpheme TEXT NOT NULL,
//!     value REAL NOT NULL CHECK(value >= 0 AND value <= 1)
//! );
//! ```
//!
//! A row records how often `morpheme` was observed in the argument at
//! zero-based position `arg` of calls to `func`. For a fixed
//! `(func, arg)` the stored weights are scaled to sum to 1.
//!
//! This crate never writes to a model. The [`fixture`] module (behind the
//! `fixtures` feature) builds throwaway databases for tests.

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeightsDbError {
    /// The file could not be opened as a SQLite database.
    #[error("cannot open weights database: {0}")]
    Open(#[source] rusqlite::Error),
    /// The database opened but does not contain the weights schema.
    #[error("weights database has no usable weights table: {0}")]
    Schema(#[source] rusqlite::Error),
    /// A query against a valid database failed.
    #[error(transparent)]
    Query(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, WeightsDbError>;

/// A read-only handle on a weights database.
///
/// The connection is opened once and held for the handle's lifetime;
/// dropping the handle releases it on every exit path. The underlying
/// connection is single-threaded, so the handle is `Send` but not
/// `Sync` — concurrent readers each open their own.
#[derive(Debug)]
pub struct WeightsDb {
    conn: Connection,
}

const WEIGHT_QUERY: &str =
    "SELECT value FROM weights WHERE func = ?1 AND arg = ?2 AND morpheme = ?3";
const POSITION_QUERY: &str = "SELECT morpheme, value FROM weights WHERE func = ?1 AND arg = ?2";

impl WeightsDb {
    /// Opens `path` read-only and verifies the weights schema is present.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(WeightsDbError::Open)?;

        // Preparing the queries up front both validates the schema and
        // lets a caller decide to run without statistics before any
        // lookup happens.
        conn.prepare(WEIGHT_QUERY).map_err(WeightsDbError::Schema)?;
        conn.prepare(POSITION_QUERY).map_err(WeightsDbError::Schema)?;

        Ok(Self { conn })
    }

    /// How often `morpheme` appears at zero-based position `arg_pos` of
    /// calls to `func`. 0.0 when the function, position, or morpheme has
    /// no row.
    pub fn weight_at(&self, func: &str, arg_pos: usize, morpheme: &str) -> Result<f32> {
        let mut stmt = self.conn.prepare_cached(WEIGHT_QUERY)?;
        let weight: Option<f64> = stmt
            .query_row(params![func, arg_pos as i64, morpheme], |row| row.get(0))
            .optional()?;
        Ok(weight.unwrap_or(0.0) as f32)
    }

    /// Every morpheme observed at `arg_pos` of `func` with its scaled
    /// weight, or `None` when the position has no rows at all.
    pub fn morphemes_and_weights_at(
        &self,
        func: &str,
        arg_pos: usize,
    ) -> Result<Option<Vec<(String, f32)>>> {
        let mut stmt = self.conn.prepare_cached(POSITION_QUERY)?;
        let rows = stmt
            .query_map(params![func, arg_pos as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)? as f32))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(if rows.is_empty() { None } else { Some(rows) })
    }
}
