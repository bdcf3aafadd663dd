//! Test-only construction of weights databases.

use rusqlite::{params, Connection};
use tempfile::{NamedTempFile, TempPath};

/// One `(func, arg, morpheme, weight)` row.
pub type Row<'a> = (&'a str, u32, &'a str, f64);

/// Builds a weights database containing `rows` in a fresh temporary
/// file. The file is deleted when the returned path guard drops.
///
/// Panics on I/O or SQLite failure; this is test scaffolding, not a
/// production surface.
pub fn weights_db(rows: &[Row]) -> TempPath {
    let file = NamedTempFile::new().expect("create temporary weights database");
    let conn = Connection::open(file.path()).expect("open temporary weights database");
    conn.execute_batch(
        "CREATE TABLE weights (
             func TEXT NOT NULL,
             arg INTEGER NOT NULL CHECK(arg >= 0),
             morpheme TEXT NOT NULL,
             value REAL NOT NULL CHECK(value >= 0 AND value <= 1)
         );",
    )
    .expect("create weights table");

    let mut insert = conn
        .prepare("INSERT INTO weights (func, arg, morpheme, value) VALUES (?1, ?2, ?3, ?4)")
        .expect("prepare weights insert");
    for (func, arg, morpheme, weight) in rows {
        insert
            .execute(params![func, arg, morpheme, weight])
            .expect("insert weights row");
    }
    drop(insert);

    file.into_temp_path()
}
