use rusqlite::Row;

/// Builds a model from a `SELECT *` row of its table.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
