//! Mapping between records and their `SQLite` table.

use std::fmt::Display;
use std::str::FromStr;

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Row, Sqlite};

use hospital_domain::record::Record;
use hospital_domain::time::{Date, Timestamp};

use crate::error::StorageError;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A record stored in its own table, keyed by a text `id` column.
///
/// `Unpin` lets rows decode through `sqlx`'s fetch streams.
pub trait Table: Record + Unpin + Sized {
    const TABLE: &'static str;

    /// Every column except `id`, in the order [`Table::bind_columns`] binds
    /// them.
    const COLUMNS: &'static [&'static str];

    /// Bind the values of [`Table::COLUMNS`] onto `query`.
    fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> Result<SqliteQuery<'q>, StorageError>;

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

/// A record whose table points at a parent table through a foreign key.
pub trait ChildOf<P: Table>: Table {
    const PARENT_COLUMN: &'static str;
}

/// Wrapper for converting database rows into records.
pub(crate) struct Wrapper<T>(pub T);

impl<'r, T: Table> FromRow<'r, SqliteRow> for Wrapper<T> {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        T::from_row(row).map(Self)
    }
}

pub(crate) fn insert_sql<T: Table>() -> String {
    format!(
        "INSERT INTO {} (id, {}) VALUES (?{})",
        T::TABLE,
        T::COLUMNS.join(", "),
        ", ?".repeat(T::COLUMNS.len())
    )
}

pub(crate) fn update_sql<T: Table>() -> String {
    let assignments: Vec<String> = T::COLUMNS.iter().map(|c| format!("{c} = ?")).collect();
    format!(
        "UPDATE {} SET {} WHERE id = ?",
        T::TABLE,
        assignments.join(", ")
    )
}

pub(crate) fn select_by_id_sql<T: Table>() -> String {
    format!("SELECT * FROM {} WHERE id = ?", T::TABLE)
}

pub(crate) fn select_all_sql<T: Table>() -> String {
    format!("SELECT * FROM {} ORDER BY rowid", T::TABLE)
}

pub(crate) fn delete_sql<T: Table>() -> String {
    format!("DELETE FROM {} WHERE id = ?", T::TABLE)
}

pub(crate) fn select_by_parent_sql<T: ChildOf<P>, P: Table>() -> String {
    format!(
        "SELECT c.* FROM {child} AS c JOIN {parent} AS p ON p.id = c.{column} WHERE p.id = ? ORDER BY c.rowid",
        child = T::TABLE,
        parent = P::TABLE,
        column = T::PARENT_COLUMN,
    )
}

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

pub(crate) fn get_id<I>(row: &SqliteRow, column: &str) -> Result<I, sqlx::Error>
where
    I: FromStr<Err = uuid::Error>,
{
    let value: String = row.try_get(column)?;
    I::from_str(&value).map_err(decode_error)
}

pub(crate) fn get_optional_id<I>(row: &SqliteRow, column: &str) -> Result<Option<I>, sqlx::Error>
where
    I: FromStr<Err = uuid::Error>,
{
    let value: Option<String> = row.try_get(column)?;
    value
        .map(|s| I::from_str(&s))
        .transpose()
        .map_err(decode_error)
}

pub(crate) fn get_timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let value: String = row.try_get(column)?;
    chrono::DateTime::parse_from_rfc3339(&value)
        .map(|ts| ts.with_timezone(&chrono::Utc))
        .map_err(decode_error)
}

pub(crate) fn get_optional_date(row: &SqliteRow, column: &str) -> Result<Option<Date>, sqlx::Error> {
    let value: Option<String> = row.try_get(column)?;
    value
        .map(|s| Date::from_str(&s))
        .transpose()
        .map_err(decode_error)
}

/// Text form of an optional foreign key.
pub(crate) fn optional_id<I: Display>(id: Option<I>) -> Option<String> {
    id.map(|id| id.to_string())
}
