//! Defines the sales record model and its database table.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for record IDs.
pub type RecordId = i64;

/// A single sale: an item with a price and category that sold at some point in time.
///
/// To create a new `Record`, use [Record::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// The ID of the record, unique across the store.
    pub id: RecordId,
    /// The name of the item that sold.
    pub title: String,
    /// A free text description of the item.
    pub description: String,
    /// The sale price, never negative.
    pub price: f64,
    /// An open-ended label such as "electronics" or "men's clothing".
    pub category: String,
    /// A link to a picture of the item, if the feed provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// When the item sold, in the offset it was recorded with.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
}

impl Record {
    /// Create a new record.
    ///
    /// Shortcut for [RecordBuilder] for discoverability.
    pub fn build(id: RecordId, price: f64, date_of_sale: OffsetDateTime) -> RecordBuilder {
        RecordBuilder {
            id,
            title: String::new(),
            description: String::new(),
            price,
            category: String::new(),
            image: None,
            date_of_sale,
        }
    }
}

/// A builder for creating [Record] instances.
///
/// The text fields default to empty strings and the image to `None`.
///
/// # Examples
///
/// ```
/// use sales_report::Record;
/// use time::macros::datetime;
///
/// let record = Record::build(1, 329.85, datetime!(2021-11-27 20:29:54 +05:30))
///     .title("Backpack")
///     .category("men's clothing")
///     .finish();
///
/// assert_eq!(record.title, "Backpack");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordBuilder {
    id: RecordId,
    title: String,
    description: String,
    price: f64,
    category: String,
    image: Option<String>,
    date_of_sale: OffsetDateTime,
}

impl RecordBuilder {
    /// Set the title of the record.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    /// Set the description of the record.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category of the record.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the image URL of the record.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_owned);
        self
    }

    /// Create the [Record].
    pub fn finish(self) -> Record {
        Record {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            date_of_sale: self.date_of_sale,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected by every record query, in the order expected by [map_record_row].
pub(crate) const RECORD_COLUMNS: &str =
    "id, title, description, price, category, image, date_of_sale";

/// Create the record table in the database.
///
/// The calendar month of `date_of_sale` is stored in `sale_month` so that
/// month filters compare a date component rather than matching text.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale_record (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                image TEXT,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12)
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_record_month ON sale_record(sale_month);",
        (),
    )?;

    Ok(())
}

/// Insert `record` into the database.
///
/// # Errors
/// Returns [Error::SqlError] if the ID already exists, the price is negative,
/// or there is some other SQL error.
pub fn insert_record(record: &Record, connection: &Connection) -> Result<(), Error> {
    connection
        .prepare_cached(
            "INSERT INTO sale_record
                (id, title, description, price, category, image, date_of_sale, sale_month)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?
        .execute((
            record.id,
            &record.title,
            &record.description,
            record.price,
            &record.category,
            &record.image,
            record.date_of_sale,
            u8::from(record.date_of_sale.month()),
        ))?;

    Ok(())
}

/// Replace every record in the database with `records`.
///
/// The delete and inserts run in one SQL transaction, so on error the
/// previous records are left untouched.
///
/// # Errors
/// Returns [Error::SqlError] if any insert fails.
pub fn replace_all_records(records: &[Record], connection: &Connection) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    let deleted = transaction.execute("DELETE FROM sale_record", ())?;
    tracing::debug!("Deleted {deleted} existing records");

    for record in records {
        insert_record(record, &transaction)?;
    }

    transaction.commit()?;

    Ok(records.len())
}

/// Get the total number of records in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_records(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM sale_record;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Map a database row selected with [RECORD_COLUMNS] to a [Record].
pub(crate) fn map_record_row(row: &Row) -> Result<Record, rusqlite::Error> {
    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        date_of_sale: row.get(6)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
