//! Implements a SQLite backed record store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params_from_iter, types::Value};

use crate::{
    Error,
    db::MATCHES_SEARCH_FUNCTION,
    record::{MonthFilter, RECORD_COLUMNS, Record, RecordFilter, map_record_row},
    report::CategoryCount,
    stores::{RecordQuery, RecordStore},
};

/// Reads records from a SQLite database.
///
/// The connection must have been prepared with [crate::db::initialize].
#[derive(Debug, Clone)]
pub struct SQLiteRecordStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteRecordStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

/// A SQL `WHERE` clause and the parameters it refers to.
struct WhereClause {
    sql: String,
    parameters: Vec<Value>,
}

impl WhereClause {
    fn new(filter: &RecordFilter) -> Self {
        let mut conditions = Vec::new();
        let mut parameters = Vec::new();

        if let Some(month_filter) = filter.month {
            let (operator, month) = match month_filter {
                MonthFilter::In(month) => ("=", month),
                MonthFilter::NotIn(month) => ("!=", month),
            };
            parameters.push(Value::Integer(u8::from(month).into()));
            conditions.push(format!("sale_month {operator} ?{}", parameters.len()));
        }

        if let Some(search) = &filter.search {
            parameters.push(Value::Text(search.as_str().to_owned()));
            conditions.push(format!(
                "{MATCHES_SEARCH_FUNCTION}(?{}, title, description, price)",
                parameters.len()
            ));
        }

        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        Self { sql, parameters }
    }
}

impl RecordStore for SQLiteRecordStore {
    /// Query for records in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_query(&self, query: RecordQuery) -> Result<Vec<Record>, Error> {
        let where_clause = WhereClause::new(&query.filter);
        let mut query_string_parts = vec![
            format!("SELECT {RECORD_COLUMNS} FROM sale_record"),
            where_clause.sql,
            "ORDER BY id ASC".to_owned(),
        ];

        // SQLite only accepts OFFSET after a LIMIT, where -1 means no limit.
        let limit = query
            .limit
            .map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        query_string_parts.push(format!("LIMIT {limit} OFFSET {offset}"));

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(where_clause.parameters.iter());

        self.lock()?
            .prepare(&query_string)?
            .query_map(params, map_record_row)?
            .map(|maybe_record| maybe_record.map_err(Error::SqlError))
            .collect()
    }

    /// Count the records that match `filter`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count(&self, filter: &RecordFilter) -> Result<u64, Error> {
        let where_clause = WhereClause::new(filter);
        let query_string = format!("SELECT COUNT(id) FROM sale_record {}", where_clause.sql);

        self.lock()?
            .query_row(
                &query_string,
                params_from_iter(where_clause.parameters.iter()),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    /// Sum the price of the records that match `filter`.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn total_price(&self, filter: &RecordFilter) -> Result<f64, Error> {
        let where_clause = WhereClause::new(filter);
        // TOTAL returns 0.0 rather than NULL when no rows match.
        let query_string = format!("SELECT TOTAL(price) FROM sale_record {}", where_clause.sql);

        self.lock()?
            .query_row(
                &query_string,
                params_from_iter(where_clause.parameters.iter()),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }

    /// Count the records that match `filter` for each category.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is some SQL error.
    fn count_by_category(&self, filter: &RecordFilter) -> Result<Vec<CategoryCount>, Error> {
        let where_clause = WhereClause::new(filter);
        let query_string = format!(
            "SELECT category, COUNT(id) FROM sale_record {} GROUP BY category ORDER BY category ASC",
            where_clause.sql
        );

        self.lock()?
            .prepare(&query_string)?
            .query_map(params_from_iter(where_clause.parameters.iter()), |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .map(|maybe_count| maybe_count.map_err(Error::SqlError))
            .collect()
    }
}
