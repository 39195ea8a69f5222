//! Sets up the SQLite database that backs the record store.

use rusqlite::{
    Connection,
    functions::{Context, FunctionFlags},
};

use crate::{
    Error,
    record::{SearchText, create_record_table},
};

/// The name of the SQL function used to apply a [SearchText] inside a query.
///
/// Called as `matches_search(query, title, description, price)`.
pub(crate) const MATCHES_SEARCH_FUNCTION: &str = "matches_search";

/// Prepare a connection for use as a record store.
///
/// Creates the record table if it does not exist and registers the SQL
/// functions that record queries depend on. Call this once for every new
/// connection, before it is shared with the rest of the application.
///
/// # Errors
/// Returns an error if the table cannot be created or a function cannot be registered.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_search_function(connection)?;

    let transaction = connection.unchecked_transaction()?;
    create_record_table(&transaction)?;
    transaction.commit()?;

    tracing::debug!("Database initialized");

    Ok(())
}

/// Register `matches_search` so that SQL queries use exactly the same
/// matching rules as [SearchText::matches].
fn register_search_function(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        MATCHES_SEARCH_FUNCTION,
        4,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        matches_search,
    )
}

fn matches_search(context: &Context<'_>) -> Result<bool, rusqlite::Error> {
    let query: String = context.get(0)?;
    let title: String = context.get(1)?;
    let description: String = context.get(2)?;
    let price: f64 = context.get(3)?;

    Ok(SearchText::new(&query)
        .is_none_or(|search| search.matches_fields(&title, &description, price)))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = get_test_connection();

        assert_eq!(initialize(&conn), Ok(()));
    }

    #[test]
    fn search_function_folds_case() {
        let conn = get_test_connection();

        let matched: bool = conn
            .query_row(
                "SELECT matches_search('shirt', 'Blue SHIRT', '', 10.0)",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert!(matched);
    }

    #[test]
    fn search_function_matches_price_text() {
        let conn = get_test_connection();

        let (whole, fraction): (bool, bool) = conn
            .query_row(
                "SELECT matches_search('150', 'Hat', '', 150.0),
                        matches_search('.85', 'Hat', '', 329.85)",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert!(whole);
        assert!(fraction);
    }

    #[test]
    fn search_function_rejects_missing_text() {
        let conn = get_test_connection();

        let matched: bool = conn
            .query_row(
                "SELECT matches_search('sock', 'Hat', 'Woollen', 12.0)",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert!(!matched);
    }
}
