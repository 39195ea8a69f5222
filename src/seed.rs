//! Imports records from a JSON feed into the database.
//!
//! The feed is a JSON array of objects shaped like
//! `{"id", "title", "price", "description", "category", "image", "sold", "dateOfSale"}`.
//! The `sold` flag is ignored: whether a record sold in a month is decided by
//! its `dateOfSale` alone.

use std::{collections::HashSet, fs, path::Path};

use rusqlite::Connection;

use crate::{
    Error,
    record::{Record, replace_all_records},
};

/// Parse and validate the records in a JSON feed.
///
/// # Errors
/// Returns [Error::InvalidSeedData] if the text is not a JSON array of
/// records, a price is negative or not finite, or two records share an ID.
pub fn parse_seed_records(text: &str) -> Result<Vec<Record>, Error> {
    let records: Vec<Record> =
        serde_json::from_str(text).map_err(|error| Error::InvalidSeedData(error.to_string()))?;

    let mut seen_ids = HashSet::with_capacity(records.len());

    for record in &records {
        if !record.price.is_finite() || record.price < 0.0 {
            return Err(Error::InvalidSeedData(format!(
                "record {} has an invalid price {}",
                record.id, record.price
            )));
        }

        if !seen_ids.insert(record.id) {
            return Err(Error::InvalidSeedData(format!(
                "the ID {} is used by more than one record",
                record.id
            )));
        }
    }

    Ok(records)
}

/// Read and validate the records in the JSON feed at `path`.
///
/// # Errors
/// Returns [Error::SeedFileError] if the file cannot be read, otherwise the
/// errors of [parse_seed_records].
pub fn load_seed_file(path: &Path) -> Result<Vec<Record>, Error> {
    let text = fs::read_to_string(path).map_err(|error| {
        tracing::error!("could not read seed file {}: {error}", path.display());
        Error::SeedFileError(format!("{}: {error}", path.display()))
    })?;

    parse_seed_records(&text)
}

/// Replace every record in the database with `records`.
///
/// On error the database keeps its previous records.
///
/// # Errors
/// Returns [Error::SqlError] if the records could not be written.
pub fn seed_database(records: &[Record], connection: &Connection) -> Result<usize, Error> {
    let inserted = replace_all_records(records, connection)
        .inspect_err(|error| tracing::error!("could not seed the database: {error}"))?;

    tracing::info!("Seeded the database with {inserted} records");

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusqlite::Connection;
    use time::{Month, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        record::{Record, count_records},
        seed::{load_seed_file, parse_seed_records, seed_database},
    };

    const FEED: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        },
        {
            "id": 2,
            "title": "Mens Casual T-Shirt",
            "price": 22.3,
            "description": "Slim-fitting style",
            "category": "men's clothing",
            "sold": true,
            "dateOfSale": "2021-10-27T20:29:54+05:30"
        }
    ]"#;

    #[test]
    fn parses_feed_records() {
        let got = parse_seed_records(FEED).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(
            got[0],
            Record::build(1, 329.85, datetime!(2021-11-27 20:29:54 +05:30))
                .title("Fjallraven Backpack")
                .description("Your perfect pack for everyday use")
                .category("men's clothing")
                .image(Some("https://example.com/backpack.jpg"))
                .finish()
        );
        assert_eq!(got[1].image, None);
        assert_eq!(got[1].date_of_sale.month(), Month::October);
    }

    #[test]
    fn rejects_negative_price() {
        let feed = r#"[{"id": 1, "title": "t", "price": -1, "description": "d",
            "category": "c", "dateOfSale": "2021-11-27T20:29:54+05:30"}]"#;

        let got = parse_seed_records(feed);

        assert!(matches!(got, Err(Error::InvalidSeedData(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let feed = r#"[
            {"id": 1, "title": "a", "price": 1, "description": "d", "category": "c",
             "dateOfSale": "2021-11-27T20:29:54+05:30"},
            {"id": 1, "title": "b", "price": 2, "description": "d", "category": "c",
             "dateOfSale": "2021-12-27T20:29:54+05:30"}
        ]"#;

        let got = parse_seed_records(feed);

        assert!(matches!(got, Err(Error::InvalidSeedData(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let got = parse_seed_records("{\"id\": 1}");

        assert!(matches!(got, Err(Error::InvalidSeedData(_))));
    }

    #[test]
    fn missing_file_is_a_file_error() {
        let got = load_seed_file(std::path::Path::new("/definitely/not/a/seed.json"));

        assert!(matches!(got, Err(Error::SeedFileError(_))));
    }

    #[test]
    fn loads_feed_from_file() {
        let path = std::env::temp_dir()
            .join(format!("sales_report_seed_{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(FEED.as_bytes()).unwrap();

        let got = load_seed_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(got.unwrap().len(), 2);
    }

    #[test]
    fn seeding_replaces_existing_records() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let records = parse_seed_records(FEED).unwrap();
        seed_database(&records, &conn).unwrap();

        let got = seed_database(&records[..1], &conn).unwrap();

        assert_eq!(got, 1);
        assert_eq!(count_records(&conn).unwrap(), 1);
    }
}
