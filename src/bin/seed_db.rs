use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rusqlite::Connection;

use sales_report::{
    count_records, db,
    seed::{load_seed_file, seed_database},
};

/// A utility for loading a JSON feed of sales records into a database for sales_report.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. It is created if it does not exist.
    #[arg(long, short)]
    db_path: PathBuf,

    /// File path to the JSON feed of records.
    #[arg(long, short)]
    seed_file: PathBuf,
}

/// Replace the records in a database with those in a JSON feed.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Reading records from {:#?}", args.seed_file);
    let records = load_seed_file(&args.seed_file)?;

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    db::initialize(&conn)?;

    let inserted = seed_database(&records, &conn)?;
    println!("Inserted {inserted} records.");
    println!("The database now holds {} records.", count_records(&conn)?);

    Ok(())
}
