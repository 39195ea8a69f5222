//! Sales records and the predicates used to select them.
//!
//! This module contains:
//! - The `Record` model and `RecordBuilder`
//! - The record table and the functions that write to it
//! - The month and search predicates, combined into a `RecordFilter`

mod core;
mod filter;
mod month;
mod search;

pub use core::{
    Record, RecordBuilder, RecordId, count_records, create_record_table, replace_all_records,
};
pub use filter::{MonthFilter, RecordFilter};
pub use month::{parse_month, require_month};
pub use search::SearchText;

pub(crate) use core::{RECORD_COLUMNS, map_record_row};
pub(crate) use month::optional_month;

#[cfg(test)]
pub(crate) use core::insert_record;
