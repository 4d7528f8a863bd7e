//! Handling of uploaded CSV data sources.
//!
//! - `filename`: extension checking and filename sanitising applied before a
//!   file is written to the session's upload folder.
//! - `reader`: extraction of the header row and raw column values.
//! - `catalog`: aggregation of headers across every file of one upload,
//!   de-duplicated in first-seen order.

mod catalog;
mod filename;
mod reader;

pub use catalog::{CatalogColumn, HeaderCatalog};
pub use filename::{is_allowed_file, secure_filename};
pub use reader::read_columns;
