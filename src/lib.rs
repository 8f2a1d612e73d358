//! Scrape phone specifications from GSMArena.
//!
//! `PhoneDetails::parse` turns a phone page into its spec sheet, grouped by
//! section, and `KeyFields::from_details` picks the commercially relevant
//! fields out of it. `Fetcher` downloads pages politely, one at a time, and
//! the `export` module writes the results as JSON and CSV.

pub mod csv;
pub mod export;
mod fetch;
mod phone_details;

pub use fetch::{FetchConfig, Fetcher};
pub use phone_details::{
    clean_text, joined_text, KeyFields, PhoneDetails, SpecSheet, Specification, Specifications,
    DEFAULT_SECTION,
};
pub use url::Url;
