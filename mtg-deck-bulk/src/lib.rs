//! Bulk card data for populating the card database.
//!
//! Card records come either from the Scryfall bulk-data API or from a local
//! JSON file holding the same record array.

pub mod error;
pub mod source;

pub use error::FetchError;
pub use source::{
    BulkDataSource, DEFAULT_BULK_DATA_ENDPOINT, load_card_data, parse_card_data, read_card_data,
};
