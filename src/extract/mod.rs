//! Per-listing extraction: status gate, field chains, document links and
//! the record that ties them together.

pub mod documents;
pub mod field;
pub mod record;
pub mod status;

pub use record::ListingRecord;
