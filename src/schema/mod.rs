//! Structural validation of the graph payload.
//!
//! Runs on raw JSON before deserialization so that every shape problem is reported with its JSON
//! path instead of stopping at the first serde error.

pub(crate) mod validate;
