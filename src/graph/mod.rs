//! Serde boundary for the editor's graph payload.

pub(crate) mod model;
pub(crate) mod resolve;
