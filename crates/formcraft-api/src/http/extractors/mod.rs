//! Request extractors: owner identity and list query parameters.

pub mod owner;
pub mod query;
