//! Run summaries: human lines or one JSON object.

pub mod human;
pub mod json;
