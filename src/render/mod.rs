//! Rendering module for writing outlines and rankings as JSON.

mod json;

pub use json::{to_json, write_json, JsonFormat};
