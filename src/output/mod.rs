// Output module - JSON report dumps

pub mod json;

pub use json::{save_json, save_string};
