//! Output module
//!
//! Writes the JSON snapshots and the HTML report to flat files, and reads
//! snapshots back.

mod writer;

pub use writer::{
    read_json, to_json_bytes, write_html, write_json, write_json_with_config, JsonWriterConfig,
};

#[cfg(test)]
mod tests;
