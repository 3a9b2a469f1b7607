//! Result sinks: JSON serialization of outline and persona records.

mod json;
mod report;

pub use json::{to_json, write_json, JsonFormat};
pub use report::{format_timestamp, PersonaReport, ReportMetadata};

/// The per-document outline record, `{title, outline: [{level, text, page}]}`.
pub type OutlineRecord = crate::model::OutlineResult;
