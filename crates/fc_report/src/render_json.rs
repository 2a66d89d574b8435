//! JSON renderer: serialize the model with deterministic field order
//! (struct layout), compact output.

use crate::{ReportError, ReportModel};

pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string(model).map_err(|_| ReportError::Template("json_serialize"))
}

/// Pretty variant for humans reading the file directly.
pub fn render_json_pretty(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|_| ReportError::Template("json_serialize"))
}
