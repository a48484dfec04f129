use canon_core::{CanonError, ErrorInfo};

use crate::engine::EngineOptions;
use crate::oracle::ConformanceReport;

/// Serialises engine options into indented JSON.
pub fn options_to_json(options: &EngineOptions) -> Result<String, CanonError> {
    serde_json::to_string_pretty(options)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("options-serialize", err.to_string())))
}

/// Deserialises engine options from JSON; missing fields take their defaults.
pub fn options_from_json(json: &str) -> Result<EngineOptions, CanonError> {
    serde_json::from_str(json)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("options-deserialize", err.to_string())))
}

/// Serialises a conformance report into indented JSON.
pub fn report_to_json(report: &ConformanceReport) -> Result<String, CanonError> {
    serde_json::to_string_pretty(report)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("report-serialize", err.to_string())))
}

/// Deserialises a conformance report from JSON text.
pub fn report_from_json(json: &str) -> Result<ConformanceReport, CanonError> {
    serde_json::from_str(json)
        .map_err(|err| CanonError::Serde(ErrorInfo::new("report-deserialize", err.to_string())))
}
