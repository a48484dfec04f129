//! Structured error types shared across canon crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`CanonError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (vertex indices, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for graph packing, triad conversion and engine calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum CanonError {
    /// A vertex count whose packed matrix cannot be represented.
    #[error("invalid size: {0}")]
    InvalidSize(ErrorInfo),
    /// A vertex index or encoded value outside its valid range.
    #[error("out of range: {0}")]
    OutOfRange(ErrorInfo),
    /// A triad conversion attempted on a graph that does not have exactly three vertices.
    #[error("unsupported size: {0}")]
    UnsupportedSize(ErrorInfo),
    /// The canonicalization engine reported a non-zero error status.
    #[error("engine failure: {0}")]
    EngineFailure(ErrorInfo),
    /// The native word width differs from the width the engine was built for.
    #[error("word width mismatch: {0}")]
    WordWidthMismatch(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl CanonError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            CanonError::InvalidSize(info)
            | CanonError::OutOfRange(info)
            | CanonError::UnsupportedSize(info)
            | CanonError::EngineFailure(info)
            | CanonError::WordWidthMismatch(info)
            | CanonError::Serde(info) => info,
        }
    }

    /// Builds the error raised when a vertex index falls outside `[0, order)`.
    pub fn vertex_out_of_range(vertex: usize, order: usize) -> Self {
        CanonError::OutOfRange(
            ErrorInfo::new("vertex-out-of-range", format!("vertex {vertex} out of range {order}"))
                .with_context("vertex", vertex.to_string())
                .with_context("order", order.to_string()),
        )
    }
}
