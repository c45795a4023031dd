//! Structured errors for the program boundary
//!
//! Library crates return typed errors. Binaries and other outer layers turn
//! them into a `TallyError`, which carries a machine-readable code and an
//! optional suggestion and serializes cleanly to JSON.

use crate::UnitError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_MAGNITUDE: &str = "INVALID_MAGNITUDE";
    pub const INVALID_INPUT: &str = "INVALID_INPUT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The affected item could not be processed
    Error,
    /// Nothing could be processed
    Fatal,
}

/// Context about where an error occurred
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Product being tallied when the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Recipe the offending ingredient belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl TallyError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set product context
    pub fn for_product(mut self, product: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.product = Some(product.into());
        self
    }

    /// Builder: set recipe context
    pub fn in_recipe(mut self, recipe: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.recipe = Some(recipe.into());
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_INPUT, format!("Invalid input: {}", details.into()))
    }

    pub fn not_found(kind: &str, name: &str) -> Self {
        Self::new(codes::NOT_FOUND, format!("No {} named '{}'", kind, name))
            .with_suggestion(format!("Check the spelling or add the {} first", kind))
    }

    pub fn duplicate(kind: &str, name: &str) -> Self {
        Self::new(codes::DUPLICATE, format!("Duplicate {}: '{}'", kind, name))
            .with_suggestion(format!("{} names must be unique (case-insensitive)", kind))
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Check the catalog file is valid JSON")
    }

    pub fn io(path: &str, details: impl Into<String>) -> Self {
        Self::new(codes::IO_ERROR, format!("Cannot read '{}': {}", path, details.into()))
            .with_severity(Severity::Fatal)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for TallyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for TallyError {}

impl From<UnitError> for TallyError {
    fn from(err: UnitError) -> Self {
        match &err {
            UnitError::IncompatibleUnits { .. } => Self::new(codes::INCOMPATIBLE_UNITS, err.to_string())
                .with_suggestion("Keep the quantities as separate totals"),
            UnitError::UnknownUnit(_) => Self::new(codes::UNKNOWN_UNIT, err.to_string())
                .with_suggestion("Use `tally units` to list known units"),
            UnitError::InvalidMagnitude(_) => Self::new(codes::INVALID_MAGNITUDE, err.to_string()),
            UnitError::InvalidNumber(_) => Self::new(codes::INVALID_MAGNITUDE, err.to_string())
                .with_suggestion("Write amounts as 2, 1.5, 3/4 or 1 1/2"),
        }
    }
}
