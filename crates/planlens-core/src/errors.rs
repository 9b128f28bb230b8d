use thiserror::Error;

/// Result type alias using LensError
pub type Result<T> = std::result::Result<T, LensError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on instead
/// of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensErrorKind {
    // Analysis
    /// The selected plan section holds zero records
    EmptyBatch,
    /// A value could not be interpreted as a plan record or tree value
    MalformedValue,
    /// Caller-supplied arguments are unusable
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl LensErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LensErrorKind::EmptyBatch => "ERR_EMPTY_BATCH",
            LensErrorKind::MalformedValue => "ERR_MALFORMED_VALUE",
            LensErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            LensErrorKind::Io => "ERR_IO",
            LensErrorKind::Serialization => "ERR_SERIALIZATION",
            LensErrorKind::Persistence => "ERR_PERSISTENCE",
            LensErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation, section and path context that produced it.
#[derive(Debug, Clone)]
pub struct LensError {
    kind: LensErrorKind,
    op: Option<String>,
    section: Option<String>,
    path: Option<String>,
    message: String,
}

impl LensError {
    /// Create a new error with the specified kind
    pub fn new(kind: LensErrorKind) -> Self {
        Self {
            kind,
            op: None,
            section: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add plan section context
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Add value path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> LensErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the section context, if any
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for LensError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(section) = &self.section {
            write!(f, " (section: {})", section)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for LensError {}

// ========== End Error Facility ==========

/// Domain errors raised while decoding, diffing and classifying a plan
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanLensError {
    /// The selected section has no records to classify
    #[error("No changes detected in section {section}")]
    EmptyBatch { section: String },

    /// A value does not have the shape a plan record or tree value needs
    #[error("Malformed value at '{path}': {reason}")]
    MalformedValue { path: String, reason: String },

    /// Tree nesting exceeded the configured depth limit
    #[error("Value nesting at '{path}' exceeds max depth {max_depth}")]
    NestingTooDeep { path: String, max_depth: usize },

    /// Reading or writing a file failed
    #[error("I/O failure on {path}: {message}")]
    Io { path: String, message: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Convert domain errors into the structured facility type
impl From<PlanLensError> for LensError {
    fn from(err: PlanLensError) -> Self {
        match err {
            PlanLensError::EmptyBatch { section } => LensError::new(LensErrorKind::EmptyBatch)
                .with_section(section)
                .with_message("No changes detected"),

            PlanLensError::MalformedValue { path, reason } => {
                LensError::new(LensErrorKind::MalformedValue)
                    .with_path(path)
                    .with_message(reason)
            }

            PlanLensError::NestingTooDeep { path, max_depth } => {
                LensError::new(LensErrorKind::MalformedValue)
                    .with_path(path)
                    .with_message(format!("Value nesting exceeds max depth {}", max_depth))
            }

            PlanLensError::Io { path, message } => LensError::new(LensErrorKind::Io)
                .with_path(path)
                .with_message(message),

            PlanLensError::Serialization { message } => {
                LensError::new(LensErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to PlanLensError
impl From<serde_json::Error> for PlanLensError {
    fn from(err: serde_json::Error) -> Self {
        PlanLensError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from serde_json::Error to LensError
impl From<serde_json::Error> for LensError {
    fn from(err: serde_json::Error) -> Self {
        PlanLensError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (LensErrorKind::EmptyBatch, "ERR_EMPTY_BATCH"),
            (LensErrorKind::MalformedValue, "ERR_MALFORMED_VALUE"),
            (LensErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (LensErrorKind::Io, "ERR_IO"),
            (LensErrorKind::Persistence, "ERR_PERSISTENCE"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_nesting_too_deep_maps_to_malformed_value() {
        let err: LensError = PlanLensError::NestingTooDeep {
            path: "a.b[0]".to_string(),
            max_depth: 4,
        }
        .into();
        assert_eq!(err.kind(), LensErrorKind::MalformedValue);
        assert_eq!(err.path(), Some("a.b[0]"));
        assert!(err.message().contains("max depth 4"));
    }

    #[test]
    fn test_display_includes_context() {
        let err = LensError::new(LensErrorKind::EmptyBatch)
            .with_op("analyse_plan")
            .with_section("resource_drift")
            .with_message("No changes detected");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_EMPTY_BATCH]"));
        assert!(text.contains("analyse_plan"));
        assert!(text.contains("resource_drift"));
    }
}
