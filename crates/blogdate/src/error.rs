// ABOUTME: Error types for registry loading including ErrorCode enum and LoadError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing categories of registry-loading failures.
///
/// Extraction itself never produces errors: an unresolvable date is a normal
/// business outcome signalled by `None`, not a fault. Only the configuration
/// surface (reading and validating a selector file) can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Io,
    Malformed,
    Selector,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Io => "I/O error",
            ErrorCode::Malformed => "malformed selector file",
            ErrorCode::Selector => "invalid CSS selector",
        };
        write!(f, "{}", s)
    }
}

/// The error type for registry-loading operations.
#[derive(Debug, thiserror::Error)]
pub struct LoadError {
    pub code: ErrorCode,
    /// File path or site id the failure relates to.
    pub subject: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blogdate: {} {}: {}", self.op, self.subject, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl LoadError {
    /// Create an Io error.
    pub fn io(
        subject: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Io,
            subject: subject.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Malformed error.
    pub fn malformed(
        subject: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Malformed,
            subject: subject.into(),
            op: op.into(),
            source,
        }
    }

    /// Create a Selector error.
    pub fn selector(
        subject: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::Selector,
            subject: subject.into(),
            op: op.into(),
            source,
        }
    }

    /// Returns true if this is an Io error.
    pub fn is_io(&self) -> bool {
        self.code == ErrorCode::Io
    }

    /// Returns true if this is a Malformed error.
    pub fn is_malformed(&self) -> bool {
        self.code == ErrorCode::Malformed
    }

    /// Returns true if this is a Selector error.
    pub fn is_selector(&self) -> bool {
        self.code == ErrorCode::Selector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_op_and_subject() {
        let err = LoadError::malformed("selectors.json", "from_file", None);
        let s = err.to_string();
        assert!(s.contains("from_file"));
        assert!(s.contains("selectors.json"));
        assert!(s.contains("malformed"));
    }

    #[test]
    fn display_includes_source() {
        let err = LoadError::io(
            "missing.json",
            "from_file",
            Some(anyhow::anyhow!("no such file")),
        );
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn boolean_helpers_match_code() {
        assert!(LoadError::io("x", "y", None).is_io());
        assert!(LoadError::malformed("x", "y", None).is_malformed());
        assert!(LoadError::selector("x", "y", None).is_selector());
        assert!(!LoadError::io("x", "y", None).is_malformed());
    }
}
