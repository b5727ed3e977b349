//! Validation report types for structured error reporting.
//!
//! This module provides structured validation results that can be
//! displayed to users or serialized for programmatic use.

use serde::Serialize;
use std::fmt;

use super::ValidateOptions;

/// The result of validating a region collection.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns true if the report passes under the given options.
    pub fn passes(&self, opts: &ValidateOptions) -> bool {
        if opts.strict {
            self.is_clean()
        } else {
            self.is_ok()
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct ValidationIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Context about where the issue occurred.
    pub context: IssueContext,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    pub fn new(
        severity: Severity,
        code: IssueCode,
        message: impl Into<String>,
        context: IssueContext,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            context,
        }
    }

    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Error, code, message, context)
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, context: IssueContext) -> Self {
        Self::new(Severity::Warning, code, message, context)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in {}: {}",
            severity, self.code, self.context, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Suspicious data the map will still render.
    Warning,
    /// Data the map cannot render correctly.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Feature identity
    /// Two features share a region id.
    DuplicateRegionId,
    /// A feature's id is not a region in the table.
    UnknownRegion,
    /// A feature's properties differ from the table's metadata.
    MetadataMismatch,

    // Properties
    /// `name`, `chapter` or `color` is empty.
    EmptyProperty,
    /// `color` is not a `#RRGGBB` hex string.
    InvalidColor,

    // Geometry
    /// The MultiPolygon has no ring-sets.
    EmptyGeometry,
    /// A ring-set has no rings.
    EmptyRingSet,
    /// A position has fewer than two numbers.
    InvalidPosition,
    /// A ring has fewer than four positions.
    DegenerateRing,
    /// A ring's first and last positions differ.
    UnclosedRing,
    /// A longitude or latitude is outside its valid range.
    CoordinateOutOfRange,
}

/// Context about where a validation issue occurred.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueContext {
    /// Issue with a region feature.
    Feature { id: String },
    /// Issue with one ring of a region feature.
    Ring {
        id: String,
        polygon: usize,
        ring: usize,
    },
}

impl fmt::Display for IssueContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueContext::Feature { id } => write!(f, "region '{}'", id),
            IssueContext::Ring { id, polygon, ring } => {
                write!(f, "region '{}' polygon {} ring {}", id, polygon, ring)
            }
        }
    }
}
