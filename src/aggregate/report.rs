//! Aggregation report types for tracking skipped features.
//!
//! This mirrors `validation::ValidationReport`: a flat list of issues with
//! stable codes, plus the counts that make up the run's status line.

use serde::Serialize;
use std::fmt;

/// A report generated during one aggregation run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AggregateReport {
    /// Counts from the input collection.
    pub input: InputCounts,
    /// Counts in the emitted region collection.
    pub output: OutputCounts,
    /// Features that contributed nothing, and why.
    pub issues: Vec<AggregateIssue>,
}

impl AggregateReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: AggregateIssue) {
        self.issues.push(issue);
    }

    /// Number of input features that contributed nothing.
    pub fn skipped_count(&self) -> usize {
        self.input.features.saturating_sub(self.input.classified)
    }

    /// Count of warning-level issues.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == AggregateSeverity::Warning)
            .count()
    }

    /// Count of info-level issues.
    pub fn info_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == AggregateSeverity::Info)
            .count()
    }

    /// Number of issues with the given code.
    pub fn count_of(&self, code: AggregateIssueCode) -> usize {
        self.issues.iter().filter(|i| i.code == code).count()
    }
}

impl fmt::Display for AggregateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  input: {} features, {} classified, {} skipped",
            self.input.features,
            self.input.classified,
            self.skipped_count()
        )?;
        writeln!(
            f,
            "  output: {} regions, {} polygons",
            self.output.regions, self.output.ring_sets
        )?;

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings ({}):", warnings)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == AggregateSeverity::Warning)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        let infos = self.info_count();
        if infos > 0 {
            writeln!(f)?;
            writeln!(f, "Notes ({}):", infos)?;
            for issue in self
                .issues
                .iter()
                .filter(|i| i.severity == AggregateSeverity::Info)
            {
                writeln!(f, "  - {}", issue)?;
            }
        }

        Ok(())
    }
}

/// Input-side counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct InputCounts {
    /// Features in the input collection.
    pub features: usize,
    /// Features whose geometry went into some region.
    pub classified: usize,
}

/// Output-side counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutputCounts {
    /// Region features emitted.
    pub regions: usize,
    /// Ring-sets across all emitted regions.
    pub ring_sets: usize,
}

/// A single skipped input feature.
#[derive(Clone, Debug, Serialize)]
pub struct AggregateIssue {
    pub severity: AggregateSeverity,
    pub code: AggregateIssueCode,
    /// Position of the feature in the input `features` array.
    pub index: usize,
    /// Resolved identifier, if there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    pub message: String,
}

impl AggregateIssue {
    /// Creates a warning-level issue.
    pub fn warning(
        code: AggregateIssueCode,
        index: usize,
        feature: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(AggregateSeverity::Warning, code, index, feature, message)
    }

    /// Creates an info-level issue.
    pub fn info(
        code: AggregateIssueCode,
        index: usize,
        feature: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(AggregateSeverity::Info, code, index, feature, message)
    }

    fn new(
        severity: AggregateSeverity,
        code: AggregateIssueCode,
        index: usize,
        feature: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            index,
            feature: feature.map(str::to_string),
            message: message.into(),
        }
    }
}

impl fmt::Display for AggregateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.feature {
            Some(id) => write!(f, "feature #{} ({}): {}", self.index, id, self.message),
            None => write!(f, "feature #{}: {}", self.index, self.message),
        }
    }
}

/// Severity level for aggregation issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateSeverity {
    /// Unexpected input that was dropped.
    Warning,
    /// Routine exclusion, e.g. a territory outside every region.
    Info,
}

/// Stable issue codes for programmatic consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateIssueCode {
    /// No identifier source produced a usable code.
    Unclassifiable,
    /// The code is not in the classification table.
    UnmappedCountryCode,
    /// A classified feature has no geometry.
    MissingGeometry,
    /// A classified feature's geometry type was skipped by policy.
    UnsupportedGeometrySkipped,
}
