//! Findings collected while validating a network.
//!
//! Each issue has a severity, a [`Category`] and optionally the entity it is
//! about (`"Node C"`, `"Line A->F"`). Errors mean a solve cannot succeed as
//! the network stands; warnings flag data that solves but looks wrong.
//!
//! ```
//! use gridflow_core::diagnostics::{Category, Diagnostics};
//!
//! let mut diag = Diagnostics::new();
//! diag.warn(Category::Capacity, "Line has zero capacity", Some("Line A->B"));
//! diag.error(Category::Balance, "Total supply differs from total demand", None);
//!
//! assert_eq!(diag.warning_count(), 1);
//! assert!(diag.has_errors());
//! ```

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// What part of the network an issue concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Empty network, missing lines
    Structure,
    /// Supply/demand totals
    Balance,
    /// Isolated nodes
    Topology,
    /// Line ratings versus what nodes need to move
    Capacity,
    Cost,
    /// Stored flows
    Flow,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Structure => "structure",
            Category::Balance => "balance",
            Category::Topology => "topology",
            Category::Capacity => "capacity",
            Category::Cost => "cost",
            Category::Flow => "flow",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticIssue {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl fmt::Display for DiagnosticIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "[{severity}:{}] {}", self.category.as_str(), self.message)?;
        if let Some(entity) = &self.entity {
            write!(f, " ({entity})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub issues: Vec<DiagnosticIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        severity: Severity,
        category: Category,
        message: impl Into<String>,
        entity: Option<&str>,
    ) {
        self.issues.push(DiagnosticIssue {
            severity,
            category,
            message: message.into(),
            entity: entity.map(str::to_string),
        });
    }

    pub fn warn(&mut self, category: Category, message: impl Into<String>, entity: Option<&str>) {
        self.push(Severity::Warning, category, message, entity);
    }

    pub fn error(&mut self, category: Category, message: impl Into<String>, entity: Option<&str>) {
        self.push(Severity::Error, category, message, entity);
    }

    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &DiagnosticIssue> {
        self.issues.iter().filter(move |i| i.category == category)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// `"No issues"`, `"2 warnings"`, `"1 warning, 1 error"`, ...
    pub fn summary(&self) -> String {
        let count = |n: usize, word: &str| format!("{n} {word}{}", if n == 1 { "" } else { "s" });
        match (self.warning_count(), self.error_count()) {
            (0, 0) => "No issues".to_string(),
            (w, 0) => count(w, "warning"),
            (0, e) => count(e, "error"),
            (w, e) => format!("{}, {}", count(w, "warning"), count(e, "error")),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  {issue}")?;
        }
        Ok(())
    }
}
