//! Validation issues and the accumulating result type.
//!
//! Validators never fail on content defects; they collect graded issues
//! into a `ValidationResult` and merge partial results. `merge` is
//! associative and commutative, so check order can never change the final
//! verdict.

use serde::Serialize;
use std::fmt;

/// Issue severity. `Critical` blocks import entirely; `High` breaks
/// functionality once imported; `Medium` is a quality defect; `Low` is
/// cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        };
        f.write_str(s)
    }
}

/// One defect found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Graded severity
    pub severity: Severity,
    /// Stable machine-readable code, e.g. `NS_MISMATCH`
    pub code: String,
    /// Human-readable description
    pub message: String,
    /// Element or identifier the issue refers to, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Suggested fix, if one is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create an issue with no element or suggestion.
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            element: None,
            suggestion: None,
        }
    }

    /// Attach the element this issue refers to.
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Attach a suggested fix.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Accumulated outcome of one or more validation passes.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// False once any CRITICAL issue has been recorded
    pub valid: bool,
    /// All issues found, in discovery order
    pub issues: Vec<ValidationIssue>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl ValidationResult {
    /// An empty, valid result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// A result holding exactly one issue.
    pub fn from_issue(issue: ValidationIssue) -> Self {
        let mut result = Self::ok();
        result.push(issue);
        result
    }

    /// Record an issue; validity drops once a CRITICAL arrives.
    pub fn push(&mut self, issue: ValidationIssue) {
        if issue.severity == Severity::Critical {
            self.valid = false;
        }
        self.issues.push(issue);
    }

    /// Combine two results: union of issues, AND of validity.
    /// Associative and commutative up to issue order.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.valid = self.valid && other.valid;
        self.issues.extend(other.issues);
        self
    }

    /// Number of issues at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Zero CRITICAL issues.
    pub fn is_compliant(&self) -> bool {
        self.count(Severity::Critical) == 0
    }

    /// Zero CRITICAL and zero HIGH issues.
    pub fn is_strictly_compliant(&self) -> bool {
        self.is_compliant() && self.count(Severity::High) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(severity: Severity, code: &str) -> ValidationIssue {
        ValidationIssue::new(severity, code, "msg")
    }

    #[test]
    fn test_critical_invalidates() {
        let mut result = ValidationResult::ok();
        result.push(issue(Severity::High, "A"));
        assert!(result.valid);
        result.push(issue(Severity::Critical, "B"));
        assert!(!result.valid);
        assert!(!result.is_compliant());
    }

    #[test]
    fn test_merge_is_order_insensitive() {
        let a = ValidationResult::from_issue(issue(Severity::High, "A"));
        let b = ValidationResult::from_issue(issue(Severity::Critical, "B"));
        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(ab.valid, ba.valid);
        assert_eq!(ab.issues.len(), ba.issues.len());
        let mut ab_codes: Vec<_> = ab.issues.iter().map(|i| i.code.clone()).collect();
        let mut ba_codes: Vec<_> = ba.issues.iter().map(|i| i.code.clone()).collect();
        ab_codes.sort();
        ba_codes.sort();
        assert_eq!(ab_codes, ba_codes);
    }

    #[test]
    fn test_merge_is_associative() {
        let a = ValidationResult::from_issue(issue(Severity::Low, "A"));
        let b = ValidationResult::from_issue(issue(Severity::Medium, "B"));
        let c = ValidationResult::from_issue(issue(Severity::Critical, "C"));
        let left = a.clone().merge(b.clone()).merge(c.clone());
        let right = a.merge(b.merge(c));
        assert_eq!(left.valid, right.valid);
        assert_eq!(left.issues.len(), right.issues.len());
    }

    #[test]
    fn test_compliance_thresholds() {
        let mut result = ValidationResult::ok();
        result.push(issue(Severity::High, "A"));
        result.push(issue(Severity::Medium, "B"));
        assert!(result.is_compliant());
        assert!(!result.is_strictly_compliant());
        assert_eq!(result.count(Severity::High), 1);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
        assert_eq!(Severity::Low.to_string(), "LOW");
    }
}
