//! Violation and report types.

use serde::{Deserialize, Serialize};

/// A single failed structural constraint.
///
/// Violations are data, never errors: a rule-breaking document still
/// evaluates to completion and yields the full diagnostic set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable rule identifier, e.g. `exactly-one-return`.
    pub rule: String,
    /// Offending step name, when the violation is tied to one step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    /// Human-readable message, stable per rule id.
    pub message: String,
}

/// Aggregated verdict of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Build the verdict from a collected violation list.
    ///
    /// The verdict is total: an empty list means valid, anything else means
    /// invalid.  There is no third state.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        ValidationReport {
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Diagnostic messages in evaluation order.
    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Violations produced by one rule.
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }
}
