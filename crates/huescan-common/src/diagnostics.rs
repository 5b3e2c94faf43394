//! Recovered problems with deduplicated reporting.
//!
//! Every failure that the scan recovers from locally (an unreadable
//! directory, a file that cannot be decoded) is recorded here so the final
//! report can list it. The same message is only logged once per run.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// A single recovered problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Issue {
    /// Component that hit the problem (e.g. `"walk"`, `"read"`).
    pub component: String,
    /// Human readable description, including the offending path or token.
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.component, self.message)
    }
}

/// Per-run collector of recovered problems.
///
/// Owned by whoever drives the run; there is no process-wide state, so two
/// scans in the same process never see each other's warnings.
///
/// # Example
/// ```
/// use huescan_common::Diagnostics;
///
/// let mut diagnostics = Diagnostics::new();
/// assert!(diagnostics.warn_once("walk", "cannot read directory 'styles/old'"));
/// assert!(!diagnostics.warn_once("walk", "cannot read directory 'styles/old'"));
/// assert_eq!(diagnostics.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Diagnostics {
    seen: HashSet<Issue>,
    issues: Vec<Issue>,
}

impl Diagnostics {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem, logging it only the first time it is seen.
    ///
    /// Returns `true` when the issue was new.
    pub fn warn_once(&mut self, component: &str, message: impl Into<String>) -> bool {
        let issue = Issue {
            component: component.to_string(),
            message: message.into(),
        };
        if !self.seen.insert(issue.clone()) {
            return false;
        }

        tracing::warn!(component = %issue.component, "{}", issue.message);
        self.issues.push(issue);
        true
    }

    /// Number of distinct issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether nothing went wrong.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Consume the collector, keeping issues in the order they were first reported.
    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_message_different_component_is_distinct() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.warn_once("walk", "permission denied"));
        assert!(diagnostics.warn_once("read", "permission denied"));
        assert_eq!(diagnostics.len(), 2);
        assert!(!diagnostics.is_empty());
        let components: Vec<String> = diagnostics
            .into_issues()
            .into_iter()
            .map(|issue| issue.component)
            .collect();
        assert_eq!(components, ["walk", "read"]);
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue {
            component: "walk".to_string(),
            message: "cannot stat 'x'".to_string(),
        };
        assert_eq!(issue.to_string(), "[walk] cannot stat 'x'");
    }
}
