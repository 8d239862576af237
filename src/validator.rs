//! Resolvability report for a specification document.
//!
//! Registration stops at the first unresolvable operation. [`check_spec`]
//! walks the whole document instead and reports every problem it finds, so
//! a document can be fixed in one pass.

use crate::resolver::{resolve_controller, resolve_function, ResolutionPolicy, INDEX_CONTROLLER};
use crate::router::path_to_regex;
use crate::spec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// `<path> -> <METHOD>`
    pub location: String,
    /// Error kind, e.g. `NoTags`
    pub kind: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(location: impl Into<String>, kind: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Every operation of `spec` that `policy` cannot resolve, in document order.
///
/// An operation can produce more than one issue: a missing tag and a
/// missing `operationId` are reported separately. Path templates that
/// cannot be compiled are reported as `InvalidPath`, once per path.
#[must_use]
pub fn check_spec(spec: &serde_json::Value, policy: &ResolutionPolicy) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut last_path: Option<String> = None;

    for op in spec::operations(spec) {
        let location = op.location();

        if last_path.as_deref() != Some(op.path.as_str()) {
            if let Err(err) = path_to_regex(&op.path) {
                issues.push(ValidationIssue::new(&op.path, err.kind(), err.to_string()));
            }
            last_path = Some(op.path.clone());
        }

        let controller = match resolve_controller(&op, policy) {
            Ok(controller) => controller,
            Err(err) => {
                issues.push(ValidationIssue::new(&location, err.kind(), err.to_string()));
                INDEX_CONTROLLER.to_string()
            }
        };

        if let Err(err) = resolve_function(&op, &controller, policy) {
            issues.push(ValidationIssue::new(&location, err.kind(), err.to_string()));
        }
    }

    issues
}

pub fn print_issues(issues: &[ValidationIssue]) {
    eprintln!("\n❌ OpenAPI document cannot be routed. {} issue(s) found:\n", issues.len());
    for issue in issues {
        eprintln!("[{}] {}: {}", issue.kind, issue.location, issue.message);
    }
    eprintln!("\nAdd the missing tags/operationIds or enable the fallbacks.\n");
}
