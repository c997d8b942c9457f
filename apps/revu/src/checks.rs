//! Structural checks that run on every scan, independent of the rule set.
//!
//! Three whole-text probes:
//! - comment presence (`//` or `/*`),
//! - doc-block presence (`/**`) when function-like constructs exist,
//! - suspension points (`await` / `.then(`) outside any try/catch.
//!
//! The probes feed both the synthetic findings emitted here and the
//! documentation metric.

use crate::models::rule::{Impact, Rewrite, Severity};
use crate::models::Finding;
use regex::{Regex, RegexBuilder};

/// Whole-text signals shared by checks and metrics.
pub struct DocSignals {
    pub has_comments: bool,
    pub has_doc_block: bool,
    pub function_count: usize,
    pub comment_lines: usize,
    pub total_lines: usize,
    pub comment_ratio: f64,
    pub has_try_catch: bool,
    pub has_suspension: bool,
}

/// Collect documentation and error-handling signals from the input.
pub fn inspect(text: &str, lines: &[&str]) -> DocSignals {
    let function_re =
        Regex::new(r"function\s+\w+|const\s+\w+\s*=\s*\(|=>\s*\{").expect("function probe");
    let suspension_re = Regex::new(r"await|\.then\(").expect("suspension probe");
    // file-level heuristic, not scope-aware
    let try_catch_re = RegexBuilder::new(r"try\s*\{.*?catch")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("try/catch probe");

    let comment_lines = lines
        .iter()
        .filter(|l| {
            let t = l.trim();
            t.starts_with("//") || t.starts_with('*')
        })
        .count();
    let total_lines = lines.len();

    DocSignals {
        has_comments: text.contains("//") || text.contains("/*"),
        has_doc_block: text.contains("/**"),
        function_count: function_re.find_iter(text).count(),
        comment_lines,
        total_lines,
        comment_ratio: comment_lines as f64 / total_lines.max(1) as f64,
        has_try_catch: try_catch_re.is_match(text),
        has_suspension: suspension_re.is_match(text),
    }
}

/// Emit synthetic findings (and notes) for the structural checks. Findings
/// are appended after rule findings, continuing the same id sequence.
pub fn run_checks(signals: &DocSignals, findings: &mut Vec<Finding>, notes: &mut Vec<String>) {
    if !signals.has_comments {
        notes.push("No comments found - consider adding explanatory comments".to_string());
        findings.push(Finding {
            id: findings.len() + 1,
            line: 1,
            rule: "missing-comments".to_string(),
            category: "Documentation".to_string(),
            severity: Severity::Info,
            // reported above its severity's usual weight
            impact: Impact::Medium,
            message: "Missing code comments".to_string(),
            suggestion: "Add comments to explain complex logic and function purposes".to_string(),
            excerpt: String::new(),
            rewrite: None,
            can_auto_fix: false,
        });
    }

    if !signals.has_doc_block && signals.function_count > 0 {
        notes.push("Consider using JSDoc comments for better function documentation".to_string());
        findings.push(Finding {
            id: findings.len() + 1,
            line: 1,
            rule: "missing-doc-blocks".to_string(),
            category: "Documentation".to_string(),
            severity: Severity::Info,
            impact: Impact::Low,
            message: "Missing JSDoc documentation".to_string(),
            suggestion: "Use JSDoc comments to document function parameters and return values"
                .to_string(),
            excerpt: String::new(),
            rewrite: Some(Rewrite::InsertDocBlocks),
            can_auto_fix: true,
        });
    }

    if signals.has_suspension && !signals.has_try_catch {
        findings.push(Finding {
            id: findings.len() + 1,
            line: 1,
            rule: "missing-error-handling".to_string(),
            category: "Error Handling".to_string(),
            severity: Severity::Warning,
            impact: Impact::Medium,
            message: "Missing error handling for async operations".to_string(),
            suggestion: "Add try-catch blocks or .catch() for error handling".to_string(),
            excerpt: String::new(),
            rewrite: Some(Rewrite::WrapErrorHandling),
            can_auto_fix: true,
        });
    }
}
