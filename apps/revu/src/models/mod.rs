//! Shared data models for scan/fix outputs and the rule schema module.

pub mod rule;

use crate::models::rule::{Impact, Rewrite, Severity};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// One reported occurrence of a rule's pattern at a specific line.
///
/// Findings are produced fresh on every scan; `id` is a 1-based counter over
/// the whole scan. The rule's rewrite travels with the finding so the fixer
/// needs no rule set.
pub struct Finding {
    pub id: usize,
    pub line: usize,
    pub rule: String,
    pub category: String,
    pub severity: Severity,
    pub impact: Impact,
    pub message: String,
    pub suggestion: String,
    /// Trimmed text of the matched line; empty for whole-text checks.
    pub excerpt: String,
    #[serde(skip)]
    pub rewrite: Option<Rewrite>,
    pub can_auto_fix: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Derived quality scores. All values are stored rounded: `coverage` to an
/// integer, the rest to one decimal.
pub struct Metrics {
    pub complexity: f64,
    pub maintainability: f64,
    pub reliability: f64,
    pub security: f64,
    pub coverage: f64,
    pub documentation: f64,
}

impl Metrics {
    /// Neutral values used by the fallback result.
    pub fn neutral() -> Metrics {
        Metrics {
            complexity: 5.0,
            maintainability: 5.0,
            reliability: 5.0,
            security: 5.0,
            coverage: 50.0,
            documentation: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// The finding list plus derived quality metrics for one scan invocation.
pub struct ScanResult {
    pub score: f64,
    pub findings: Vec<Finding>,
    pub metrics: Metrics,
    /// Human-readable remarks (documentation feedback, failure notes).
    pub notes: Vec<String>,
    #[serde(skip)]
    pub original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed: Option<String>,
}

impl ScanResult {
    /// Neutral result substituted when scanning faults unexpectedly.
    pub fn fallback(text: &str) -> ScanResult {
        ScanResult {
            score: 5.0,
            findings: Vec::new(),
            metrics: Metrics::neutral(),
            notes: vec!["Analysis failed - please try again".to_string()],
            original: text.to_string(),
            fixed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A scanned file paired with its result, using a display-friendly path.
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub result: ScanResult,
}

#[derive(Debug, Clone, Serialize)]
/// Aggregated scan summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub files: usize,
}

impl Summary {
    pub fn tally(reports: &[FileReport]) -> Summary {
        let mut s = Summary {
            errors: 0,
            warnings: 0,
            infos: 0,
            files: reports.len(),
        };
        for r in reports {
            for f in &r.result.findings {
                match f.severity {
                    Severity::Error => s.errors += 1,
                    Severity::Warning => s.warnings += 1,
                    Severity::Info => s.infos += 1,
                }
            }
        }
        s
    }

    /// Count of findings at or above the given severity.
    pub fn at_least(&self, min: Severity) -> usize {
        match min {
            Severity::Error => self.errors,
            Severity::Warning => self.errors + self.warnings,
            Severity::Info => self.errors + self.warnings + self.infos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_result_is_neutral() {
        let res = ScanResult::fallback("let x;");
        assert_eq!(res.score, 5.0);
        assert!(res.findings.is_empty());
        assert_eq!(res.metrics.coverage, 50.0);
        assert_eq!(res.notes.len(), 1);
        assert_eq!(res.original, "let x;");
    }

    #[test]
    fn test_summary_threshold_counts() {
        let s = Summary {
            errors: 2,
            warnings: 3,
            infos: 4,
            files: 1,
        };
        assert_eq!(s.at_least(Severity::Error), 2);
        assert_eq!(s.at_least(Severity::Warning), 5);
        assert_eq!(s.at_least(Severity::Info), 9);
    }
}
