//! Metric aggregation over the finding list and superficial token counts.
//!
//! Formulas (clamps applied before rounding):
//! - complexity = 0.5·branches + 0.3·function tokens + 2, in [1,10]
//! - maintainability = 10 − 0.3·findings − 0.2·complexity, floored at 1
//! - reliability = 10 − 1.5·error findings, floored at 1
//! - security = 10 − 2·Security findings, floored at 1
//! - coverage = 85 − 1.5·findings, in [20,100] (synthetic proxy)
//! - documentation = 3·comments + 2·doc block + 50·comment ratio + 1, in [1,10]
//! - score = mean of {maintainability, reliability, security, coverage/10,
//!   documentation}, one decimal
//!
//! Counts use the uncapped finding list; the 50-finding cap applies to the
//! returned list only.

use crate::checks::DocSignals;
use crate::models::rule::Severity;
use crate::models::{Finding, Metrics};
use regex::Regex;

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Derive the metric set and overall score for one scan.
pub fn derive(text: &str, findings: &[Finding], signals: &DocSignals) -> (Metrics, f64) {
    let branch_re = Regex::new(r"if|for|while|switch|catch").expect("branch probe");
    let function_re = Regex::new(r"function|=>").expect("function token probe");

    let branches = branch_re.find_iter(text).count() as f64;
    let function_tokens = function_re.find_iter(text).count() as f64;
    let complexity = (branches * 0.5 + function_tokens * 0.3 + 2.0).clamp(1.0, 10.0);

    let total = findings.len() as f64;
    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count() as f64;
    let security_hits = findings.iter().filter(|f| f.category == "Security").count() as f64;

    let maintainability = (10.0 - total * 0.3 - complexity * 0.2).max(1.0);
    let reliability = (10.0 - errors * 1.5).max(1.0);
    let security = (10.0 - security_hits * 2.0).max(1.0);
    let coverage = (85.0 - total * 1.5).clamp(20.0, 100.0);

    let documentation = ((if signals.has_comments { 3.0 } else { 0.0 })
        + (if signals.has_doc_block { 2.0 } else { 0.0 })
        + signals.comment_ratio * 50.0
        + 1.0)
        .clamp(1.0, 10.0);

    let score = round1(
        (maintainability + reliability + security + coverage / 10.0 + documentation) / 5.0,
    );

    let metrics = Metrics {
        complexity: round1(complexity),
        maintainability: round1(maintainability),
        reliability: round1(reliability),
        security: round1(security),
        coverage: coverage.round(),
        documentation: round1(documentation),
    };
    (metrics, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks;
    use crate::models::rule::Impact;

    fn finding(severity: Severity, category: &str) -> Finding {
        Finding {
            id: 1,
            line: 1,
            rule: "r".to_string(),
            category: category.to_string(),
            severity,
            impact: severity.impact(),
            message: String::new(),
            suggestion: String::new(),
            excerpt: String::new(),
            rewrite: None,
            can_auto_fix: false,
        }
    }

    fn derive_for(text: &str, findings: &[Finding]) -> (Metrics, f64) {
        let lines: Vec<&str> = text.split('\n').collect();
        let signals = checks::inspect(text, &lines);
        derive(text, findings, &signals)
    }

    #[test]
    fn test_clean_commented_input_scores_high() {
        let text = "// adds two numbers\nconst add = (a, b) => { return a + b; };\n";
        let (m, score) = derive_for(text, &[]);
        assert_eq!(m.maintainability, 9.5);
        assert_eq!(m.reliability, 10.0);
        assert_eq!(m.security, 10.0);
        assert_eq!(m.coverage, 85.0);
        assert!(score >= 9.0);
    }

    #[test]
    fn test_error_and_security_findings_drag_scores() {
        let findings = vec![
            finding(Severity::Error, "Security"),
            finding(Severity::Error, "Security"),
            finding(Severity::Warning, "Best Practice"),
        ];
        let (m, _) = derive_for("var x = 1;", &findings);
        assert_eq!(m.reliability, 7.0);
        assert_eq!(m.security, 6.0);
    }

    #[test]
    fn test_metric_bounds_hold_under_many_findings() {
        let findings: Vec<Finding> = (0..200)
            .map(|_| finding(Severity::Error, "Security"))
            .collect();
        let (m, score) = derive_for("if (a) { while (b) {} }", &findings);
        assert_eq!(m.maintainability, 1.0);
        assert_eq!(m.reliability, 1.0);
        assert_eq!(m.security, 1.0);
        assert_eq!(m.coverage, 20.0);
        assert!(m.documentation >= 1.0 && m.documentation <= 10.0);
        assert!((1.0..=10.0).contains(&score));
    }

    #[test]
    fn test_documentation_rewards_comments_and_doc_blocks() {
        let bare = "const f = (x) => { return x; };";
        let (m_bare, _) = derive_for(bare, &[]);
        assert_eq!(m_bare.documentation, 1.0);

        let documented = "/**\n * doc\n */\n// inline\nconst f = (x) => { return x; };";
        let (m_doc, _) = derive_for(documented, &[]);
        assert!(m_doc.documentation > m_bare.documentation);
    }

    #[test]
    fn test_impact_does_not_affect_reliability_count() {
        // reliability keys off severity, not impact
        let mut f = finding(Severity::Info, "Documentation");
        f.impact = Impact::Medium;
        let (m, _) = derive_for("var x;", &[f]);
        assert_eq!(m.reliability, 10.0);
    }
}
