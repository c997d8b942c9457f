//! Scanner: applies the enabled rules line by line over input text and
//! derives quality metrics.
//!
//! Flow per rule: compile (skip the rule on a malformed pattern), test the
//! whole text once as a cheap short-circuit, then emit one finding per
//! matching line. Structural checks and metric derivation follow; the
//! finding list is capped afterwards.
//!
//! The engine is synchronous and holds no shared state between calls; file
//! fan-out in `scan_files` parallelizes across inputs only.

use crate::checks;
use crate::metrics;
use crate::models::{FileReport, Finding, ScanResult};
use crate::rules::RuleSet;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Findings retained per scan; later matches are dropped, not an error.
pub const MAX_FINDINGS: usize = 50;

/// Scan `text` with the enabled rules of `rules`.
pub fn run_scan(text: &str, rules: &RuleSet) -> ScanResult {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut findings: Vec<Finding> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    for rule in rules.enabled() {
        // malformed pattern: skip this rule only
        let re = match rule.compile() {
            Ok(re) => re,
            Err(_) => continue,
        };
        if !re.is_match(text) {
            continue;
        }
        for (idx, line) in lines.iter().enumerate() {
            if re.is_match(line) {
                findings.push(Finding {
                    id: findings.len() + 1,
                    line: idx + 1,
                    rule: rule.id.clone(),
                    category: rule.category.clone(),
                    severity: rule.severity,
                    impact: rule.severity.impact(),
                    message: rule.message.clone(),
                    suggestion: rule.suggestion.clone(),
                    excerpt: line.trim().to_string(),
                    rewrite: rule.rewrite.clone(),
                    can_auto_fix: rule.rewrite.is_some(),
                });
            }
        }
    }

    let signals = checks::inspect(text, &lines);
    checks::run_checks(&signals, &mut findings, &mut notes);

    // metrics see the uncapped list; the cap applies to the returned findings
    let (metrics, score) = metrics::derive(text, &findings, &signals);
    findings.truncate(MAX_FINDINGS);

    ScanResult {
        score,
        findings,
        metrics,
        notes,
        original: text.to_string(),
        fixed: None,
    }
}

/// Like `run_scan`, but substitutes the neutral fallback result if scanning
/// faults unexpectedly. The recoverable cases (malformed patterns) are
/// already handled per rule inside `run_scan`; this boundary exists for
/// genuinely unexpected faults only and is what the CLI calls.
pub fn scan_with_fallback(text: &str, rules: &RuleSet) -> ScanResult {
    let outcome =
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_scan(text, rules)));
    match outcome {
        Ok(res) => res,
        Err(_) => ScanResult::fallback(text),
    }
}

/// Expand `patterns` (literal paths or globs) relative to `root` into a
/// sorted, deduplicated file list. Problems are returned as messages, not
/// failures, so one bad pattern does not abort the run.
pub fn collect_files(root: &Path, patterns: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    let mut files: Vec<PathBuf> = Vec::new();
    let mut errors: Vec<String> = Vec::new();
    for pat in patterns {
        let direct = root.join(pat);
        if direct.is_file() {
            files.push(direct);
            continue;
        }
        let pattern = direct.to_string_lossy().to_string();
        match glob::glob(&pattern) {
            Ok(paths) => {
                let mut hit = false;
                for path in paths.flatten() {
                    if path.is_file() {
                        files.push(path);
                        hit = true;
                    }
                }
                if !hit {
                    errors.push(format!("no files matched '{}'", pat));
                }
            }
            Err(e) => errors.push(format!("bad glob pattern '{}': {}", pat, e)),
        }
    }
    files.sort();
    files.dedup();
    (files, errors)
}

/// Scan every file matched by `patterns`. Files are processed in parallel;
/// report order follows the sorted path order. Display paths are
/// root-relative where possible.
pub fn scan_files(
    root: &Path,
    patterns: &[String],
    rules: &RuleSet,
) -> (Vec<FileReport>, Vec<String>) {
    let (files, mut errors) = collect_files(root, patterns);

    let outcomes: Vec<Result<FileReport, String>> = files
        .par_iter()
        .map(|path| {
            let display = pathdiff::diff_paths(path, root)
                .unwrap_or_else(|| path.clone())
                .to_string_lossy()
                .to_string();
            match fs::read_to_string(path) {
                Ok(text) => Ok(FileReport {
                    file: display,
                    result: scan_with_fallback(&text, rules),
                }),
                Err(e) => Err(format!("failed to read {}: {}", display, e)),
            }
        })
        .collect();

    let mut reports = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(msg) => errors.push(msg),
        }
    }
    (reports, errors)
}
