//! Fixer: deterministic whole-text rewrites attached to rules.
//!
//! A rewrite is scoped to the rule, not the individual finding: applying one
//! may touch lines other than the one a finding was reported on. Span-level
//! patching is out of scope. `apply_all` runs each distinct rule's rewrite at
//! most once per call, so duplicate findings from one rule stay idempotent.

use crate::models::rule::Rewrite;
use crate::models::Finding;
use crate::rules::RuleSet;
use crate::scan;
use rayon::prelude::*;
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

impl Rewrite {
    /// Stable name used in config files and `--rewrite` flags.
    pub fn name(&self) -> &'static str {
        match self {
            Rewrite::StrictEquality => "strict-equality",
            Rewrite::ConstDeclarations => "const-declarations",
            Rewrite::RemoveDebugPrints => "remove-debug-prints",
            Rewrite::WrapErrorHandling => "wrap-error-handling",
            Rewrite::PreferConst => "prefer-const",
            Rewrite::InsertDocBlocks => "insert-doc-blocks",
            Rewrite::Template { .. } => "template",
        }
    }

    /// Resolve a named built-in rewrite.
    pub fn from_name(name: &str) -> Option<Rewrite> {
        match name {
            "strict-equality" => Some(Rewrite::StrictEquality),
            "const-declarations" => Some(Rewrite::ConstDeclarations),
            "remove-debug-prints" => Some(Rewrite::RemoveDebugPrints),
            "wrap-error-handling" => Some(Rewrite::WrapErrorHandling),
            "prefer-const" => Some(Rewrite::PreferConst),
            "insert-doc-blocks" => Some(Rewrite::InsertDocBlocks),
            _ => None,
        }
    }

    /// Apply the rewrite to the whole text, returning the transformed copy.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Rewrite::StrictEquality => strict_equality(text),
            Rewrite::ConstDeclarations => const_declarations(text),
            Rewrite::RemoveDebugPrints => remove_debug_prints(text),
            Rewrite::WrapErrorHandling => wrap_error_handling(text),
            Rewrite::PreferConst => prefer_const(text),
            Rewrite::InsertDocBlocks => insert_doc_blocks(text),
            Rewrite::Template {
                pattern,
                replacement,
            } => template(text, pattern, replacement),
        }
    }
}

fn strict_equality(text: &str) -> String {
    let re = Regex::new(r"([^=!])={2}([^=])").expect("strict equality pattern");
    re.replace_all(text, "${1}===${2}").into_owned()
}

fn const_declarations(text: &str) -> String {
    let re = Regex::new(r"\bvar\s+").expect("var pattern");
    re.replace_all(text, "const ").into_owned()
}

fn remove_debug_prints(text: &str) -> String {
    let re = Regex::new(r"console\.log\([^)]*\);?\s*").expect("console pattern");
    re.replace_all(text, "").into_owned()
}

fn wrap_error_handling(text: &str) -> String {
    // coarse, file-level heuristic: any try plus any catch counts as handled
    if text.contains("try") && text.contains("catch") {
        return text.to_string();
    }
    let re = Regex::new(r"(await\s+[^;]+;?)").expect("await pattern");
    re.replace_all(text, |caps: &Captures| {
        format!(
            "try {{\n  {}\n}} catch (error) {{\n  console.error('Error:', error);\n}}",
            caps[1].trim()
        )
    })
    .into_owned()
}

/// Convert `let x = v;` to `const x = v;` unless the text immediately after
/// the statement reassigns the same identifier. Not real data-flow; the
/// documented behavior is preserved as-is.
fn prefer_const(text: &str) -> String {
    let re = Regex::new(r"let\s+(\w+)\s*=\s*([^;]+);").expect("let pattern");
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let whole = caps.get(0).expect("match");
        let ident = &caps[1];
        let value = &caps[2];
        let rest = text[whole.end()..].trim_start();
        let reassigned = rest
            .strip_prefix(ident)
            .map_or(false, |tail| tail.trim_start().starts_with('='));
        out.push_str(&text[last..whole.start()]);
        if reassigned {
            out.push_str(whole.as_str());
        } else {
            out.push_str(&format!("const {} = {};", ident, value));
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    out
}

const DOC_BLOCK: &str = "/**\n * Description of the function\n * @param {*} param - Parameter description\n * @returns {*} Return value description\n */\n";

fn insert_doc_blocks(text: &str) -> String {
    let re = Regex::new(r"function\s+\w+\([^)]*\)|const\s+\w+\s*=\s*\([^)]*\)\s*=>")
        .expect("declaration pattern");
    re.replace_all(text, |caps: &Captures| format!("{}{}", DOC_BLOCK, &caps[0]))
        .into_owned()
}

fn template(text: &str, pattern: &str, replacement: &str) -> String {
    // malformed user pattern: recoverable, leave the text unchanged
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.replace_all(text, replacement).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Apply one finding's rewrite. Findings without a rewrite are a no-op.
pub fn apply_fix(text: &str, finding: &Finding) -> String {
    match &finding.rewrite {
        Some(rewrite) => rewrite.apply(text),
        None => text.to_string(),
    }
}

/// Apply every eligible finding's rewrite, each distinct rule at most once,
/// in finding order.
pub fn apply_all(text: &str, findings: &[Finding]) -> String {
    let mut out = text.to_string();
    let mut applied: HashSet<&str> = HashSet::new();
    for finding in findings {
        let Some(rewrite) = &finding.rewrite else {
            continue;
        };
        if !applied.insert(finding.rule.as_str()) {
            continue;
        }
        out = rewrite.apply(&out);
    }
    out
}

#[derive(Debug, Clone, Serialize)]
/// Per-file fix outcome. `preview`/`original` are captured when not writing
/// so the printers can show previews and diffs.
pub struct FixResult {
    pub file: String,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

/// Fix every file matched by `patterns`. With `only` empty, each file is
/// scanned and all eligible rewrites from its findings apply; otherwise just
/// the named rewrites run, once each, in the given order. When `write` is
/// set, changed files are updated in place.
pub fn fix_files(
    root: &Path,
    patterns: &[String],
    rules: &RuleSet,
    only: &[Rewrite],
    write: bool,
    capture_old: bool,
) -> (Vec<FixResult>, Vec<String>) {
    let (files, mut errors) = scan::collect_files(root, patterns);

    let outcomes: Vec<Result<FixResult, String>> = files
        .par_iter()
        .map(|path| {
            let display = pathdiff::diff_paths(path, root)
                .unwrap_or_else(|| path.clone())
                .to_string_lossy()
                .to_string();
            let text = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => return Err(format!("failed to read {}: {}", display, e)),
            };
            let fixed = if only.is_empty() {
                let result = scan::scan_with_fallback(&text, rules);
                apply_all(&text, &result.findings)
            } else {
                only.iter().fold(text.clone(), |acc, rw| rw.apply(&acc))
            };
            let changed = fixed != text;
            if write && changed {
                if let Err(e) = fs::write(path, &fixed) {
                    return Err(format!("failed to write {}: {}", display, e));
                }
            }
            Ok(FixResult {
                file: display,
                changed,
                preview: if capture_old && changed {
                    Some(fixed)
                } else {
                    None
                },
                original: if capture_old { Some(text) } else { None },
            })
        })
        .collect();

    let mut results = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(res) => results.push(res),
            Err(msg) => errors.push(msg),
        }
    }
    (results, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rule::{Impact, Severity};
    use crate::rules::RuleSet;
    use crate::scan::run_scan;

    fn finding_with(rule: &str, rewrite: Option<Rewrite>) -> Finding {
        Finding {
            id: 1,
            line: 1,
            rule: rule.to_string(),
            category: "Best Practice".to_string(),
            severity: Severity::Warning,
            impact: Impact::Medium,
            message: String::new(),
            suggestion: String::new(),
            excerpt: String::new(),
            can_auto_fix: rewrite.is_some(),
            rewrite,
        }
    }

    #[test]
    fn test_strict_equality_is_idempotent() {
        let text = "if (a == b && c == d) {}";
        let once = Rewrite::StrictEquality.apply(text);
        assert_eq!(once, "if (a === b && c === d) {}");
        assert_eq!(Rewrite::StrictEquality.apply(&once), once);

        // already-strict and not-equal operators are left alone
        let strict = "if (a === b || a != b) {}";
        assert_eq!(Rewrite::StrictEquality.apply(strict), strict);

        // re-scanning the fixed text finds no further loose equality
        let fixed = Rewrite::StrictEquality.apply("if (x == 1) {}");
        let res = run_scan(&fixed, &RuleSet::builtin());
        assert!(res.findings.iter().all(|f| f.rule != "loose-equality"));
    }

    #[test]
    fn test_const_declarations_replaces_var() {
        assert_eq!(
            Rewrite::ConstDeclarations.apply("var x = 1;\nvar y = 2;"),
            "const x = 1;\nconst y = 2;"
        );
    }

    #[test]
    fn test_remove_debug_prints_takes_whole_statement() {
        let text = "const a = 1;\nconsole.log('a', a);\nreturn a;";
        assert_eq!(
            Rewrite::RemoveDebugPrints.apply(text),
            "const a = 1;\nreturn a;"
        );
    }

    #[test]
    fn test_wrap_error_handling_skips_handled_text() {
        let handled = "try {\n  await go();\n} catch (e) {}";
        assert_eq!(Rewrite::WrapErrorHandling.apply(handled), handled);

        let bare = "const data = await fetchData();";
        let wrapped = Rewrite::WrapErrorHandling.apply(bare);
        assert!(wrapped.contains("try {"));
        assert!(wrapped.contains("await fetchData();"));
        assert!(wrapped.contains("catch (error)"));
    }

    #[test]
    fn test_prefer_const_respects_following_reassignment() {
        let text = "let a = 1;\nlet b = 2;\nb = 3;";
        let fixed = Rewrite::PreferConst.apply(text);
        assert_eq!(fixed, "const a = 1;\nlet b = 2;\nb = 3;");

        // a longer identifier sharing a prefix is not a reassignment
        let text = "let count = 1;\ncounter = 2;";
        assert_eq!(
            Rewrite::PreferConst.apply(text),
            "const count = 1;\ncounter = 2;"
        );
    }

    #[test]
    fn test_insert_doc_blocks_prefixes_declarations() {
        let text = "function add(a, b) {\n  return a + b;\n}";
        let fixed = Rewrite::InsertDocBlocks.apply(text);
        assert!(fixed.starts_with("/**\n"));
        assert!(fixed.contains("@returns"));
        assert!(fixed.contains("function add(a, b)"));
    }

    #[test]
    fn test_template_substitutes_and_tolerates_bad_patterns() {
        let rw = Rewrite::Template {
            pattern: r"foo\((\w+)\)".to_string(),
            replacement: "bar($1)".to_string(),
        };
        assert_eq!(rw.apply("foo(x); FOO(y);"), "bar(x); bar(y);");

        let broken = Rewrite::Template {
            pattern: "(unbalanced".to_string(),
            replacement: "x".to_string(),
        };
        assert_eq!(broken.apply("keep me"), "keep me");
    }

    #[test]
    fn test_apply_fix_is_noop_without_rewrite() {
        let finding = finding_with("sql-concat", None);
        assert_eq!(apply_fix("SELECT * FROM t", &finding), "SELECT * FROM t");
    }

    #[test]
    fn test_apply_all_runs_each_rule_once() {
        // two findings from the same rule: the rewrite must run once, so the
        // doc block is inserted a single time per declaration
        let text = "function a() {}\nfunction b() {}";
        let findings = vec![
            finding_with("missing-doc-blocks", Some(Rewrite::InsertDocBlocks)),
            finding_with("missing-doc-blocks", Some(Rewrite::InsertDocBlocks)),
        ];
        let fixed = apply_all(text, &findings);
        assert_eq!(fixed.matches("@returns").count(), 2);
        assert_eq!(
            fixed,
            Rewrite::InsertDocBlocks.apply(text),
            "duplicate findings must not re-apply the rewrite"
        );
    }

    #[test]
    fn test_scan_then_apply_all_scenario() {
        let text = "var x = 1;\nif (x == 1) { console.log('y'); }";
        let res = run_scan(text, &RuleSet::builtin());
        let fixed = apply_all(text, &res.findings);
        assert!(fixed.contains("const x = 1;"));
        assert!(fixed.contains("x === 1"));
        assert!(!fixed.contains("console.log"));

        // fixed text is re-scannable and clean of the fixed rules
        let rescanned = run_scan(&fixed, &RuleSet::builtin());
        for rule in ["loose-equality", "no-var", "no-console"] {
            assert!(rescanned.findings.iter().all(|f| f.rule != rule));
        }
    }

    #[test]
    fn test_fix_files_write_and_check_modes() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("a.js"), "// note\nvar x = 1;\n").unwrap();

        // preview mode leaves the file alone and captures both sides
        let (results, errors) = fix_files(
            root,
            &["a.js".to_string()],
            &RuleSet::builtin(),
            &[],
            false,
            true,
        );
        assert!(errors.is_empty());
        assert!(results[0].changed);
        assert!(results[0].preview.as_deref().unwrap().contains("const x"));
        assert_eq!(
            std::fs::read_to_string(root.join("a.js")).unwrap(),
            "// note\nvar x = 1;\n"
        );

        // write mode updates in place
        let (results, _) = fix_files(
            root,
            &["a.js".to_string()],
            &RuleSet::builtin(),
            &[],
            true,
            false,
        );
        assert!(results[0].changed);
        assert!(std::fs::read_to_string(root.join("a.js"))
            .unwrap()
            .contains("const x = 1;"));
    }

    #[test]
    fn test_fix_files_named_rewrites_only() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("a.js"), "let a = 1;\nvar b = 2;\n").unwrap();

        let (results, _) = fix_files(
            root,
            &["a.js".to_string()],
            &RuleSet::builtin(),
            &[Rewrite::PreferConst],
            true,
            false,
        );
        assert!(results[0].changed);
        let out = std::fs::read_to_string(root.join("a.js")).unwrap();
        // only the named rewrite ran; `var` is untouched
        assert!(out.contains("const a = 1;"));
        assert!(out.contains("var b = 2;"));
    }
}
