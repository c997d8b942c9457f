//! Output rendering for scan, fix, rules, and tester commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::fix::FixResult;
use crate::models::rule::Severity;
use crate::models::{FileReport, Summary};
use crate::rules::{PatternProbe, RuleSet};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn severity_tag(severity: Severity, color: bool) -> String {
    match severity {
        Severity::Error => {
            if color {
                "⟦error⟧".red().bold().to_string()
            } else {
                "⟦error⟧".to_string()
            }
        }
        Severity::Warning => {
            if color {
                "⟦warn⟧".yellow().bold().to_string()
            } else {
                "⟦warn⟧".to_string()
            }
        }
        Severity::Info => {
            if color {
                "⟦info⟧".blue().bold().to_string()
            } else {
                "⟦info⟧".to_string()
            }
        }
    }
}

fn severity_icon(severity: Severity, color: bool) -> String {
    let (glyph, colored) = match severity {
        Severity::Error => ("✖", "✖".red().to_string()),
        Severity::Warning => ("▲", "▲".yellow().to_string()),
        Severity::Info => ("◆", "◆".blue().to_string()),
    };
    if color {
        colored
    } else {
        glyph.to_string()
    }
}

/// Print scan reports in the requested format.
pub fn print_scan(reports: &[FileReport], summary: &Summary, output: &str, errors: &[String]) {
    for e in errors {
        eprintln!("{} {}", crate::utils::error_prefix(), e);
    }
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scan_json(reports, summary)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for r in reports {
                for f in &r.result.findings {
                    let loc = format!("{}:{}", r.file, f.line);
                    let loc = if color { loc.bold().to_string() } else { loc };
                    println!(
                        "{} {} {} ❲{}❳ — {}",
                        severity_icon(f.severity, color),
                        severity_tag(f.severity, color),
                        loc,
                        f.rule,
                        f.message
                    );
                }
                for note in &r.result.notes {
                    println!("{} {}", crate::utils::note_prefix(), note);
                }
                let line = format!(
                    "score {} — {}/10 ({} findings)",
                    r.file,
                    r.result.score,
                    r.result.findings.len()
                );
                if color {
                    println!("{}", line.bold());
                } else {
                    println!("{}", line);
                }
            }
            let line = format!(
                "— Summary — errors={} warnings={} infos={} files={}",
                summary.errors, summary.warnings, summary.infos, summary.files
            );
            if color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Print fix results. When `write` is false, previews and diffs can be
/// emitted; otherwise only file statuses are shown.
pub fn print_fix(results: &[FixResult], output: &str, write: bool, diff: bool, errors: &[String]) {
    for e in errors {
        eprintln!("{} {}", crate::utils::error_prefix(), e);
    }
    match output {
        "json" => {
            let out = compose_fix_json(results, write, diff);
            println!("{}", serde_json::to_string_pretty(&out).unwrap());
        }
        _ => {
            let color = use_colors(output);
            for r in results {
                if write {
                    if r.changed {
                        if color {
                            println!("{} {}", "✏️  fixed:".green().bold(), r.file.bold());
                        } else {
                            println!("✏️  fixed: {}", r.file);
                        }
                    }
                } else if r.changed {
                    if diff {
                        if let Some(d) =
                            build_naive_diff(r.original.as_deref(), r.preview.as_deref())
                        {
                            if color {
                                println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), d);
                            } else {
                                println!("--- {}\n{}", r.file, d);
                            }
                        }
                    } else if let Some(prev) = &r.preview {
                        if color {
                            println!("{} {}\n{}", "---".cyan().bold(), r.file.bold(), prev);
                        } else {
                            println!("--- {}\n{}", r.file, prev);
                        }
                    }
                } else if color {
                    println!("{} {}", "no changes:".bright_black().to_string(), r.file);
                } else {
                    println!("no changes: {}", r.file);
                }
            }
        }
    }
}

/// Print the effective rule set.
pub fn print_rules(rules: &RuleSet, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_rules_json(rules)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            for rule in rules.iter() {
                let mark = if rule.enabled { "[x]" } else { "[ ]" };
                let origin = if rule.built_in { "built-in" } else { "custom" };
                let mut line = format!(
                    "{} {} ({} / {} / {}) — {}",
                    mark,
                    rule.id,
                    rule.severity.as_str(),
                    rule.category,
                    origin,
                    rule.message
                );
                if let Some(rw) = &rule.rewrite {
                    line.push_str(&format!(" [auto-fix: {}]", rw.name()));
                }
                if color && !rule.enabled {
                    println!("{}", line.bright_black());
                } else {
                    println!("{}", line);
                }
            }
        }
    }
}

/// Print pattern tester output.
pub fn print_probe(probe: &PatternProbe, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(probe).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            if let Some(err) = &probe.error {
                eprintln!("{} {}", crate::utils::error_prefix(), err);
                return;
            }
            for m in &probe.matches {
                let loc = format!("line {}:", m.line);
                if color {
                    println!("{} {}", loc.bold(), m.text);
                } else {
                    println!("{} {}", loc, m.text);
                }
            }
            let line = format!("— {} match(es)", probe.matches.len());
            if color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

fn build_naive_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old = old?;
    let new = new?;
    let mut out = String::new();
    out.push_str("+++ new\n");
    out.push_str(new);
    out.push('\n');
    out.push_str("--- old\n");
    out.push_str(old);
    Some(out)
}

/// Compose scan JSON object (pure) for testing/snapshot purposes.
pub fn compose_scan_json(reports: &[FileReport], summary: &Summary) -> JsonVal {
    json!({
        "results": serde_json::to_value(reports).unwrap(),
        "summary": serde_json::to_value(summary).unwrap(),
    })
}

/// Compose fix JSON object (pure) for testing/snapshot purposes.
pub fn compose_fix_json(results: &[FixResult], write: bool, diff: bool) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "wrote": write && r.changed,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { build_naive_diff(r.original.as_deref(), r.preview.as_deref()) } else { None }
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "total": results.len(),
        "wrote": if write { results.iter().filter(|r| r.changed).count() } else { 0 },
    });
    json!({"results": items, "summary": summary})
}

/// Compose rules JSON object (pure) for testing/snapshot purposes.
pub fn compose_rules_json(rules: &RuleSet) -> JsonVal {
    let items: Vec<JsonVal> = rules
        .iter()
        .map(|r| {
            let mut v = serde_json::to_value(r).unwrap();
            v["can_auto_fix"] = JsonVal::Bool(r.can_auto_fix());
            v
        })
        .collect();
    let summary = json!({
        "total": rules.len(),
        "enabled": rules.enabled().count(),
    });
    json!({"rules": items, "summary": summary})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules;
    use crate::scan::run_scan;

    #[test]
    fn test_compose_scan_json_shape() {
        let result = run_scan("// note\nvar x = 1;", &RuleSet::builtin());
        let reports = vec![FileReport {
            file: "a.js".into(),
            result,
        }];
        let summary = Summary::tally(&reports);
        let out = compose_scan_json(&reports, &summary);
        assert_eq!(out["results"][0]["file"], "a.js");
        assert!(out["results"][0]["score"].is_number());
        assert_eq!(out["results"][0]["findings"][0]["rule"], "no-var");
        assert_eq!(out["results"][0]["findings"][0]["severity"], "info");
        assert_eq!(out["results"][0]["findings"][0]["impact"], "low");
        assert_eq!(out["summary"]["files"], 1);
    }

    #[test]
    fn test_compose_fix_json_write_and_preview_diff() {
        let results = vec![
            FixResult {
                file: "a.js".into(),
                changed: true,
                preview: Some("const x = 1;".into()),
                original: Some("var x = 1;".into()),
            },
            FixResult {
                file: "b.js".into(),
                changed: false,
                preview: None,
                original: Some("const y = 2;".into()),
            },
        ];
        // Case: write=false, diff=true ⇒ previews and diffs present for changed item
        let out = compose_fix_json(&results, false, true);
        assert_eq!(out["summary"]["changed"], 1);
        assert_eq!(out["summary"]["wrote"], 0);
        assert!(out["results"][0]["preview"].is_string());
        assert!(out["results"][0]["diff"].is_string());
        // Case: write=true ⇒ no preview/diff, wrote equals changed
        let out2 = compose_fix_json(&results, true, false);
        assert_eq!(out2["summary"]["wrote"], 1);
        assert!(out2["results"][0]["preview"].is_null());
        assert!(out2["results"][0]["diff"].is_null());
    }

    #[test]
    fn test_compose_rules_json_marks_auto_fix() {
        let out = compose_rules_json(&RuleSet::builtin());
        assert_eq!(out["summary"]["total"], 6);
        assert_eq!(out["rules"][0]["id"], "loose-equality");
        assert_eq!(out["rules"][0]["can_auto_fix"], true);
        assert_eq!(out["rules"][3]["can_auto_fix"], false);
    }

    #[test]
    fn test_probe_serializes_error_entry() {
        let probe = rules::test_pattern("(bad", "x");
        let v = serde_json::to_value(&probe).unwrap();
        assert_eq!(v["error"], "Invalid regex pattern");
        assert!(v["matches"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_severity_tags_without_color() {
        assert_eq!(severity_tag(Severity::Error, false), "⟦error⟧");
        assert_eq!(severity_icon(Severity::Warning, false), "▲");
    }
}
