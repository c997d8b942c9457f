//! Rule set management and the interactive pattern tester.
//!
//! The set holds built-in rules in fixed declaration order followed by user
//! rules in insertion order; scanning walks the set in that order. Built-in
//! rules are immutable (edit/delete are rejected as no-ops), but any rule can
//! be toggled. A malformed user pattern is never fatal: the scanner skips the
//! rule and the tester reports a structured error entry.

use crate::models::rule::{Rewrite, Rule, Severity};
use regex::RegexBuilder;
use serde::Serialize;

/// Ordered rule collection, built-ins first.
pub struct RuleSet {
    rules: Vec<Rule>,
}

fn builtin(
    id: &str,
    name: &str,
    pattern: &str,
    message: &str,
    suggestion: &str,
    category: &str,
    severity: Severity,
    rewrite: Option<Rewrite>,
) -> Rule {
    Rule {
        id: id.to_string(),
        name: name.to_string(),
        pattern: pattern.to_string(),
        message: message.to_string(),
        suggestion: suggestion.to_string(),
        category: category.to_string(),
        severity,
        enabled: true,
        built_in: true,
        rewrite,
    }
}

impl RuleSet {
    /// The six built-in rules in declaration order.
    pub fn builtin() -> RuleSet {
        RuleSet {
            rules: vec![
                builtin(
                    "loose-equality",
                    "Strict equality",
                    r"([^=!])={2}([^=])",
                    "Use strict equality (===) instead of ==",
                    "Replace == with === for strict equality comparison",
                    "Best Practice",
                    Severity::Warning,
                    Some(Rewrite::StrictEquality),
                ),
                builtin(
                    "no-var",
                    "No var declarations",
                    r"\bvar\s+",
                    "Use let or const instead of var",
                    "Use const for immutable values, let for mutable ones",
                    "Best Practice",
                    Severity::Info,
                    Some(Rewrite::ConstDeclarations),
                ),
                builtin(
                    "no-console",
                    "No console logs",
                    r"console\.log",
                    "Console.log statement found",
                    "Remove console.log statements in production code",
                    "Best Practice",
                    Severity::Info,
                    Some(Rewrite::RemoveDebugPrints),
                ),
                builtin(
                    "sql-concat",
                    "No SQL string building",
                    r"(?i)SELECT.*\+.*",
                    "Potential SQL injection vulnerability",
                    "Use parameterized queries to prevent SQL injection",
                    "Security",
                    Severity::Error,
                    None,
                ),
                builtin(
                    "inner-html",
                    "No raw innerHTML",
                    r"(?i)innerHTML.*",
                    "Potential XSS vulnerability with innerHTML",
                    "Use textContent or sanitize HTML content",
                    "Security",
                    Severity::Error,
                    None,
                ),
                builtin(
                    "hardcoded-credentials",
                    "No hardcoded credentials",
                    r"(?i)password.*[=:]",
                    "Hardcoded credentials detected",
                    "Move credentials to environment variables",
                    "Security",
                    Severity::Error,
                    None,
                ),
            ],
        }
    }

    /// Empty set; useful for targeted tests.
    pub fn empty() -> RuleSet {
        RuleSet { rules: Vec::new() }
    }

    /// Append a user rule. Rejected when the id is already taken.
    pub fn add(&mut self, mut rule: Rule) -> bool {
        if self.get(&rule.id).is_some() {
            return false;
        }
        rule.built_in = false;
        self.rules.push(rule);
        true
    }

    /// Replace a user rule in place, keeping its position. Built-in rules are
    /// immutable; editing one is a no-op.
    pub fn edit(&mut self, id: &str, mut rule: Rule) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(slot) if !slot.built_in => {
                rule.id = id.to_string();
                rule.built_in = false;
                *slot = rule;
                true
            }
            _ => false,
        }
    }

    /// Delete a user rule. Built-in rules cannot be removed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.rules.iter().position(|r| r.id == id) {
            Some(idx) if !self.rules[idx].built_in => {
                self.rules.remove(idx);
                true
            }
            _ => false,
        }
    }

    /// Flip the enabled flag of any rule.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.enabled = !rule.enabled;
                true
            }
            None => false,
        }
    }

    /// Force the enabled flag of any rule.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
/// One tester hit: 1-based line, matched text, byte offset into the sample.
pub struct ProbeMatch {
    pub line: usize,
    pub text: String,
    pub offset: usize,
}

#[derive(Debug, Clone, Serialize)]
/// Tester output. A malformed pattern yields `error` instead of a panic so
/// interactive rule authoring never crashes the host.
pub struct PatternProbe {
    pub matches: Vec<ProbeMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run `pattern` against `sample` the way the scanner would run a user rule
/// (case-insensitive), reporting every match with its line number.
pub fn test_pattern(pattern: &str, sample: &str) -> PatternProbe {
    let re = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(_) => {
            return PatternProbe {
                matches: Vec::new(),
                error: Some("Invalid regex pattern".to_string()),
            }
        }
    };
    let matches = re
        .find_iter(sample)
        .map(|m| ProbeMatch {
            line: sample[..m.start()].matches('\n').count() + 1,
            text: m.as_str().to_string(),
            offset: m.start(),
        })
        .collect();
    PatternProbe {
        matches,
        error: None,
    }
}
