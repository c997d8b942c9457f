//! Rule schema shared by built-in and user-declared rules.
//!
//! Key components:
//! - `Severity`: reported level (`error|warning|info`) with a derived
//!   `Impact` (`high|medium|low`) used for triage display and the
//!   critical-issue filter.
//! - `Rule`: a named pattern plus metadata and an optional `Rewrite`.
//!   Built-in rules are immutable; user rules come from `[[rules.custom]]`
//!   tables in the config file.
//! - `Rewrite`: the catalog of deterministic whole-text transformations a
//!   rule may carry. Application lives in the `fix` module.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Reported level of a rule or finding.
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Default impact mapping: error→high, warning→medium, info→low.
    pub fn impact(self) -> Impact {
        match self {
            Severity::Error => Impact::High,
            Severity::Warning => Impact::Medium,
            Severity::Info => Impact::Low,
        }
    }

    /// Parse a config/CLI token (`error|warning|info`).
    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "error" => Some(Severity::Error),
            "warning" | "warn" => Some(Severity::Warning),
            "info" => Some(Severity::Info),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Severity::Error => 2,
            Severity::Warning => 1,
            Severity::Info => 0,
        }
    }

    /// True when `self` is at least as severe as `min` (used by `--fail-on`).
    pub fn at_least(self, min: Severity) -> bool {
        self.rank() >= min.rank()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Triage weight of a finding. Usually derived from severity; the
/// missing-comments check reports `info` severity with `medium` impact.
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// A deterministic whole-text transformation associated with a rule.
pub enum Rewrite {
    /// Replace bare `==` (not part of `===`/`!=`) with `===`.
    StrictEquality,
    /// Replace the `var` declarator with `const`.
    ConstDeclarations,
    /// Delete whole `console.log(...)` statements.
    RemoveDebugPrints,
    /// Wrap awaited expressions in try/catch unless the text already has one.
    WrapErrorHandling,
    /// Turn `let x = v;` into `const x = v;` when the next statement does not
    /// reassign `x`.
    PreferConst,
    /// Prepend a generic doc block above each function-like declaration.
    InsertDocBlocks,
    /// User-declared regex substitution.
    Template { pattern: String, replacement: String },
}

#[derive(Debug, Clone, Serialize)]
/// A named pattern plus metadata and an optional rewrite.
pub struct Rule {
    pub id: String,
    pub name: String,
    pub pattern: String,
    pub message: String,
    pub suggestion: String,
    pub category: String,
    pub severity: Severity,
    pub enabled: bool,
    pub built_in: bool,
    #[serde(skip)]
    pub rewrite: Option<Rewrite>,
}

impl Rule {
    /// Compile the rule's pattern. Built-in patterns carry their own inline
    /// flags; user patterns compile case-insensitively.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        if self.built_in {
            Regex::new(&self.pattern)
        } else {
            RegexBuilder::new(&self.pattern)
                .case_insensitive(true)
                .build()
        }
    }

    pub fn can_auto_fix(&self) -> bool {
        self.rewrite.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_impact_and_order() {
        assert_eq!(Severity::Error.impact(), Impact::High);
        assert_eq!(Severity::Warning.impact(), Impact::Medium);
        assert_eq!(Severity::Info.impact(), Impact::Low);
        assert!(Severity::Error.at_least(Severity::Warning));
        assert!(!Severity::Info.at_least(Severity::Warning));
        assert_eq!(Severity::parse("warn"), Some(Severity::Warning));
        assert_eq!(Severity::parse("fatal"), None);
    }

    #[test]
    fn test_user_patterns_compile_case_insensitive() {
        let rule = Rule {
            id: "no-todo".into(),
            name: "No TODO".into(),
            pattern: "todo".into(),
            message: "TODO marker found".into(),
            suggestion: String::new(),
            category: "style".into(),
            severity: Severity::Warning,
            enabled: true,
            built_in: false,
            rewrite: None,
        };
        let re = rule.compile().unwrap();
        assert!(re.is_match("// TODO: later"));
    }
}
