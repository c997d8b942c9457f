//! Configuration discovery and effective settings resolution.
//!
//! Revu reads `revu.toml|yaml|yml` from the repository root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `fail_on`: `error`
//! - `fix.write|diff|check`: false
//! - `rules.disable`: empty
//! - `rules.custom`: empty
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::rule::{Rewrite, Rule, Severity};
use crate::rules::RuleSet;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Fix-related configuration section under `[fix]`.
pub struct FixCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Rule configuration: toggles plus user rule declarations.
pub struct RulesCfg {
    /// Rule ids (built-in or custom) to disable for every run.
    #[serde(default)]
    pub disable: Vec<String>,
    /// User rules, declared as `[[rules.custom]]` tables.
    #[serde(default)]
    pub custom: Vec<RuleCfg>,
}

#[derive(Debug, Deserialize, Clone)]
/// One user rule as written in the config file.
pub struct RuleCfg {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub pattern: String,
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Either the name of a built-in rewrite or an inline substitution.
    #[serde(default)]
    pub fix: Option<FixRef>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
/// Reference to a rewrite from a user rule.
pub enum FixRef {
    Named(String),
    Substitution { pattern: String, replacement: String },
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `revu.toml|yaml`.
pub struct RevuConfig {
    pub output: Option<String>,
    pub fail_on: Option<String>,
    #[serde(default)]
    pub fix: Option<FixCfg>,
    #[serde(default)]
    pub rules: Option<RulesCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub output: String,
    pub fail_on: Severity,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
    pub disabled: Vec<String>,
    pub custom_rules: Vec<RuleCfg>,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `revu.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("revu.toml").exists()
            || cur.join("revu.yaml").exists()
            || cur.join("revu.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `RevuConfig` from `revu.toml` or `revu.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<RevuConfig> {
    let toml_path = root.join("revu.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: RevuConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["revu.yaml", "revu.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: RevuConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Load a config from an explicit `--config` path, by extension.
pub fn load_config_at(path: &Path) -> Option<RevuConfig> {
    let s = fs::read_to_string(path).ok()?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&s).ok(),
        _ => toml::from_str(&s).ok(),
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
    cli_fail_on: Option<&str>,
    cli_write: Option<bool>,
    cli_diff: Option<bool>,
    cli_check: Option<bool>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = match cli_config {
        Some(path) => load_config_at(Path::new(path)),
        None => load_config(&repo_root),
    };
    let config_found = cfg.is_some();
    let cfg = cfg.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let fail_on = cli_fail_on
        .map(|s| s.to_string())
        .or(cfg.fail_on)
        .and_then(|s| Severity::parse(&s))
        .unwrap_or(Severity::Error);

    let write = cli_write
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli_diff
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli_check
        .or_else(|| cfg.fix.as_ref().and_then(|f| f.check))
        .unwrap_or(false);

    let (disabled, custom_rules) = match cfg.rules {
        Some(r) => (r.disable, r.custom),
        None => (Vec::new(), Vec::new()),
    };

    Effective {
        repo_root,
        output,
        fail_on,
        write,
        diff,
        check,
        disabled,
        custom_rules,
        config_found,
    }
}

/// Materialize the effective rule set: built-ins, then user rules in config
/// order, then disables.
pub fn effective_rules(eff: &Effective) -> RuleSet {
    let mut set = RuleSet::builtin();
    for cfg in &eff.custom_rules {
        let rewrite = cfg.fix.as_ref().and_then(|f| match f {
            FixRef::Named(name) => Rewrite::from_name(name),
            FixRef::Substitution {
                pattern,
                replacement,
            } => Some(Rewrite::Template {
                pattern: pattern.clone(),
                replacement: replacement.clone(),
            }),
        });
        set.add(Rule {
            id: cfg.id.clone(),
            name: cfg.name.clone().unwrap_or_else(|| cfg.id.clone()),
            pattern: cfg.pattern.clone(),
            message: cfg.message.clone(),
            suggestion: cfg.suggestion.clone().unwrap_or_default(),
            category: cfg.category.clone().unwrap_or_else(|| "custom".to_string()),
            severity: cfg.severity.unwrap_or(Severity::Warning),
            enabled: cfg.enabled,
            built_in: false,
            rewrite,
        });
    }
    for id in &eff.disabled {
        set.set_enabled(id, false);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_detect_repo_root_walks_up_to_config() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("revu.toml"), "output = \"json\"\n").unwrap();
        let nested = root.join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(detect_repo_root(&nested), root);
    }

    #[test]
    fn test_toml_config_with_custom_rules() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        let cfg = r#"
output = "json"
fail_on = "warning"

[fix]
write = true

[rules]
disable = ["no-console"]

[[rules.custom]]
id = "no-todo"
pattern = "TODO"
message = "TODO marker found"
severity = "info"
fix = "prefer-const"

[[rules.custom]]
id = "no-alert"
pattern = "alert\\("
message = "alert() call found"
fix = { pattern = "alert\\(", replacement = "notify(" }
"#;
        std::fs::write(root.join("revu.toml"), cfg).unwrap();

        let eff = resolve_effective(
            Some(root.to_str().unwrap()),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert!(eff.config_found);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.fail_on, Severity::Warning);
        assert!(eff.write);

        let rules = effective_rules(&eff);
        assert!(!rules.get("no-console").unwrap().enabled);
        let todo = rules.get("no-todo").unwrap();
        assert_eq!(todo.severity, Severity::Info);
        assert_eq!(todo.rewrite, Some(Rewrite::PreferConst));
        let alert = rules.get("no-alert").unwrap();
        assert_eq!(alert.severity, Severity::Warning);
        assert!(matches!(alert.rewrite, Some(Rewrite::Template { .. })));
    }

    #[test]
    fn test_yaml_config_is_accepted() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        let cfg = "output: json\nrules:\n  disable:\n    - no-var\n";
        std::fs::write(root.join("revu.yaml"), cfg).unwrap();

        let eff = resolve_effective(
            Some(root.to_str().unwrap()),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert_eq!(eff.output, "json");
        assert_eq!(eff.disabled, vec!["no-var".to_string()]);
    }

    #[test]
    fn test_cli_flags_override_config() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(
            root.join("revu.toml"),
            "output = \"json\"\nfail_on = \"info\"\n",
        )
        .unwrap();

        let eff = resolve_effective(
            Some(root.to_str().unwrap()),
            None,
            Some("human"),
            Some("error"),
            Some(true),
            None,
            None,
        );
        assert_eq!(eff.output, "human");
        assert_eq!(eff.fail_on, Severity::Error);
        assert!(eff.write);
    }

    #[test]
    fn test_defaults_without_config() {
        let tmp = tempdir().unwrap();
        let eff = resolve_effective(
            Some(tmp.path().to_str().unwrap()),
            None,
            None,
            None,
            None,
            None,
            None,
        );
        assert!(!eff.config_found);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.fail_on, Severity::Error);
        assert!(!eff.write && !eff.diff && !eff.check);
        assert_eq!(effective_rules(&eff).len(), RuleSet::builtin().len());
    }
}
