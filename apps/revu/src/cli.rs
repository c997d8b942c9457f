//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "revu",
    version,
    about = "Revu (Rust + regex rules)",
    long_about = "Revu — a tiny, fast CLI to scan, score, and auto-fix source snippets with pattern-based review rules.\n\nConfiguration precedence: CLI > revu.toml > defaults.",
    after_help = "Examples:\n  revu scan src/app.js\n  revu scan \"src/**/*.js\" --fail-on warning --output json\n  revu fix src/app.js --diff\n  revu rules test --pattern \"console\\\\.log\" --sample \"console.log('x');\"\n  revu explain src/app.js --question \"what is critical?\"",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for scanning, fixing, and rule management.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current revu version."
    )]
    Version,
    /// Scan files with the enabled rules
    #[command(
        about = "Run review scan",
        long_about = "Scan the given files or glob patterns with the enabled rules, print findings and derived quality metrics. Findings at or above --fail-on set the exit code.",
        after_help = "Examples:\n  revu scan src/app.js\n  revu scan \"src/**/*.js\" --output json\n  revu scan src/app.js --fail-on warning"
    )]
    Scan {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Explicit config file (default: discovered revu.toml)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Exit non-zero at this severity: error|warning|info (default: error)")]
        fail_on: Option<String>,
        #[arg(required = true, help = "Files or glob patterns to scan")]
        paths: Vec<String>,
    },
    /// Apply deterministic auto-fixes
    #[command(
        about = "Apply auto-fixes",
        long_about = "Scan each file and apply every eligible rewrite, or only the rewrites named with --rewrite. When --diff or --check is set, write is disabled.",
        after_help = "Examples:\n  revu fix src/app.js --diff\n  revu fix src/app.js --write\n  revu fix src/app.js --rewrite prefer-const --write"
    )]
    Fix {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Explicit config file (default: discovered revu.toml)")]
        config: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Write changes to files")]
        write: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Show diffs for changed files (implies write=false)")]
        diff: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if changes would occur (implies write=false)")]
        check: bool,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Apply only this named rewrite (repeatable)")]
        rewrite: Vec<String>,
        #[arg(required = true, help = "Files or glob patterns to fix")]
        paths: Vec<String>,
    },
    /// Rule management (list/test)
    Rules {
        #[command(subcommand)]
        cmd: RulesCmd,
    },
    /// Explain a scan in plain language
    #[command(
        about = "Explain scan results",
        long_about = "Scan a file and answer a question about the result (critical issues, security, score breakdown...). Without a question, prints a summary greeting.",
        after_help = "Examples:\n  revu explain src/app.js\n  revu explain src/app.js --question \"how do I improve the score?\""
    )]
    Explain {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Explicit config file (default: discovered revu.toml)")]
        config: Option<String>,
        #[arg(help = "File to scan")]
        path: String,
        #[arg(long, help = "Question to answer against the scan result")]
        question: Option<String>,
    },
}

#[derive(Subcommand)]
/// Subcommands for `revu rules`
pub enum RulesCmd {
    /// List the effective rule set
    #[command(
        about = "List rules",
        long_about = "Show built-in and config-declared rules with enabled state, severity, category, and auto-fix capability."
    )]
    List {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Explicit config file (default: discovered revu.toml)")]
        config: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Try a pattern against sample text
    #[command(
        about = "Test a pattern",
        long_about = "Run a rule pattern against sample text the way the scanner would, reporting each match with its line. A malformed pattern yields a structured error, not a crash."
    )]
    Test {
        #[arg(long, help = "Rule pattern (regex, case-insensitive)")]
        pattern: String,
        #[arg(long, help = "Inline sample text")]
        sample: Option<String>,
        #[arg(long, help = "Read sample text from this file")]
        file: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}
