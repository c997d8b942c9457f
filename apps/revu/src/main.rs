//! Revu CLI binary entry point.
//! Delegates to modules for scan/fix/rules/explain and prints results.

mod assist;
mod checks;
mod cli;
mod config;
mod fix;
mod metrics;
mod models;
mod output;
mod rules;
mod scan;
mod utils;

use crate::models::rule::Rewrite;
use crate::models::Summary;
use clap::Parser;
use cli::{Cli, Commands, RulesCmd};
// Colorization centralized in utils; no direct owo_colors usage here
use std::fs;

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Scan {
            repo_root,
            config,
            output,
            fail_on,
            paths,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                config.as_deref(),
                output.as_deref(),
                fail_on.as_deref(),
                None,
                None,
                None,
            );
            // Friendly note if no revu config was found
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    crate::utils::note_prefix(),
                    "No revu.toml found; using defaults."
                );
            }
            let rules = config::effective_rules(&eff);
            let (reports, errors) = scan::scan_files(&eff.repo_root, &paths, &rules);
            if reports.is_empty() && !errors.is_empty() {
                for e in &errors {
                    eprintln!("{} {}", crate::utils::error_prefix(), e);
                }
                std::process::exit(2);
            }
            let summary = Summary::tally(&reports);
            output::print_scan(&reports, &summary, &eff.output, &errors);
            if summary.at_least(eff.fail_on) > 0 {
                std::process::exit(1);
            }
        }
        Commands::Fix {
            repo_root,
            config,
            write,
            diff,
            check,
            output,
            rewrite,
            paths,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                config.as_deref(),
                output.as_deref(),
                None,
                if write { Some(true) } else { None },
                if diff { Some(true) } else { None },
                if check { Some(true) } else { None },
            );
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    crate::utils::note_prefix(),
                    "No revu.toml found; using defaults."
                );
            }
            // Resolve named rewrites before touching any file
            let mut only: Vec<Rewrite> = Vec::new();
            for name in &rewrite {
                match Rewrite::from_name(name) {
                    Some(rw) => only.push(rw),
                    None => {
                        eprintln!(
                            "{} {}",
                            crate::utils::error_prefix(),
                            format!(
                                "unknown rewrite '{}' (try strict-equality, const-declarations, remove-debug-prints, wrap-error-handling, prefer-const, insert-doc-blocks)",
                                name
                            )
                        );
                        std::process::exit(2);
                    }
                }
            }
            // CLI/config precedence at runtime:
            // - If diff or check is enabled, force write=false for this run.
            // - Otherwise respect write.
            let eff_diff = eff.diff;
            let eff_check = eff.check;
            let eff_write = if eff_diff || eff_check {
                false
            } else {
                eff.write
            };
            let rules = config::effective_rules(&eff);
            let (results, errors) = fix::fix_files(
                &eff.repo_root,
                &paths,
                &rules,
                &only,
                eff_write,
                !eff_write,
            );
            if results.is_empty() && !errors.is_empty() {
                for e in &errors {
                    eprintln!("{} {}", crate::utils::error_prefix(), e);
                }
                std::process::exit(2);
            }
            output::print_fix(&results, &eff.output, eff_write, eff_diff, &errors);
            if eff_check && results.iter().any(|r| r.changed) {
                std::process::exit(1);
            }
        }
        Commands::Rules { cmd } => match cmd {
            RulesCmd::List {
                repo_root,
                config,
                output,
            } => {
                let eff = config::resolve_effective(
                    repo_root.as_deref(),
                    config.as_deref(),
                    output.as_deref(),
                    None,
                    None,
                    None,
                    None,
                );
                let rules = config::effective_rules(&eff);
                output::print_rules(&rules, &eff.output);
            }
            RulesCmd::Test {
                pattern,
                sample,
                file,
                output,
            } => {
                let output = output.unwrap_or_else(|| "human".to_string());
                let sample_text = match (sample, file) {
                    (Some(s), None) => s,
                    (None, Some(path)) => match fs::read_to_string(&path) {
                        Ok(s) => s,
                        Err(e) => {
                            eprintln!(
                                "{} {}",
                                crate::utils::error_prefix(),
                                format!("failed to read {}: {}", path, e)
                            );
                            std::process::exit(2);
                        }
                    },
                    _ => {
                        eprintln!(
                            "{} {}",
                            crate::utils::error_prefix(),
                            "pass exactly one of --sample or --file"
                        );
                        std::process::exit(2);
                    }
                };
                let probe = rules::test_pattern(&pattern, &sample_text);
                let malformed = probe.error.is_some();
                output::print_probe(&probe, &output);
                if malformed {
                    std::process::exit(2);
                }
            }
        },
        Commands::Explain {
            repo_root,
            config,
            path,
            question,
        } => {
            let eff = config::resolve_effective(
                repo_root.as_deref(),
                config.as_deref(),
                None,
                None,
                None,
                None,
                None,
            );
            let full = eff.repo_root.join(&path);
            let text = match fs::read_to_string(&full) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!(
                        "{} {}",
                        crate::utils::error_prefix(),
                        format!("failed to read {}: {}", full.to_string_lossy(), e)
                    );
                    std::process::exit(2);
                }
            };
            let rules = config::effective_rules(&eff);
            let result = scan::scan_with_fallback(&text, &rules);
            match question {
                Some(q) => println!("{}", assist::respond(Some(&result), &q)),
                None => println!("{}", assist::greeting(&result)),
            }
        }
    }
}
