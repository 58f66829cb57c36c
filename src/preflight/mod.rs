//! Preflight checks for batchprep.
//!
//! Validates host tools and recipe contents before publishing.
//! Run with `batchprep preflight <name>` to check everything is ready.

mod host_tools;
mod recipes;
mod types;

use anyhow::{bail, Result};

use crate::config::Config;

pub use types::{CheckResult, CheckStatus, PreflightReport};

pub use recipes::{check_recipe, check_recipes_root};

/// Run all preflight checks.
///
/// Recipe checks only run when a package name is given.
pub fn run_preflight(config: &Config, name: Option<&str>) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    println!("Checking host tools...");
    checks.extend(host_tools::check_host_tools());

    println!("Checking recipes root...");
    checks.push(recipes::check_recipes_root(config));

    if let Some(name) = name {
        println!("Checking recipe '{}'...", name);
        checks.extend(recipes::check_recipe(config, name));
    }

    println!();

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config, name: Option<&str>) -> Result<()> {
    let report = run_preflight(config, name);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before publishing.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}
