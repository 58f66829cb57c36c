//! Recipe precondition checks.
//!
//! Mirrors the validation the publish pipeline performs, but without side
//! effects: preflight reports, it does not chmod.

use std::os::unix::fs::PermissionsExt;

use crate::config::Config;
use crate::recipe::{DESCRIPTOR, LAUNCH_SCRIPT};

use super::types::CheckResult;

/// Check the recipes root exists.
pub fn check_recipes_root(config: &Config) -> CheckResult {
    if config.recipes_dir.is_dir() {
        CheckResult::pass_with("recipes root", &config.recipes_dir.display().to_string())
    } else {
        CheckResult::fail(
            "recipes root",
            &format!(
                "Not found: {}. Create it or set RECIPES_DIR.",
                config.recipes_dir.display()
            ),
        )
    }
}

/// Check one recipe's preconditions.
pub fn check_recipe(config: &Config, name: &str) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let dir = config.recipes_dir.join(name);

    if !dir.is_dir() {
        results.push(CheckResult::fail(
            "recipe directory",
            &format!("Not found: {}", dir.display()),
        ));
        return results;
    }
    results.push(CheckResult::pass_with(
        "recipe directory",
        &dir.display().to_string(),
    ));

    let descriptor = dir.join(DESCRIPTOR);
    if descriptor.is_file() {
        results.push(CheckResult::pass(DESCRIPTOR));
    } else {
        results.push(CheckResult::fail(
            DESCRIPTOR,
            &format!("Not found: {}", descriptor.display()),
        ));
    }

    let launch = dir.join(LAUNCH_SCRIPT);
    if !launch.is_file() {
        results.push(CheckResult::fail(
            LAUNCH_SCRIPT,
            &format!("Not found: {}", launch.display()),
        ));
    } else if is_executable(&launch) {
        results.push(CheckResult::pass(LAUNCH_SCRIPT));
    } else {
        results.push(CheckResult::warn(
            LAUNCH_SCRIPT,
            "Not executable yet (publish will mark it)",
        ));
    }

    results
}

fn is_executable(path: &std::path::Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
