//! Preflight check tests.
//!
//! Preflight mirrors the pipeline's precondition checks but is read-only;
//! these tests cover both the verdicts and the no-side-effects contract.

mod helpers;

use batchprep::preflight::{check_recipe, check_recipes_root, CheckStatus};
use helpers::TestEnv;
use std::fs;
use std::os::unix::fs::PermissionsExt;

fn strip_exec_bit(path: &std::path::Path) {
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o644);
    fs::set_permissions(path, perms).unwrap();
}

#[test]
fn recipes_root_found() {
    let env = TestEnv::new();

    let result = check_recipes_root(&env.config());

    assert_eq!(result.status, CheckStatus::Pass);
}

#[test]
fn recipes_root_missing_fails() {
    let env = TestEnv::new();
    let mut config = env.config();
    config.recipes_dir = env.base_dir.join("not_a_recipes_root");

    let result = check_recipes_root(&config);

    assert_eq!(result.status, CheckStatus::Fail);
    assert!(result.details.unwrap().contains("RECIPES_DIR"));
}

#[test]
fn complete_recipe_passes() {
    let env = TestEnv::new();
    let dir = env.create_recipe("meetup");
    let launch = dir.join("launch.sh");
    let mut perms = fs::metadata(&launch).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&launch, perms).unwrap();

    let results = check_recipe(&env.config(), "meetup");

    assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
}

#[test]
fn non_executable_launch_script_warns() {
    let env = TestEnv::new();
    let dir = env.create_recipe("meetup");
    strip_exec_bit(&dir.join("launch.sh"));

    let results = check_recipe(&env.config(), "meetup");

    let launch = results.iter().find(|r| r.name == "launch.sh").unwrap();
    assert_eq!(launch.status, CheckStatus::Warn);
}

#[test]
fn missing_recipe_dir_is_a_single_failure() {
    let env = TestEnv::new();

    let results = check_recipe(&env.config(), "ghost");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, CheckStatus::Fail);
    assert!(results[0].details.as_ref().unwrap().contains("ghost"));
}

#[test]
fn missing_recipe_files_fail() {
    let env = TestEnv::new();
    fs::create_dir_all(env.recipes_dir.join("empty")).unwrap();

    let results = check_recipe(&env.config(), "empty");

    let failed: Vec<_> = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .map(|r| r.name.as_str())
        .collect();
    assert!(failed.contains(&"Dockerfile"));
    assert!(failed.contains(&"launch.sh"));
}

#[test]
fn preflight_does_not_chmod() {
    let env = TestEnv::new();
    let dir = env.create_recipe("meetup");
    let launch = dir.join("launch.sh");
    strip_exec_bit(&launch);

    check_recipe(&env.config(), "meetup");

    let mode = fs::metadata(&launch).unwrap().permissions().mode();
    assert_eq!(mode & 0o111, 0, "preflight must not mark the script executable");
}
