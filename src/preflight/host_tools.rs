//! Host tool availability checks.

use super::types::CheckResult;

/// Check host tools are installed.
pub fn check_host_tools() -> Vec<CheckResult> {
    let required_tools = [
        ("docker", "Required to build, tag and push images"),
        ("aws", "Required for ECR and Batch operations"),
    ];

    required_tools
        .iter()
        .map(|(tool, purpose)| check_tool_exists(tool, purpose))
        .collect()
}

/// Check if a tool exists in PATH.
fn check_tool_exists(tool: &str, purpose: &str) -> CheckResult {
    match which::which(tool) {
        Ok(path) => CheckResult::pass_with(tool, &path.display().to_string()),
        Err(_) => CheckResult::fail(tool, &format!("Not found in PATH. {}", purpose)),
    }
}
