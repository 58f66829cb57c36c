//! Local docker engine operations.

use anyhow::{bail, Result};
use std::path::Path;

use crate::process::Cmd;

/// A KEY=VALUE build-time argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArg {
    pub key: String,
    pub value: String,
}

impl BuildArg {
    /// Parse a `KEY=VALUE` pair. The value may be empty; the key may not.
    pub fn parse(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Self {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => bail!("Invalid build arg '{}', expected KEY=VALUE", s),
        }
    }

    fn render(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Prune unused docker data (stopped containers, dangling images, caches).
pub fn prune() -> Result<()> {
    Cmd::new("docker")
        .args(["system", "prune", "--force"])
        .error_msg("docker prune failed")
        .run()?;
    Ok(())
}

/// Prune, ignoring failures. The pipeline reclaims space between steps
/// this way; a failed prune never aborts a publish.
pub fn prune_best_effort() {
    if let Err(e) = prune() {
        eprintln!("[WARN] {:#} (continuing)", e);
    }
}

/// Build `name:latest` from the recipe directory with caching disabled.
///
/// The recipe directory is the child's working directory; the parent
/// process never changes directory.
pub fn build(recipe_dir: &Path, name: &str, build_args: &[BuildArg]) -> Result<()> {
    let mut cmd = Cmd::new("docker")
        .args(["build", "--no-cache", "--tag"])
        .arg(format!("{}:latest", name));

    for arg in build_args {
        cmd = cmd.arg("--build-arg").arg(arg.render());
    }

    cmd.arg(".")
        .dir(recipe_dir)
        .error_msg(format!("docker build of '{}' failed", name))
        .run_interactive()?;

    Ok(())
}

/// Print the local images for `name`. Observability only; failure ignored.
pub fn list_images(name: &str) {
    if let Ok(result) = Cmd::new("docker").args(["images", name]).allow_fail().run() {
        if result.success() {
            print!("{}", result.stdout);
        }
    }
}

/// Tag `name:latest` with the fully qualified registry reference.
pub fn tag(name: &str, uri: &str) -> Result<()> {
    Cmd::new("docker")
        .arg("tag")
        .arg(format!("{}:latest", name))
        .arg(uri)
        .error_msg(format!("docker tag of '{}' failed", name))
        .run()?;
    Ok(())
}

/// Push the tagged image to the registry. A failed push is fatal.
pub fn push(uri: &str) -> Result<()> {
    Cmd::new("docker")
        .args(["push", uri])
        .error_msg(format!("docker push of '{}' failed", uri))
        .run_interactive()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_arg_parses_key_value() {
        let arg = BuildArg::parse("GITHUB_TOKEN=abc123").unwrap();
        assert_eq!(arg.key, "GITHUB_TOKEN");
        assert_eq!(arg.value, "abc123");
    }

    #[test]
    fn build_arg_value_may_contain_equals() {
        let arg = BuildArg::parse("OPTS=a=b").unwrap();
        assert_eq!(arg.key, "OPTS");
        assert_eq!(arg.value, "a=b");
    }

    #[test]
    fn build_arg_empty_value_allowed() {
        let arg = BuildArg::parse("EMPTY=").unwrap();
        assert_eq!(arg.key, "EMPTY");
        assert_eq!(arg.value, "");
    }

    #[test]
    fn build_arg_rejects_missing_separator() {
        assert!(BuildArg::parse("NOVALUE").is_err());
    }

    #[test]
    fn build_arg_rejects_empty_key() {
        assert!(BuildArg::parse("=value").is_err());
    }

    #[test]
    fn build_arg_renders_back() {
        let arg = BuildArg::parse("KEY=value").unwrap();
        assert_eq!(arg.render(), "KEY=value");
    }
}
