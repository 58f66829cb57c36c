//! ECR repository, credential and authentication operations.
//!
//! All registry work is delegated to the `aws` and `docker` CLIs; nothing
//! here talks to AWS directly.

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::docker::BuildArg;
use crate::process::Cmd;

/// Marker ECR puts on stderr when a described repository does not exist.
const NOT_FOUND_MARKER: &str = "RepositoryNotFoundException";

/// Ensure the ECR repository `name` exists, creating it if absent.
///
/// The probe failure is only treated as "create it" when ECR reports the
/// repository as missing; any other failure (credentials, network) aborts.
pub fn ensure_repository(config: &Config, name: &str) -> Result<()> {
    let probe = Cmd::new("aws")
        .args(["ecr", "describe-repositories", "--repository-names", name])
        .args(["--profile", config.profile.as_str()])
        .args(["--region", config.region.as_str()])
        .allow_fail()
        .run()?;

    if probe.success() {
        println!("  Repository '{}' already exists", name);
        return Ok(());
    }

    if !is_not_found(&probe.stderr) {
        bail!(
            "Failed to query repository '{}' (exit code {}):\n{}",
            name,
            probe.code(),
            probe.stderr_trimmed()
        );
    }

    println!("  Creating repository '{}'", name);
    Cmd::new("aws")
        .args(["ecr", "create-repository", "--repository-name", name])
        .args(["--profile", config.profile.as_str()])
        .args(["--region", config.region.as_str()])
        .error_msg(format!("Failed to create repository '{}'", name))
        .run()?;

    Ok(())
}

/// Classify a describe-repositories failure: true when the repository is
/// simply absent, false for anything else (auth, network, malformed call).
fn is_not_found(stderr: &str) -> bool {
    stderr.contains(NOT_FOUND_MARKER)
}

/// Resolve the registry host: the configured override, or
/// `<account>.dkr.ecr.<region>.amazonaws.com` derived from the caller's
/// account id.
pub fn registry_host(config: &Config) -> Result<String> {
    if let Some(host) = &config.registry {
        return Ok(host.clone());
    }

    let account = account_id(config)?;
    Ok(format!("{}.dkr.ecr.{}.amazonaws.com", account, config.region))
}

/// Look up the account id for the active profile.
fn account_id(config: &Config) -> Result<String> {
    let result = Cmd::new("aws")
        .args(["sts", "get-caller-identity", "--output", "json"])
        .args(["--profile", config.profile.as_str()])
        .args(["--region", config.region.as_str()])
        .error_msg("Failed to resolve account id")
        .run()?;

    let identity: serde_json::Value = serde_json::from_str(result.stdout_trimmed())
        .context("Unexpected get-caller-identity output")?;

    identity["Account"]
        .as_str()
        .map(|s| s.to_string())
        .context("get-caller-identity returned no Account field")
}

/// Resolve the active profile's access key pair as build args.
///
/// Only runs when the caller passed `--forward-credentials`; recipes that
/// need AWS access inside the image receive the keys explicitly instead of
/// inheriting ambient environment state.
pub fn profile_credentials(config: &Config) -> Result<Vec<BuildArg>> {
    let mut args = Vec::new();

    for (env_name, config_key) in [
        ("AWS_ACCESS_KEY_ID", "aws_access_key_id"),
        ("AWS_SECRET_ACCESS_KEY", "aws_secret_access_key"),
    ] {
        let result = Cmd::new("aws")
            .args(["configure", "get", config_key])
            .args(["--profile", config.profile.as_str()])
            .error_msg(format!(
                "Failed to read {} for profile '{}'",
                config_key, config.profile
            ))
            .run()?;

        let value = result.stdout_trimmed();
        if value.is_empty() {
            bail!("Profile '{}' has no {}", config.profile, config_key);
        }
        args.push(BuildArg {
            key: env_name.to_string(),
            value: value.to_string(),
        });
    }

    Ok(args)
}

/// Authenticate the local docker engine against the registry.
pub fn login(config: &Config, registry: &str) -> Result<()> {
    let password = Cmd::new("aws")
        .args(["ecr", "get-login-password"])
        .args(["--profile", config.profile.as_str()])
        .args(["--region", config.region.as_str()])
        .error_msg("Failed to obtain registry password")
        .run()?;

    Cmd::new("docker")
        .args(["login", "--username", "AWS", "--password-stdin", registry])
        .stdin(password.stdout_trimmed())
        .error_msg(format!("docker login to {} failed", registry))
        .run()?;

    Ok(())
}

/// Fully qualified image reference for a package.
pub fn image_uri(registry: &str, name: &str) -> String {
    format!("{}/{}:latest", registry, name)
}
