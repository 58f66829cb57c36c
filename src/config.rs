//! Configuration management for batchprep.
//!
//! Reads configuration from environment variables (optionally seeded from a
//! .env file, loaded in main). Everything has a default; nothing is required.

use std::path::{Path, PathBuf};

/// Default AWS region.
pub const DEFAULT_REGION: &str = "eu-west-2";

/// Default credential/configuration profile.
pub const DEFAULT_PROFILE: &str = "default";

/// Directory under the base dir holding one recipe per package.
pub const DEFAULT_RECIPES_DIR: &str = "docker_recipes";

/// batchprep configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Profile passed to every aws CLI call (default: "default")
    pub profile: String,
    /// AWS region (default: eu-west-2)
    pub region: String,
    /// Explicit registry host; derived from the account id when unset
    pub registry: Option<String>,
    /// Root directory holding recipe directories
    pub recipes_dir: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Recognised variables: `AWS_PROFILE`, `AWS_REGION`, `ECR_REGISTRY`,
    /// `RECIPES_DIR`. A relative `RECIPES_DIR` is resolved against
    /// `base_dir`. Empty values are treated as unset.
    pub fn load(base_dir: &Path) -> Self {
        let get = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        let profile = get("AWS_PROFILE").unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        let region = get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let registry = get("ECR_REGISTRY");

        let recipes_dir = get("RECIPES_DIR")
            .map(|s| {
                let path = PathBuf::from(s);
                if path.is_absolute() {
                    path
                } else {
                    base_dir.join(path)
                }
            })
            .unwrap_or_else(|| base_dir.join(DEFAULT_RECIPES_DIR));

        Self {
            profile,
            region,
            registry,
            recipes_dir,
        }
    }

    /// Print configuration for `show config`.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  AWS_PROFILE: {}", self.profile);
        println!("  AWS_REGION: {}", self.region);
        match &self.registry {
            Some(registry) => println!("  ECR_REGISTRY: {}", registry),
            None => println!("  ECR_REGISTRY: (derived from account id)"),
        }
        println!("  RECIPES_DIR: {}", self.recipes_dir.display());
        if self.recipes_dir.is_dir() {
            println!("  Recipes root: FOUND");
        } else {
            println!("  Recipes root: NOT FOUND (create it or set RECIPES_DIR)");
        }
    }
}
