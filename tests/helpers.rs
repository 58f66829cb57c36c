//! Shared test utilities for batchprep tests.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with a temporary recipes root.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Base directory (project root simulation)
    pub base_dir: PathBuf,
    /// Recipes root
    pub recipes_dir: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with a temporary recipes root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let recipes_dir = base_dir.join("docker_recipes");

        fs::create_dir_all(&recipes_dir).expect("Failed to create recipes dir");

        Self {
            _temp_dir: temp_dir,
            base_dir,
            recipes_dir,
        }
    }

    /// Create a complete recipe (Dockerfile + launch.sh).
    pub fn create_recipe(&self, name: &str) -> PathBuf {
        let dir = self.recipes_dir.join(name);
        fs::create_dir_all(&dir).expect("Failed to create recipe dir");

        fs::write(
            dir.join("Dockerfile"),
            "FROM python:3.7-slim\nCOPY launch.sh /usr/local/bin/launch.sh\nCMD [\"/usr/local/bin/launch.sh\"]\n",
        )
        .expect("Failed to write Dockerfile");

        fs::write(dir.join("launch.sh"), "#!/bin/bash\npython run.py\n")
            .expect("Failed to write launch.sh");

        dir
    }

    /// Config pointing at this environment's recipes root.
    pub fn config(&self) -> batchprep::config::Config {
        batchprep::config::Config {
            profile: "default".to_string(),
            region: "eu-west-2".to_string(),
            registry: None,
            recipes_dir: self.recipes_dir.clone(),
        }
    }
}
