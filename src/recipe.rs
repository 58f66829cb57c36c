//! Recipe directory location and validation.
//!
//! A recipe is a directory under the recipes root holding everything needed
//! to build one batchable image: a `Dockerfile` and the `launch.sh` script
//! the container runs as its entrypoint.

use anyhow::{bail, Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Container build descriptor expected in every recipe.
pub const DESCRIPTOR: &str = "Dockerfile";

/// Launch script expected in every recipe.
pub const LAUNCH_SCRIPT: &str = "launch.sh";

/// A located, validated recipe directory.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub name: String,
    pub dir: PathBuf,
}

impl Recipe {
    /// Locate and validate the recipe for `name` under `recipes_root`.
    ///
    /// Each missing piece fails with the path that was expected. The launch
    /// script is marked executable so the image can run it directly.
    pub fn locate(recipes_root: &Path, name: &str) -> Result<Self> {
        let dir = recipes_root.join(name);
        if !dir.is_dir() {
            bail!("Recipe directory not found: {}", dir.display());
        }

        let descriptor = dir.join(DESCRIPTOR);
        if !descriptor.is_file() {
            bail!(
                "Recipe '{}' has no {}: {}",
                name,
                DESCRIPTOR,
                descriptor.display()
            );
        }

        let launch = dir.join(LAUNCH_SCRIPT);
        if !launch.is_file() {
            bail!(
                "Recipe '{}' has no {}: {}",
                name,
                LAUNCH_SCRIPT,
                launch.display()
            );
        }
        make_executable(&launch)?;

        Ok(Self {
            name: name.to_string(),
            dir,
        })
    }

    /// Path to the recipe's build descriptor.
    pub fn descriptor(&self) -> PathBuf {
        self.dir.join(DESCRIPTOR)
    }

    /// Path to the recipe's launch script.
    pub fn launch_script(&self) -> PathBuf {
        self.dir.join(LAUNCH_SCRIPT)
    }
}

/// List recipe directory names under the recipes root, sorted.
///
/// A missing root yields an empty list rather than an error; `show recipes`
/// reports that separately.
pub fn list_recipes(recipes_root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    if !recipes_root.is_dir() {
        return Ok(names);
    }

    for entry in walkdir::WalkDir::new(recipes_root)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}

/// Mark a file executable (755).
fn make_executable(path: &Path) -> Result<()> {
    let mut perms = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata: {}", path.display()))?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
        .with_context(|| format!("Failed to set permissions: {}", path.display()))?;
    Ok(())
}
