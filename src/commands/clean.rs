//! Clean command - prunes unused local docker data.

use anyhow::Result;

use crate::docker;

/// Execute the clean command.
///
/// Unlike the pipeline's best-effort prunes, a standalone clean that fails
/// reports the failure.
pub fn cmd_clean() -> Result<()> {
    println!("Pruning unused docker data...");
    docker::prune()?;
    println!("Done.");
    Ok(())
}
