//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::recipe;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// List available recipes
    Recipes,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Recipes => {
            let names = recipe::list_recipes(&config.recipes_dir)?;
            if names.is_empty() {
                println!("No recipes found under {}", config.recipes_dir.display());
            } else {
                println!("Available recipes ({}):", config.recipes_dir.display());
                for name in names {
                    println!("  {}", name);
                }
            }
        }
    }
    Ok(())
}
