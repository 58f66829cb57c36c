//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `publish` - Run the build-and-publish pipeline
//! - `preflight` - Run preflight checks
//! - `show` - Display information
//! - `clean` - Prune unused local docker data

mod clean;
mod preflight;
pub mod publish;
pub mod show;

pub use clean::cmd_clean;
pub use preflight::cmd_preflight;
pub use publish::cmd_publish;
pub use show::cmd_show;
