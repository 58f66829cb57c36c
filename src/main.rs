//! batchprep - AWS Batch job preparation.
//!
//! Builds a docker image from a named recipe directory, pushes it to ECR
//! and registers an AWS Batch job definition pointing at it. All registry,
//! engine and scheduler work goes through the `aws` and `docker` CLIs.
#![allow(dead_code, unused_imports)]

mod batch;
mod commands;
mod config;
mod docker;
mod preflight;
mod process;
mod recipe;
mod registry;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use batch::{DEFAULT_MEMORY_MIB, DEFAULT_VCPUS};
use config::Config;
use docker::BuildArg;

#[derive(Parser)]
#[command(name = "batchprep")]
#[command(about = "Build docker recipes and register them as AWS Batch jobs")]
#[command(
    after_help = "QUICK START:\n  batchprep preflight <name>  Check tools and recipe\n  batchprep publish <name>    Build, push and register\n  batchprep show recipes      List available recipes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a recipe, push the image to ECR and register the job definition
    Publish {
        /// Recipe name (also the repository, image and job-definition name)
        name: String,

        /// Build-time argument, KEY=VALUE (repeatable)
        #[arg(long = "build-arg", value_name = "KEY=VALUE")]
        build_args: Vec<String>,

        /// vCPUs requested by the job definition
        #[arg(long, default_value_t = DEFAULT_VCPUS)]
        vcpus: u32,

        /// Memory (MiB) requested by the job definition
        #[arg(long, default_value_t = DEFAULT_MEMORY_MIB)]
        memory: u32,

        /// Pass the active profile's access keys to the build as build args
        #[arg(long)]
        forward_credentials: bool,
    },

    /// Run preflight checks (host tools, and the recipe when given)
    Preflight {
        /// Recipe to validate
        name: Option<String>,

        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },

    /// Prune unused local docker data
    Clean,
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// List available recipe directories
    Recipes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load(&base_dir);

    match cli.command {
        Commands::Publish {
            name,
            build_args,
            vcpus,
            memory,
            forward_credentials,
        } => {
            let build_args = build_args
                .iter()
                .map(|s| BuildArg::parse(s))
                .collect::<Result<Vec<_>>>()?;

            let request = commands::publish::PublishRequest {
                name,
                build_args,
                vcpus,
                memory,
                forward_credentials,
            };
            commands::cmd_publish(&request, &config)?;
        }

        Commands::Preflight { name, strict } => {
            commands::cmd_preflight(&config, name.as_deref(), strict)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Recipes => commands::show::ShowTarget::Recipes,
            };
            commands::cmd_show(show_target, &config)?;
        }

        Commands::Clean => {
            commands::cmd_clean()?;
        }
    }

    Ok(())
}
