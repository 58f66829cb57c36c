//! Publish command - the build-and-publish pipeline.
//!
//! Runs the full sequence: ensure the ECR repository, validate the recipe,
//! resolve registry coordinates, authenticate, build with caching disabled,
//! tag and push, then register the Batch job definition. The first hard
//! failure aborts the run; the prune steps are best-effort.

use anyhow::Result;
use std::time::Instant;

use crate::batch::{self, ContainerProperties};
use crate::config::Config;
use crate::docker::{self, BuildArg};
use crate::recipe::Recipe;
use crate::registry;

/// Inputs for one publish run.
pub struct PublishRequest {
    /// Package name: repository, recipe, image and job-definition name.
    pub name: String,
    /// Build-time arguments passed to the image build.
    pub build_args: Vec<BuildArg>,
    /// vCPUs requested by the job definition.
    pub vcpus: u32,
    /// Memory (MiB) requested by the job definition.
    pub memory: u32,
    /// Resolve the active profile's access keys into build args.
    pub forward_credentials: bool,
}

/// Execute the publish command.
pub fn cmd_publish(request: &PublishRequest, config: &Config) -> Result<()> {
    let name = &request.name;
    let start = Instant::now();
    println!("=== Publishing '{}' ===\n", name);

    // 1. Ensure the ECR repository exists (idempotent).
    println!("Ensuring ECR repository...");
    registry::ensure_repository(config, name)?;

    // 2. Recipe preconditions. Also marks launch.sh executable.
    println!("\nValidating recipe...");
    let recipe = Recipe::locate(&config.recipes_dir, name)?;
    println!("  {}", recipe.dir.display());

    // 3. Registry coordinates, and credentials when requested.
    println!("\nResolving registry...");
    let registry_host = registry::registry_host(config)?;
    println!("  {}", registry_host);

    let mut build_args = request.build_args.clone();
    if request.forward_credentials {
        println!("  Forwarding profile '{}' credentials to the build", config.profile);
        build_args.extend(registry::profile_credentials(config)?);
    }

    // 4. Reclaim space before building.
    println!("\nPruning unused docker data...");
    docker::prune_best_effort();

    // 5. Authenticate the engine.
    println!("\nAuthenticating against {}...", registry_host);
    registry::login(config, &registry_host)?;

    // 6. Build with caching disabled, from inside the recipe directory.
    println!("\nBuilding image '{}'...", name);
    docker::build(&recipe.dir, name, &build_args)?;

    // 7. Show what was produced.
    println!();
    docker::list_images(name);

    // 8. Tag and push. A failed push aborts before registration.
    let uri = registry::image_uri(&registry_host, name);
    println!("\nPushing {}...", uri);
    docker::tag(name, &uri)?;
    docker::push(&uri)?;

    // 9. Reclaim space again.
    println!("\nPruning unused docker data...");
    docker::prune_best_effort();

    // 10. Registration comes last: a failed run must never leave a job
    // definition referencing an unpushed image.
    println!("\nRegistering job definition '{}'...", name);
    let properties = ContainerProperties {
        image: uri.clone(),
        vcpus: request.vcpus,
        memory: request.memory,
    };
    batch::register_job_definition(config, name, &properties)?;

    println!(
        "\n=== Publish complete ({:.1}s) ===",
        start.elapsed().as_secs_f64()
    );
    println!("  Image: {}", uri);
    println!(
        "  Job definition: {} ({} vCPU, {} MiB)",
        name, request.vcpus, request.memory
    );
    Ok(())
}
