//! AWS Batch job definition registration.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::process::Cmd;

/// Default vCPUs requested by a job definition.
pub const DEFAULT_VCPUS: u32 = 1;

/// Default memory (MiB) requested by a job definition.
pub const DEFAULT_MEMORY_MIB: u32 = 128;

/// Container section of a Batch job definition.
///
/// Serialized to the JSON payload `aws batch register-job-definition`
/// expects for `--container-properties`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerProperties {
    /// Fully qualified image reference, e.g. `<registry>/<name>:latest`.
    pub image: String,
    /// vCPUs requested.
    pub vcpus: u32,
    /// Memory (MiB) requested.
    pub memory: u32,
}

/// Register a job definition named `name` running `properties.image`.
pub fn register_job_definition(
    config: &Config,
    name: &str,
    properties: &ContainerProperties,
) -> Result<()> {
    let payload = serde_json::to_string(properties)?;

    Cmd::new("aws")
        .args(["batch", "register-job-definition"])
        .args(["--job-definition-name", name])
        .args(["--type", "container"])
        .arg("--container-properties")
        .arg(&payload)
        .args(["--profile", config.profile.as_str()])
        .args(["--region", config.region.as_str()])
        .error_msg(format!("Failed to register job definition '{}'", name))
        .run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_properties_default_sizing() {
        let props = ContainerProperties {
            image: "123456789012.dkr.ecr.eu-west-2.amazonaws.com/meetup:latest".to_string(),
            vcpus: DEFAULT_VCPUS,
            memory: DEFAULT_MEMORY_MIB,
        };

        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("\"vcpus\":1"));
        assert!(json.contains("\"memory\":128"));
        assert!(json.contains("meetup:latest"));
    }

    #[test]
    fn container_properties_round_trip() {
        let props = ContainerProperties {
            image: "123456789012.dkr.ecr.eu-west-2.amazonaws.com/country_groups:latest"
                .to_string(),
            vcpus: 4,
            memory: 2048,
        };

        let json = serde_json::to_string(&props).unwrap();
        let loaded: ContainerProperties = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.image, props.image);
        assert_eq!(loaded.vcpus, 4);
        assert_eq!(loaded.memory, 2048);
    }

    #[test]
    fn container_properties_field_names_are_camel_case() {
        // The Batch API rejects unknown keys; the payload must use the
        // exact field names the CLI documents.
        let props = ContainerProperties {
            image: "img".to_string(),
            vcpus: 1,
            memory: 128,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&props).unwrap()).unwrap();
        assert!(value.get("image").is_some());
        assert!(value.get("vcpus").is_some());
        assert!(value.get("memory").is_some());
    }
}
