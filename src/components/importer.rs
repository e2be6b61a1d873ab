//! Bulk import of configuration profiles from a local directory.

use crate::devices::payloads::custom_config::{create_configs_from_dir, DirectoryConfigsArgs};
use crate::error::Result;
use crate::graph::GraphClient;

use super::custom_configuration::DeviceCustomConfiguration;
use super::device_configuration::AssignmentArgs;

/// One provisioned profile, by the display name it was imported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedResource {
    pub name: String,
    pub id: String,
}

/// Walks a directory of payload files, classifies each one and provisions
/// it as a [`DeviceCustomConfiguration`]. Files with unsupported extensions
/// were already skipped during classification; every config shares the same
/// assignment targets.
pub struct DeviceCustomConfigurationImporter {
    name: String,
    args: DirectoryConfigsArgs,
    assignments: Option<AssignmentArgs>,
}

impl DeviceCustomConfigurationImporter {
    pub fn new(
        name: impl Into<String>,
        args: DirectoryConfigsArgs,
        assignments: Option<AssignmentArgs>,
    ) -> Self {
        Self {
            name: name.into(),
            args,
            assignments,
        }
    }

    pub async fn deploy(&self, client: &GraphClient) -> Result<Vec<ImportedResource>> {
        let configs = create_configs_from_dir(&self.args)?;
        tracing::info!(
            importer = %self.name,
            dir = %self.args.config_dir.display(),
            count = configs.len(),
            "importing configuration profiles"
        );

        let mut resources = Vec::with_capacity(configs.len());
        for config in configs {
            let name = config.name().to_string();
            let component =
                DeviceCustomConfiguration::new(&name, config, self.assignments.clone());
            let id = component.deploy(client).await?;
            resources.push(ImportedResource { name, id });
        }
        Ok(resources)
    }
}
