//! Custom configuration profile bundled with its assignment.
//!
//! Dispatches on how the payload file classified: certificates and opaque
//! profiles go through the `deviceConfigurations` provider, exported
//! settings-catalog JSON goes through the `configurationPolicies` one. The
//! assign call has to follow the same split since the two endpoints key
//! their assign paths differently.

use crate::devices::payloads::custom_config::{create_custom_config, CustomConfigArgs, ImportedConfig};
use crate::devices::{
    AssignEndpoint, ConfigurationPolicyAssignmentProvider, ConfigurationPolicyProvider,
    CustomPolicyProvider,
};
use crate::error::Result;
use crate::graph::GraphClient;
use crate::provider::ResourceProvider;

use super::device_configuration::AssignmentArgs;
use super::sanitize_name;

pub struct DeviceCustomConfiguration {
    name: String,
    config: ImportedConfig,
    assignments: Option<AssignmentArgs>,
}

impl DeviceCustomConfiguration {
    pub fn new(
        name: impl Into<String>,
        config: ImportedConfig,
        assignments: Option<AssignmentArgs>,
    ) -> Self {
        Self {
            name: sanitize_name(&name.into()),
            config,
            assignments,
        }
    }

    /// Classify a local payload file and wrap it as a component.
    pub fn from_file(
        name: impl Into<String>,
        args: &CustomConfigArgs,
        assignments: Option<AssignmentArgs>,
    ) -> Result<Self> {
        Ok(Self::new(name, create_custom_config(args)?, assignments))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn assign_endpoint(&self) -> AssignEndpoint {
        match self.config {
            ImportedConfig::Custom { .. } => AssignEndpoint::DeviceConfigurations,
            ImportedConfig::DeviceConfiguration { .. } => AssignEndpoint::ConfigurationPolicies,
        }
    }

    /// Create the profile, then assign it. Returns the remote id.
    pub async fn deploy(&self, client: &GraphClient) -> Result<String> {
        let id = match &self.config {
            ImportedConfig::Custom { payload, .. } => {
                let provider = CustomPolicyProvider::new(format!("{}-policy", self.name));
                provider.create(client, payload.clone()).await?.id
            }
            ImportedConfig::DeviceConfiguration { policy, .. } => {
                let provider = ConfigurationPolicyProvider::new(format!("{}-policy", self.name));
                provider.create(client, policy.clone()).await?.id
            }
        };

        if let Some(assignments) = self.assignments.clone() {
            let assign = ConfigurationPolicyAssignmentProvider::new(format!(
                "{}-assignment",
                self.name
            ));
            assign
                .create(client, assignments.into_inputs(id.clone(), self.assign_endpoint()))
                .await?;
        }

        Ok(id)
    }

    pub async fn destroy(&self, client: &GraphClient, id: &str) -> Result<()> {
        match &self.config {
            ImportedConfig::Custom { payload, .. } => {
                let provider = CustomPolicyProvider::new(format!("{}-policy", self.name));
                provider.delete(client, id, payload.clone()).await
            }
            ImportedConfig::DeviceConfiguration { policy, .. } => {
                let provider = ConfigurationPolicyProvider::new(format!("{}-policy", self.name));
                provider.delete(client, id, policy.clone()).await
            }
        }
    }
}
