//! Settings-catalog configuration policy bundled with its assignment.

use crate::devices::{
    AssignEndpoint, ConfigurationPolicyAssignmentInputs, ConfigurationPolicyAssignmentProvider,
    ConfigurationPolicyProvider, DeviceConfigurationPolicy,
};
use crate::error::Result;
use crate::graph::GraphClient;
use crate::provider::ResourceProvider;

use super::sanitize_name;

/// Assignment targets for a composite. The policy id is not part of this
/// struct; it only exists after the policy resource has been created, and
/// the composite fills it in at that point.
#[derive(Debug, Clone, Default)]
pub struct AssignmentArgs {
    pub include_group_ids: Vec<String>,
    pub exclude_group_ids: Vec<String>,
    pub all_users: bool,
    pub all_devices: bool,
}

impl AssignmentArgs {
    pub(crate) fn into_inputs(
        self,
        policy_id: String,
        config_type: AssignEndpoint,
    ) -> ConfigurationPolicyAssignmentInputs {
        ConfigurationPolicyAssignmentInputs {
            config_policy_id: policy_id,
            config_type,
            include_group_ids: self.include_group_ids,
            exclude_group_ids: self.exclude_group_ids,
            all_users: self.all_users,
            all_devices: self.all_devices,
        }
    }
}

/// A configuration policy plus an optional assignment. The assignment is
/// only created once the policy exists and its id is known; Graph drops a
/// policy's assignments together with the policy, so destroy only deletes
/// the policy itself.
pub struct DeviceConfiguration {
    name: String,
    policy: DeviceConfigurationPolicy,
    assignments: Option<AssignmentArgs>,
}

impl DeviceConfiguration {
    pub fn new(
        name: impl Into<String>,
        policy: DeviceConfigurationPolicy,
        assignments: Option<AssignmentArgs>,
    ) -> Self {
        Self {
            name: sanitize_name(&name.into()),
            policy,
            assignments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create the policy, then assign it. Returns the policy id.
    pub async fn deploy(&self, client: &GraphClient) -> Result<String> {
        let provider = ConfigurationPolicyProvider::new(format!("{}-policy", self.name));
        let created = provider.create(client, self.policy.clone()).await?;

        if let Some(assignments) = self.assignments.clone() {
            let assign = ConfigurationPolicyAssignmentProvider::new(format!(
                "{}-assignment",
                self.name
            ));
            assign
                .create(
                    client,
                    assignments
                        .into_inputs(created.id.clone(), AssignEndpoint::ConfigurationPolicies),
                )
                .await?;
        }

        Ok(created.id)
    }

    pub async fn destroy(&self, client: &GraphClient, id: &str) -> Result<()> {
        let provider = ConfigurationPolicyProvider::new(format!("{}-policy", self.name));
        provider.delete(client, id, self.policy.clone()).await
    }
}
