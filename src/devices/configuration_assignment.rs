//! Assignment of a configuration policy (settings-catalog or classic device
//! configuration) to groups, all users or all devices.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{IntuneError, Result};
use crate::graph::GraphClient;
use crate::provider::{CreateResult, ResourceProvider};

/// Which assign endpoint the policy lives behind. Settings-catalog policies
/// use the OData-keyed `configurationPolicies('{id}')/assign` path; custom
/// profiles created under `deviceConfigurations` use the plain one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AssignEndpoint {
    #[default]
    ConfigurationPolicies,
    DeviceConfigurations,
}

impl AssignEndpoint {
    fn path(&self, policy_id: &str) -> String {
        match self {
            AssignEndpoint::ConfigurationPolicies => {
                format!("deviceManagement/configurationPolicies('{}')/assign", policy_id)
            }
            AssignEndpoint::DeviceConfigurations => {
                format!("deviceManagement/deviceConfigurations/{}/assign", policy_id)
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationPolicyAssignmentInputs {
    pub config_policy_id: String,
    #[serde(default)]
    pub config_type: AssignEndpoint,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_group_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_group_ids: Vec<String>,
    #[serde(default)]
    pub all_users: bool,
    #[serde(default)]
    pub all_devices: bool,
}

pub type ConfigurationPolicyAssignmentOutputs = ConfigurationPolicyAssignmentInputs;

/// Explicit include groups take precedence over the all-users/all-devices
/// flags; exclusion groups are always appended.
fn build_assignment_payload(inputs: &ConfigurationPolicyAssignmentInputs) -> Value {
    let mut assignments: Vec<Value> = Vec::new();

    if !inputs.include_group_ids.is_empty() {
        for group_id in &inputs.include_group_ids {
            assignments.push(json!({
                "source": "direct",
                "target": {
                    "groupId": group_id,
                    "@odata.type": "#microsoft.graph.groupAssignmentTarget",
                    "deviceAndAppManagementAssignmentFilterType": "none",
                }
            }));
        }
    } else {
        if inputs.all_users {
            assignments.push(json!({
                "target": {
                    "@odata.type": "#microsoft.graph.allLicensedUsersAssignmentTarget"
                }
            }));
        }
        if inputs.all_devices {
            assignments.push(json!({
                "target": {
                    "@odata.type": "#microsoft.graph.allDevicesAssignmentTarget"
                }
            }));
        }
    }

    for group_id in &inputs.exclude_group_ids {
        assignments.push(json!({
            "source": "direct",
            "target": {
                "groupId": group_id,
                "@odata.type": "#microsoft.graph.exclusionGroupAssignmentTarget",
                "deviceAndAppManagementAssignmentFilterType": "none",
            }
        }));
    }

    json!({ "assignments": assignments })
}

pub struct ConfigurationPolicyAssignmentProvider {
    name: String,
}

impl ConfigurationPolicyAssignmentProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ResourceProvider for ConfigurationPolicyAssignmentProvider {
    type Inputs = ConfigurationPolicyAssignmentInputs;
    type Outputs = ConfigurationPolicyAssignmentOutputs;

    fn kind(&self) -> &'static str {
        "intune:ConfigurationPolicyAssignment"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        if inputs.config_policy_id.is_empty() {
            return Err(IntuneError::InvalidInput(
                "configuration policy assignment requires a non-empty policy id".into(),
            ));
        }

        let payload = build_assignment_payload(&inputs);
        client
            .post_beta(&inputs.config_type.path(&inputs.config_policy_id), &payload)
            .await?;

        Ok(CreateResult {
            id: self.name.clone(),
            outs: inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_groups_win_over_flags() {
        let payload = build_assignment_payload(&ConfigurationPolicyAssignmentInputs {
            config_policy_id: "p1".into(),
            include_group_ids: vec!["g1".into(), "g2".into()],
            all_users: true,
            all_devices: true,
            ..Default::default()
        });
        let assignments = payload["assignments"].as_array().unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0]["target"]["groupId"], "g1");
        assert_eq!(
            assignments[1]["target"]["@odata.type"],
            "#microsoft.graph.groupAssignmentTarget"
        );
    }

    #[test]
    fn test_exclusions_are_always_appended() {
        let payload = build_assignment_payload(&ConfigurationPolicyAssignmentInputs {
            config_policy_id: "p1".into(),
            all_devices: true,
            exclude_group_ids: vec!["g9".into()],
            ..Default::default()
        });
        let assignments = payload["assignments"].as_array().unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(
            assignments[1]["target"]["@odata.type"],
            "#microsoft.graph.exclusionGroupAssignmentTarget"
        );
        assert_eq!(assignments[1]["target"]["groupId"], "g9");
    }

    #[test]
    fn test_assign_endpoint_paths() {
        assert_eq!(
            AssignEndpoint::ConfigurationPolicies.path("abc"),
            "deviceManagement/configurationPolicies('abc')/assign"
        );
        assert_eq!(
            AssignEndpoint::DeviceConfigurations.path("abc"),
            "deviceManagement/deviceConfigurations/abc/assign"
        );
    }

    #[tokio::test]
    async fn test_empty_policy_id_is_rejected() {
        let provider = ConfigurationPolicyAssignmentProvider::new("test-assignment");
        let client = GraphClient::with_base_url("token".into(), "http://localhost:1");
        let err = provider
            .create(&client, ConfigurationPolicyAssignmentInputs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IntuneError::InvalidInput(_)));
    }
}
