//! Assignment of a compliance policy to groups, all users or all devices.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{IntuneError, Result};
use crate::graph::GraphClient;
use crate::provider::{CreateResult, ResourceProvider};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompliancePolicyAssignmentInputs {
    pub compliance_policy_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub all_users: bool,
    #[serde(default)]
    pub all_devices: bool,
}

pub type CompliancePolicyAssignmentOutputs = CompliancePolicyAssignmentInputs;

/// Assign-call payload. An explicit group id takes precedence over the
/// all-users/all-devices flags.
fn build_assignment_payload(inputs: &CompliancePolicyAssignmentInputs) -> Value {
    let mut assignments: Vec<Value> = Vec::new();

    if let Some(group_id) = &inputs.group_id {
        assignments.push(json!({
            "target": {
                "@odata.type": "#microsoft.graph.groupAssignmentTarget",
                "groupId": group_id,
            }
        }));
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

    json!({ "assignments": assignments })
}

pub struct CompliancePolicyAssignmentProvider {
    name: String,
}

impl CompliancePolicyAssignmentProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ResourceProvider for CompliancePolicyAssignmentProvider {
    type Inputs = CompliancePolicyAssignmentInputs;
    type Outputs = CompliancePolicyAssignmentOutputs;

    fn kind(&self) -> &'static str {
        "intune:CompliancePolicyAssignment"
    }

    /// The assign call replaces the whole assignment set, so update is the
    /// inherited re-create. The resource has no remote identity of its own;
    /// the provider name serves as a synthetic id.
    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        if inputs.compliance_policy_id.is_empty() {
            return Err(IntuneError::InvalidInput(
                "compliance policy assignment requires a non-empty policy id".into(),
            ));
        }

        let payload = build_assignment_payload(&inputs);
        client
            .post_beta(
                &format!(
                    "deviceManagement/deviceCompliancePolicies/{}/assign",
                    inputs.compliance_policy_id
                ),
                &payload,
            )
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
    fn test_group_id_takes_precedence_over_flags() {
        let payload = build_assignment_payload(&CompliancePolicyAssignmentInputs {
            compliance_policy_id: "p1".into(),
            group_id: Some("g1".into()),
            all_users: true,
            all_devices: true,
        });
        let assignments = payload["assignments"].as_array().unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0]["target"]["groupId"], "g1");
    }

    #[test]
    fn test_all_users_and_all_devices_stack() {
        let payload = build_assignment_payload(&CompliancePolicyAssignmentInputs {
            compliance_policy_id: "p1".into(),
            group_id: None,
            all_users: true,
            all_devices: true,
        });
        let assignments = payload["assignments"].as_array().unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(
            assignments[0]["target"]["@odata.type"],
            "#microsoft.graph.allLicensedUsersAssignmentTarget"
        );
        assert_eq!(
            assignments[1]["target"]["@odata.type"],
            "#microsoft.graph.allDevicesAssignmentTarget"
        );
    }

    #[tokio::test]
    async fn test_empty_policy_id_is_rejected() {
        let provider = CompliancePolicyAssignmentProvider::new("test-assignment");
        let client = GraphClient::with_base_url("token".into(), "http://localhost:1");
        let err = provider
            .create(&client, CompliancePolicyAssignmentInputs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, IntuneError::InvalidInput(_)));
    }
}
