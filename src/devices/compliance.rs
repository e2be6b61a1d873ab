//! macOS compliance policy provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::devices::payloads::compliance::{
    build_compliance_patch_body, build_compliance_payload, build_scheduled_action_rules,
    MACOS_COMPLIANCE_ODATA_TYPE,
};
use crate::error::Result;
use crate::graph::{response_id, GraphClient};
use crate::provider::{CreateResult, ResourceProvider, UpdateResult};

const ENDPOINT: &str = "deviceManagement/deviceCompliancePolicies";

/// Caller-facing day counts for the noncompliance scheduled actions. The
/// remote schema wants hours inside a two-rule action list; the payload
/// builder regenerates that list from these on every build.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledActions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_device_noncompliant_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remotely_lock_noncompliant_device_days: Option<u32>,
}

/// Desired state for a macOS compliance policy. Every field is optional;
/// absence means "use the baseline default". Fields the struct does not
/// name can be supplied through `extra` and overlay the template the same
/// way.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MacCompliancePolicyInputs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_block_simple: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_minimum_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_minimum_character_set_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_required_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_minimum_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_maximum_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_integrity_protection_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_threat_protection_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_threat_protection_required_security_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_threat_protection_required_security_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gatekeeper_allowed_app_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_require_encryption: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_block_all_incoming: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_enable_stealth_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_actions: Option<ScheduledActions>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type MacCompliancePolicyOutputs = MacCompliancePolicyInputs;

pub struct MacCompliancePolicyProvider {
    name: String,
}

impl MacCompliancePolicyProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ResourceProvider for MacCompliancePolicyProvider {
    type Inputs = MacCompliancePolicyInputs;
    type Outputs = MacCompliancePolicyOutputs;

    fn kind(&self) -> &'static str {
        "intune:MacCompliancePolicy"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        let payload = build_compliance_payload(&inputs)?;
        tracing::debug!(name = %self.name, "creating macOS compliance policy");
        let response = client.post(ENDPOINT, &payload).await?;
        Ok(CreateResult {
            id: response_id(&response)?,
            outs: inputs,
        })
    }

    /// Two-step protocol: scheduled-action rules go to their own
    /// sub-resource, the rest of the body is patched with the concrete
    /// subtype's discriminator. Either step failing fails the update as a
    /// whole; no partial-success state is modeled.
    async fn update(
        &self,
        client: &GraphClient,
        id: &str,
        _olds: Self::Outputs,
        news: Self::Inputs,
    ) -> Result<UpdateResult<Self::Outputs>> {
        // Confirm the policy still exists and pick up its concrete subtype.
        let current = client.get(&format!("{}/{}", ENDPOINT, id)).await?;
        let odata_type = current
            .get("@odata.type")
            .and_then(|t| t.as_str())
            .unwrap_or(MACOS_COMPLIANCE_ODATA_TYPE)
            .to_string();

        let rules = build_scheduled_action_rules(news.scheduled_actions.as_ref());
        client
            .post(
                &format!("{}/{}/scheduleActionsForRules", ENDPOINT, id),
                &json!({ "deviceComplianceScheduledActionForRules": rules }),
            )
            .await?;

        let mut body = build_compliance_patch_body(&news)?;
        if let Value::Object(map) = &mut body {
            map.insert("@odata.type".into(), Value::String(odata_type));
        }
        client.patch(&format!("{}/{}", ENDPOINT, id), &body).await?;

        Ok(UpdateResult { outs: news })
    }

    async fn delete(&self, client: &GraphClient, id: &str, _props: Self::Outputs) -> Result<()> {
        client.delete(&format!("{}/{}", ENDPOINT, id)).await
    }
}
