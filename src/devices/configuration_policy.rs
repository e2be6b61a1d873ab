//! Settings-catalog configuration policy provider.

use async_trait::async_trait;

use crate::devices::types::DeviceConfigurationPolicy;
use crate::error::Result;
use crate::graph::{response_id, GraphClient};
use crate::provider::{CreateResult, ResourceProvider, UpdateResult};

pub type ConfigurationPolicyInputs = DeviceConfigurationPolicy;
pub type ConfigurationPolicyOutputs = DeviceConfigurationPolicy;

pub struct ConfigurationPolicyProvider {
    name: String,
}

impl ConfigurationPolicyProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ResourceProvider for ConfigurationPolicyProvider {
    type Inputs = ConfigurationPolicyInputs;
    type Outputs = ConfigurationPolicyOutputs;

    fn kind(&self) -> &'static str {
        "intune:ConfigurationPolicy"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        tracing::debug!(name = %self.name, policy = %inputs.name, "creating configuration policy");
        let response = client
            .post_beta("deviceManagement/configurationPolicies", &inputs)
            .await?;
        Ok(CreateResult {
            id: response_id(&response)?,
            outs: inputs,
        })
    }

    /// Settings-catalog policies are replaced wholesale on update.
    async fn update(
        &self,
        client: &GraphClient,
        id: &str,
        _olds: Self::Outputs,
        news: Self::Inputs,
    ) -> Result<UpdateResult<Self::Outputs>> {
        client
            .put_beta(
                &format!("deviceManagement/configurationPolicies('{}')", id),
                &news,
            )
            .await?;
        Ok(UpdateResult { outs: news })
    }

    async fn delete(&self, client: &GraphClient, id: &str, _props: Self::Outputs) -> Result<()> {
        client
            .delete_beta(&format!("deviceManagement/configurationPolicies('{}')", id))
            .await
    }
}
