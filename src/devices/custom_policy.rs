//! Custom configuration profile provider (`deviceConfigurations`).

use async_trait::async_trait;

use crate::devices::types::CustomConfigPayload;
use crate::error::Result;
use crate::graph::{response_id, GraphClient};
use crate::provider::{CreateResult, ResourceProvider, UpdateResult};

const ENDPOINT: &str = "deviceManagement/deviceConfigurations";

pub type CustomPolicyInputs = CustomConfigPayload;
pub type CustomPolicyOutputs = CustomConfigPayload;

pub struct CustomPolicyProvider {
    name: String,
}

impl CustomPolicyProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ResourceProvider for CustomPolicyProvider {
    type Inputs = CustomPolicyInputs;
    type Outputs = CustomPolicyOutputs;

    fn kind(&self) -> &'static str {
        "intune:CustomPolicy"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        tracing::debug!(
            name = %self.name,
            profile = %inputs.display_name(),
            "creating custom configuration profile"
        );
        let response = client.post_beta(ENDPOINT, &inputs).await?;
        Ok(CreateResult {
            id: response_id(&response)?,
            outs: inputs,
        })
    }

    async fn update(
        &self,
        client: &GraphClient,
        id: &str,
        _olds: Self::Outputs,
        news: Self::Inputs,
    ) -> Result<UpdateResult<Self::Outputs>> {
        client
            .patch_beta(&format!("{}/{}", ENDPOINT, id), &news)
            .await?;
        Ok(UpdateResult { outs: news })
    }

    async fn delete(&self, client: &GraphClient, id: &str, _props: Self::Outputs) -> Result<()> {
        client.delete_beta(&format!("{}/{}", ENDPOINT, id)).await
    }
}
