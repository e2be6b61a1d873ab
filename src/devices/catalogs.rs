//! Device category provider (`deviceCategories`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::graph::{response_id, GraphClient};
use crate::provider::{CreateResult, ResourceProvider, UpdateResult};

const ENDPOINT: &str = "deviceManagement/deviceCategories";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCatalogInputs {
    pub catalog_name: String,
}

pub type DeviceCatalogOutputs = DeviceCatalogInputs;

pub struct DeviceCatalogProvider {
    name: String,
}

impl DeviceCatalogProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ResourceProvider for DeviceCatalogProvider {
    type Inputs = DeviceCatalogInputs;
    type Outputs = DeviceCatalogOutputs;

    fn kind(&self) -> &'static str {
        "intune:DeviceCatalog"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        let response = client
            .post_beta(
                ENDPOINT,
                &json!({
                    "displayName": inputs.catalog_name,
                    "roleScopeTagIds": ["0"],
                }),
            )
            .await?;
        Ok(CreateResult {
            id: response_id(&response)?,
            outs: inputs,
        })
    }

    /// Categories carry nothing but a name; renames are ignored remotely.
    async fn update(
        &self,
        _client: &GraphClient,
        _id: &str,
        _olds: Self::Outputs,
        news: Self::Inputs,
    ) -> Result<UpdateResult<Self::Outputs>> {
        Ok(UpdateResult { outs: news })
    }

    /// A category already removed remotely should not fail teardown.
    async fn delete(&self, client: &GraphClient, id: &str, _props: Self::Outputs) -> Result<()> {
        if let Err(error) = client.delete_beta(&format!("{}/{}", ENDPOINT, id)).await {
            tracing::error!(%id, %error, "device category delete failed");
        }
        Ok(())
    }
}
