//! Corporate device identifier import.
//!
//! Deliberately not fail-fast: a failed identifier batch import is logged
//! and swallowed so one bad batch does not abort a whole orchestration run.
//! Delete is disabled as well; Graph only exposes identifier removal
//! through a `$batch` call against individual identity ids, which is not
//! wired up.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::devices::types::CorporateDeviceIdentifier;
use crate::error::Result;
use crate::graph::GraphClient;
use crate::provider::{CreateResult, ResourceProvider};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorporateDeviceIdentifiersInputs {
    pub identifiers: Vec<CorporateDeviceIdentifier>,
}

pub type CorporateDeviceIdentifiersOutputs = CorporateDeviceIdentifiersInputs;

pub struct CorporateDeviceIdentifiersProvider {
    name: String,
}

impl CorporateDeviceIdentifiersProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ResourceProvider for CorporateDeviceIdentifiersProvider {
    type Inputs = CorporateDeviceIdentifiersInputs;
    type Outputs = CorporateDeviceIdentifiersOutputs;

    fn kind(&self) -> &'static str {
        "intune:CorporateDeviceIdentifiers"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        let payload = json!({
            "overwriteImportedDeviceIdentities": true,
            "importedDeviceIdentities": inputs.identifiers,
        });

        if let Err(error) = client
            .post_beta(
                "deviceManagement/importedDeviceIdentities/importDeviceIdentityList",
                &payload,
            )
            .await
        {
            tracing::error!(name = %self.name, %error, "device identifier import failed");
        }

        Ok(CreateResult {
            id: self.name.clone(),
            outs: inputs,
        })
    }

    // Inherited delete is the intended no-op: imported identities are left
    // in place when the resource goes away.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::types::{DeviceIdentityType, DevicePlatform};

    #[tokio::test]
    async fn test_import_failure_is_swallowed() {
        // Nothing is listening on this port, so the POST fails; create must
        // still report success with the synthetic id.
        let provider = CorporateDeviceIdentifiersProvider::new("corp-devices");
        let client = GraphClient::with_base_url("token".into(), "http://127.0.0.1:1");
        let result = provider
            .create(
                &client,
                CorporateDeviceIdentifiersInputs {
                    identifiers: vec![CorporateDeviceIdentifier {
                        imported_device_identity_type: DeviceIdentityType::SerialNumber,
                        imported_device_identifier: "C02ABC123".into(),
                        platform: DevicePlatform::MacOS,
                        description: None,
                    }],
                },
            )
            .await
            .expect("import failure must not propagate");
        assert_eq!(result.id, "corp-devices");
    }

    #[tokio::test]
    async fn test_delete_is_a_noop() {
        let provider = CorporateDeviceIdentifiersProvider::new("corp-devices");
        let client = GraphClient::with_base_url("token".into(), "http://127.0.0.1:1");
        provider
            .delete(
                &client,
                "corp-devices",
                CorporateDeviceIdentifiersInputs::default(),
            )
            .await
            .expect("delete never calls out");
    }
}
