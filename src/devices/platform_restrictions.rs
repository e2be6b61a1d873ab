//! Default enrollment platform restrictions and device limit.
//!
//! Both remote objects always exist (they are the tenant's enrollment
//! defaults), so the lifecycle is patch-only: create and update both PATCH
//! the two `deviceEnrollmentConfigurations` singletons, and there is
//! nothing to delete.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::devices::types::RestrictionArgs;
use crate::error::Result;
use crate::graph::GraphClient;
use crate::provider::{CreateResult, ResourceProvider};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRestrictionsInputs {
    /// Account id of the Intune instance; the enrollment-default object ids
    /// are derived from it.
    pub intune_id: String,
    /// Per-user enrolled device limit, 1 to 10. Defaults to 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_device_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android_restriction: Option<RestrictionArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ios_restriction: Option<RestrictionArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macos_restriction: Option<RestrictionArgs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub windows_restriction: Option<RestrictionArgs>,
}

pub type PlatformRestrictionsOutputs = PlatformRestrictionsInputs;

/// Shallow-merge caller overrides onto a platform's default restriction.
fn overlay_restriction(mut base: Value, args: Option<&RestrictionArgs>) -> Result<Value> {
    if let Some(args) = args {
        let overlay = serde_json::to_value(args)?;
        if let (Value::Object(base), Value::Object(overlay)) = (&mut base, overlay) {
            for (key, value) in overlay {
                base.insert(key, value);
            }
        }
    }
    Ok(base)
}

fn blocked_platform_default() -> Value {
    json!({
        "platformBlocked": true,
        "personalDeviceEnrollmentBlocked": false,
        "osMinimumVersion": "",
        "osMaximumVersion": "",
        "blockedManufacturers": [],
    })
}

fn build_restrictions_payload(inputs: &PlatformRestrictionsInputs) -> Result<Value> {
    let android = overlay_restriction(blocked_platform_default(), inputs.android_restriction.as_ref())?;
    let ios = overlay_restriction(blocked_platform_default(), inputs.ios_restriction.as_ref())?;
    let macos = overlay_restriction(
        json!({
            "platformBlocked": true,
            "personalDeviceEnrollmentBlocked": true,
            "osMinimumVersion": null,
            "osMaximumVersion": null,
            "blockedManufacturers": [],
        }),
        inputs.macos_restriction.as_ref(),
    )?;
    let windows = overlay_restriction(
        json!({
            "platformBlocked": true,
            "personalDeviceEnrollmentBlocked": true,
            "osMinimumVersion": "10.0",
            "osMaximumVersion": "12.0",
            "blockedManufacturers": [],
        }),
        inputs.windows_restriction.as_ref(),
    )?;

    Ok(json!({
        "@odata.type": "#microsoft.graph.deviceEnrollmentPlatformRestrictionsConfiguration",
        "androidRestriction": android.clone(),
        "androidForWorkRestriction": android,
        "iosRestriction": ios,
        "macOSRestriction": macos,
        "windowsRestriction": windows.clone(),
        "windowsHomeSkuRestriction": windows,
    }))
}

pub struct PlatformRestrictionsProvider {
    name: String,
}

impl PlatformRestrictionsProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl ResourceProvider for PlatformRestrictionsProvider {
    type Inputs = PlatformRestrictionsInputs;
    type Outputs = PlatformRestrictionsOutputs;

    fn kind(&self) -> &'static str {
        "intune:DefaultPlatformRestrictions"
    }

    async fn create(
        &self,
        client: &GraphClient,
        inputs: Self::Inputs,
    ) -> Result<CreateResult<Self::Outputs>> {
        let restrictions = build_restrictions_payload(&inputs)?;
        client
            .patch_beta(
                &format!(
                    "deviceManagement/deviceEnrollmentConfigurations/{}_DefaultPlatformRestrictions",
                    inputs.intune_id
                ),
                &restrictions,
            )
            .await?;

        client
            .patch_beta(
                &format!(
                    "deviceManagement/deviceEnrollmentConfigurations/{}_DefaultLimit",
                    inputs.intune_id
                ),
                &json!({
                    "@odata.type": "#microsoft.graph.deviceEnrollmentLimitConfiguration",
                    "limit": inputs.default_device_limit.unwrap_or(5),
                }),
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
    fn test_platform_defaults_block_everything_but_overrides_win() {
        let payload = build_restrictions_payload(&PlatformRestrictionsInputs {
            intune_id: "intune-1".into(),
            macos_restriction: Some(RestrictionArgs {
                platform_blocked: Some(false),
                personal_device_enrollment_blocked: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(payload["macOSRestriction"]["platformBlocked"], false);
        assert_eq!(
            payload["macOSRestriction"]["personalDeviceEnrollmentBlocked"],
            true
        );
        // Untouched platform keeps the blocked default.
        assert_eq!(payload["iosRestriction"]["platformBlocked"], true);
        assert_eq!(payload["windowsRestriction"]["osMinimumVersion"], "10.0");
    }

    #[test]
    fn test_android_overrides_cover_work_profile_too() {
        let payload = build_restrictions_payload(&PlatformRestrictionsInputs {
            intune_id: "intune-1".into(),
            android_restriction: Some(RestrictionArgs {
                platform_blocked: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(payload["androidRestriction"]["platformBlocked"], false);
        assert_eq!(payload["androidForWorkRestriction"]["platformBlocked"], false);
    }
}
