//! Shared payload types for the device-management providers.
//!
//! Typed at the top level where the shapes are stable; the deeply nested
//! settings-catalog bodies stay as `serde_json::Value` since they are
//! Graph-schema literals the builders assemble wholesale.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// All-zero notification template id Graph expects on scheduled actions
/// that carry no custom notification.
pub const EMPTY_NOTIFICATION_TEMPLATE_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Placeholder id Graph requires on custom-configuration creation bodies.
pub const PLACEHOLDER_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Common caller-facing naming arguments for configuration payload builders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigurationArgs {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Settings-catalog configuration policy body
/// (`deviceManagement/configurationPolicies`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceConfigurationPolicy {
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub platforms: String,
    #[serde(default)]
    pub technologies: String,
    #[serde(default)]
    pub role_scope_tag_ids: Vec<String>,
    #[serde(default)]
    pub settings: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_reference: Option<Value>,
}

/// Trusted root certificate profile
/// (`#microsoft.graph.macOSTrustedRootCertificate`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrustedRootCertificate {
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub deployment_channel: String,
    pub role_scope_tag_ids: Vec<String>,
    pub cert_file_name: String,
    pub trusted_root_certificate: String,
}

/// Opaque custom configuration profile
/// (`#microsoft.graph.macOSCustomConfiguration`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomConfiguration {
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    pub id: String,
    pub role_scope_tag_ids: Vec<String>,
    pub description: String,
    pub display_name: String,
    pub deployment_channel: String,
    pub payload_name: String,
    pub payload_file_name: String,
    pub payload: String,
}

/// Payload accepted by the custom-policy provider. The variant decides the
/// concrete `@odata.type` the remote schema disambiguates on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CustomConfigPayload {
    TrustedRootCertificate(TrustedRootCertificate),
    CustomConfiguration(CustomConfiguration),
}

impl CustomConfigPayload {
    pub fn display_name(&self) -> &str {
        match self {
            CustomConfigPayload::TrustedRootCertificate(c) => &c.display_name,
            CustomConfigPayload::CustomConfiguration(c) => &c.display_name,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DeviceIdentityType {
    SerialNumber,
    Imei,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DevicePlatform {
    Unknown,
    Ios,
    Android,
    Windows,
    WindowsMobile,
    MacOS,
}

/// One corporate device identity to pre-register with Intune.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorporateDeviceIdentifier {
    pub imported_device_identity_type: DeviceIdentityType,
    pub imported_device_identifier: String,
    pub platform: DevicePlatform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Caller overrides for one platform's enrollment restriction. Fields left
/// `None` keep the kind-specific default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestrictionArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_device_enrollment_blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_minimum_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_maximum_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_manufacturers: Option<Vec<String>>,
}
