//! Resource providers, one per device-management policy kind.

pub mod catalogs;
pub mod compliance;
pub mod compliance_assignment;
pub mod configuration_assignment;
pub mod configuration_policy;
pub mod custom_policy;
pub mod device_identifiers;
pub mod payloads;
pub mod platform_restrictions;
pub mod types;

pub use catalogs::{DeviceCatalogInputs, DeviceCatalogProvider};
pub use compliance::{
    MacCompliancePolicyInputs, MacCompliancePolicyOutputs, MacCompliancePolicyProvider,
    ScheduledActions,
};
pub use compliance_assignment::{
    CompliancePolicyAssignmentInputs, CompliancePolicyAssignmentProvider,
};
pub use configuration_assignment::{
    AssignEndpoint, ConfigurationPolicyAssignmentInputs, ConfigurationPolicyAssignmentProvider,
};
pub use configuration_policy::{ConfigurationPolicyInputs, ConfigurationPolicyProvider};
pub use custom_policy::{CustomPolicyInputs, CustomPolicyProvider};
pub use device_identifiers::{
    CorporateDeviceIdentifiersInputs, CorporateDeviceIdentifiersProvider,
};
pub use platform_restrictions::{PlatformRestrictionsInputs, PlatformRestrictionsProvider};
pub use types::{
    ConfigurationArgs, CorporateDeviceIdentifier, CustomConfigPayload, CustomConfiguration,
    DeviceConfigurationPolicy, DeviceIdentityType, DevicePlatform, RestrictionArgs,
    TrustedRootCertificate,
};
