//! Composite components: a policy resource plus its assignment, with the
//! ordering invariant (policy first, assignment only once an id exists)
//! encoded in the control flow, and the assignment's lifetime tied to the
//! policy's.

pub mod custom_configuration;
pub mod device_configuration;
pub mod importer;
pub mod intune_management;

pub use custom_configuration::DeviceCustomConfiguration;
pub use device_configuration::{AssignmentArgs, DeviceConfiguration};
pub use importer::{DeviceCustomConfigurationImporter, ImportedResource};
pub use intune_management::{
    ComplianceArgs, IntuneManagement, IntuneManagementArgs, IntuneManagementOutputs, MacOsArgs,
};

/// Resource names derive from component names the way the policy portal
/// expects: whitespace collapsed away, lowercased.
pub(crate) fn sanitize_name(name: &str) -> String {
    name.split_whitespace().collect::<String>().to_lowercase()
}
