//! Top-level orchestration: one component deploying a tenant's whole
//! device-management baseline.
//!
//! Ordering matters only within each policy/assignment pair; the policy
//! families themselves are independent and are deployed sequentially in a
//! fixed order so runs are reproducible.

use crate::devices::payloads::custom_config::DirectoryConfigsArgs;
use crate::devices::payloads::{
    create_antivirus_payload, create_disk_encryption_payload, create_firewall_payload,
    DiskEncryptionArgs, FirewallArgs,
};
use crate::devices::{
    CompliancePolicyAssignmentInputs, CompliancePolicyAssignmentProvider, ConfigurationArgs,
    CorporateDeviceIdentifier, CorporateDeviceIdentifiersInputs,
    CorporateDeviceIdentifiersProvider, MacCompliancePolicyInputs, MacCompliancePolicyProvider,
    PlatformRestrictionsInputs, PlatformRestrictionsProvider, RestrictionArgs,
};
use crate::error::Result;
use crate::graph::GraphClient;
use crate::provider::ResourceProvider;

use super::device_configuration::{AssignmentArgs, DeviceConfiguration};
use super::importer::{DeviceCustomConfigurationImporter, ImportedResource};
use super::sanitize_name;

/// Compliance policy plus its assignment targets.
#[derive(Debug, Clone, Default)]
pub struct ComplianceArgs {
    pub policy: MacCompliancePolicyInputs,
    pub group_id: Option<String>,
    pub all_users: bool,
    pub all_devices: bool,
}

/// macOS policy families to deploy. Every member is optional; only the
/// families present are provisioned.
#[derive(Debug, Clone, Default)]
pub struct MacOsArgs {
    pub compliance_policy: Option<ComplianceArgs>,
    pub antivirus_policy: Option<(ConfigurationArgs, Option<AssignmentArgs>)>,
    pub disk_encryption_policy: Option<(DiskEncryptionArgs, Option<AssignmentArgs>)>,
    pub firewall_policy: Option<(FirewallArgs, Option<AssignmentArgs>)>,
    pub custom_configurations: Option<(DirectoryConfigsArgs, Option<AssignmentArgs>)>,
}

#[derive(Debug, Clone, Default)]
pub struct IntuneManagementArgs {
    /// Account id of the Intune instance; platform restrictions are only
    /// patched when it is known, since the enrollment-default object ids
    /// derive from it.
    pub intune_id: Option<String>,
    pub default_device_limit: Option<u32>,
    pub android_restriction: Option<RestrictionArgs>,
    pub ios_restriction: Option<RestrictionArgs>,
    pub macos_restriction: Option<RestrictionArgs>,
    pub windows_restriction: Option<RestrictionArgs>,
    pub corporate_device_identifiers: Vec<CorporateDeviceIdentifier>,
    pub mac_os: Option<MacOsArgs>,
}

/// Remote ids of everything a deploy created.
#[derive(Debug, Clone, Default)]
pub struct IntuneManagementOutputs {
    pub compliance_policy_id: Option<String>,
    pub antivirus_policy_id: Option<String>,
    pub disk_encryption_policy_id: Option<String>,
    pub firewall_policy_id: Option<String>,
    pub imported_configs: Vec<ImportedResource>,
}

pub struct IntuneManagement {
    name: String,
    args: IntuneManagementArgs,
}

impl IntuneManagement {
    pub fn new(name: impl Into<String>, args: IntuneManagementArgs) -> Self {
        Self {
            name: sanitize_name(&name.into()),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn deploy(&self, client: &GraphClient) -> Result<IntuneManagementOutputs> {
        let mut outputs = IntuneManagementOutputs::default();

        if !self.args.corporate_device_identifiers.is_empty() {
            let provider =
                CorporateDeviceIdentifiersProvider::new(format!("{}-identifiers", self.name));
            provider
                .create(
                    client,
                    CorporateDeviceIdentifiersInputs {
                        identifiers: self.args.corporate_device_identifiers.clone(),
                    },
                )
                .await?;
        }

        if let Some(intune_id) = &self.args.intune_id {
            let provider =
                PlatformRestrictionsProvider::new(format!("{}-restrictions", self.name));
            provider
                .create(
                    client,
                    PlatformRestrictionsInputs {
                        intune_id: intune_id.clone(),
                        default_device_limit: self.args.default_device_limit,
                        android_restriction: self.args.android_restriction.clone(),
                        ios_restriction: self.args.ios_restriction.clone(),
                        macos_restriction: self.args.macos_restriction.clone(),
                        windows_restriction: self.args.windows_restriction.clone(),
                    },
                )
                .await?;
        }

        if let Some(mac_os) = &self.args.mac_os {
            self.deploy_mac_os(client, mac_os, &mut outputs).await?;
        }

        Ok(outputs)
    }

    async fn deploy_mac_os(
        &self,
        client: &GraphClient,
        mac_os: &MacOsArgs,
        outputs: &mut IntuneManagementOutputs,
    ) -> Result<()> {
        if let Some(compliance) = &mac_os.compliance_policy {
            let provider = MacCompliancePolicyProvider::new(format!("{}-compliance", self.name));
            let created = provider.create(client, compliance.policy.clone()).await?;

            let assign =
                CompliancePolicyAssignmentProvider::new(format!("{}-compliance-assignment", self.name));
            assign
                .create(
                    client,
                    CompliancePolicyAssignmentInputs {
                        compliance_policy_id: created.id.clone(),
                        group_id: compliance.group_id.clone(),
                        all_users: compliance.all_users,
                        all_devices: compliance.all_devices,
                    },
                )
                .await?;
            outputs.compliance_policy_id = Some(created.id);
        }

        if let Some((args, assignments)) = &mac_os.antivirus_policy {
            let component = DeviceConfiguration::new(
                format!("{}-antivirus", self.name),
                create_antivirus_payload(args),
                assignments.clone(),
            );
            outputs.antivirus_policy_id = Some(component.deploy(client).await?);
        }

        if let Some((args, assignments)) = &mac_os.disk_encryption_policy {
            let component = DeviceConfiguration::new(
                format!("{}-disk-encryption", self.name),
                create_disk_encryption_payload(args),
                assignments.clone(),
            );
            outputs.disk_encryption_policy_id = Some(component.deploy(client).await?);
        }

        if let Some((args, assignments)) = &mac_os.firewall_policy {
            let component = DeviceConfiguration::new(
                format!("{}-firewall", self.name),
                create_firewall_payload(args),
                assignments.clone(),
            );
            outputs.firewall_policy_id = Some(component.deploy(client).await?);
        }

        if let Some((args, assignments)) = &mac_os.custom_configurations {
            let importer = DeviceCustomConfigurationImporter::new(
                format!("{}-custom-configs", self.name),
                args.clone(),
                assignments.clone(),
            );
            outputs.imported_configs = importer.deploy(client).await?;
        }

        Ok(())
    }
}
