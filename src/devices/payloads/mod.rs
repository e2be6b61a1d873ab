//! Payload builders: pure functions mapping ergonomic caller input to the
//! exact nested bodies the Graph device-management endpoints expect.

pub mod antivirus;
pub mod compliance;
pub mod custom_config;
pub mod disk_encryption;
pub mod firewall;

pub use antivirus::create_antivirus_payload;
pub use compliance::{build_compliance_payload, build_scheduled_action_rules};
pub use custom_config::{
    create_configs_from_dir, create_custom_config, CustomConfigArgs, DirectoryConfigsArgs,
    ImportedConfig, ACCEPTED_EXTENSIONS,
};
pub use disk_encryption::{create_disk_encryption_payload, DiskEncryptionArgs};
pub use firewall::{create_firewall_payload, FirewallArgs};
