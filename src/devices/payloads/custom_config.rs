//! File-derived configuration payloads.
//!
//! A local profile file is base64-encoded and classified by extension:
//! `.crt` becomes a trusted-root-certificate profile, `.json` is treated as
//! an exported settings-catalog policy (bookkeeping fields stripped before
//! re-submission), and anything else ships as an opaque
//! `macOSCustomConfiguration` blob.

use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use serde_json::Value;

use crate::devices::types::{
    CustomConfigPayload, CustomConfiguration, DeviceConfigurationPolicy, TrustedRootCertificate,
    PLACEHOLDER_ID,
};
use crate::error::{IntuneError, Result};

/// File extensions the directory importer picks up; everything else in the
/// directory is silently skipped.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".mobileconfig", ".crt", ".xml", ".json"];

/// Remote bookkeeping fields that must not be re-submitted when importing
/// an exported policy JSON.
const BOOKKEEPING_FIELDS: &[&str] = &["id", "createdDateTime", "lastModifiedDateTime", "version"];

#[derive(Debug, Clone)]
pub struct CustomConfigArgs {
    pub name: String,
    pub description: Option<String>,
    pub deployment_channel: String,
    pub payload_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfigsArgs {
    pub config_dir: PathBuf,
    pub deployment_channel: String,
    pub name_prefix: String,
    pub description: Option<String>,
}

/// A classified configuration ready to be provisioned. The variant decides
/// which provider and assign endpoint the composites dispatch to.
#[derive(Debug, Clone)]
pub enum ImportedConfig {
    Custom {
        name: String,
        payload: CustomConfigPayload,
    },
    DeviceConfiguration {
        name: String,
        policy: DeviceConfigurationPolicy,
    },
}

impl ImportedConfig {
    pub fn name(&self) -> &str {
        match self {
            ImportedConfig::Custom { name, .. } => name,
            ImportedConfig::DeviceConfiguration { name, .. } => name,
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read a profile file, returning its name, raw content and base64 form.
fn load_base64_file_content(path: &Path) -> Result<(String, String, String)> {
    let name = file_name(path);
    let content = fs::read_to_string(path)?;
    let encoded = general_purpose::STANDARD.encode(content.as_bytes());
    Ok((name, content, encoded))
}

/// Build one classified configuration from a local file.
pub fn create_custom_config(args: &CustomConfigArgs) -> Result<ImportedConfig> {
    let (file_name, content, encoded) = load_base64_file_content(&args.payload_file)?;
    let stem = file_stem(&args.payload_file);
    let description = args.description.clone().unwrap_or_else(|| args.name.clone());

    if file_name.ends_with(".crt") {
        return Ok(ImportedConfig::Custom {
            name: args.name.clone(),
            payload: CustomConfigPayload::TrustedRootCertificate(TrustedRootCertificate {
                odata_type: "#microsoft.graph.macOSTrustedRootCertificate".into(),
                id: PLACEHOLDER_ID.into(),
                display_name: args.name.clone(),
                description,
                deployment_channel: args.deployment_channel.clone(),
                role_scope_tag_ids: vec!["0".into()],
                cert_file_name: file_name,
                trusted_root_certificate: encoded,
            }),
        });
    }

    if file_name.ends_with(".json") {
        let policy = parse_exported_policy(&args.name, &description, &content)?;
        return Ok(ImportedConfig::DeviceConfiguration {
            name: args.name.clone(),
            policy,
        });
    }

    Ok(ImportedConfig::Custom {
        name: args.name.clone(),
        payload: CustomConfigPayload::CustomConfiguration(CustomConfiguration {
            odata_type: "#microsoft.graph.macOSCustomConfiguration".into(),
            id: PLACEHOLDER_ID.into(),
            role_scope_tag_ids: vec!["0".into()],
            description,
            display_name: args.name.clone(),
            deployment_channel: args.deployment_channel.clone(),
            payload_name: stem,
            payload_file_name: file_name,
            payload: encoded,
        }),
    })
}

/// Parse an exported settings-catalog policy, dropping the remote
/// bookkeeping fields Graph refuses on creation.
fn parse_exported_policy(
    name: &str,
    description: &str,
    content: &str,
) -> Result<DeviceConfigurationPolicy> {
    let mut value: Value =
        serde_json::from_str(content).map_err(|e| IntuneError::ConfigParseError {
            message: e.to_string(),
            content: content.to_string(),
        })?;

    let map = value
        .as_object_mut()
        .ok_or_else(|| IntuneError::ConfigParseError {
            message: "expected a JSON object at the top level".into(),
            content: content.to_string(),
        })?;

    for field in BOOKKEEPING_FIELDS {
        map.remove(*field);
    }
    map.insert("name".into(), Value::String(name.to_string()));
    map.entry("description")
        .or_insert_with(|| Value::String(description.to_string()));

    serde_json::from_value(value.clone()).map_err(|e| IntuneError::ConfigParseError {
        message: e.to_string(),
        content: content.to_string(),
    })
}

/// Build one configuration per accepted file in a directory.
///
/// Files whose extension is not in [`ACCEPTED_EXTENSIONS`] are skipped
/// without error; import order follows directory-name order for stable
/// resource naming.
pub fn create_configs_from_dir(args: &DirectoryConfigsArgs) -> Result<Vec<ImportedConfig>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(&args.config_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let name = file_name(path);
            ACCEPTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
        })
        .collect();
    entries.sort();

    entries
        .iter()
        .map(|path| {
            let stem = file_stem(path);
            create_custom_config(&CustomConfigArgs {
                name: format!("{}-{}", args.name_prefix, stem),
                description: Some(
                    args.description
                        .clone()
                        .unwrap_or_else(|| format!("Configuration for {}", stem)),
                ),
                deployment_channel: args.deployment_channel.clone(),
                payload_file: path.clone(),
            })
        })
        .collect()
}
