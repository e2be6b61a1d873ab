//! FileVault disk encryption policy against the endpoint-security disk
//! encryption template.

use serde_json::json;

use crate::devices::types::DeviceConfigurationPolicy;

#[derive(Debug, Clone, Default)]
pub struct DiskEncryptionArgs {
    pub name: String,
    pub description: Option<String>,
    /// Message shown to users for recovery key escrow; defaults to pointing
    /// them at the helpdesk.
    pub file_vault_recovery_key_escrow: Option<String>,
}

pub fn create_disk_encryption_payload(args: &DiskEncryptionArgs) -> DeviceConfigurationPolicy {
    let escrow_message = args
        .file_vault_recovery_key_escrow
        .clone()
        .unwrap_or_else(|| "Please contact IT-HelpDesk for help".to_string());

    DeviceConfigurationPolicy {
        name: args.name.clone(),
        description: Some(args.description.clone().unwrap_or_else(|| args.name.clone())),
        platforms: "macOS".into(),
        technologies: "mdm,appleRemoteManagement".into(),
        role_scope_tag_ids: vec!["0".into()],
        settings: vec![
            json!({
                "@odata.type": "#microsoft.graph.deviceManagementConfigurationSetting",
                "settingInstance": {
                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationGroupSettingCollectionInstance",
                    "settingDefinitionId": "com.apple.mcx.filevault2_com.apple.mcx.filevault2",
                    "groupSettingCollectionValue": [
                        {
                            "children": [
                                {
                                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance",
                                    "settingDefinitionId": "com.apple.mcx.filevault2_deferdontaskatuserlogout",
                                    "choiceSettingValue": {
                                        "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingValue",
                                        "value": "com.apple.mcx.filevault2_deferdontaskatuserlogout_false",
                                        "children": [],
                                    },
                                },
                                {
                                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationSimpleSettingInstance",
                                    "settingDefinitionId": "com.apple.mcx.filevault2_deferforceatuserloginmaxbypassattempts",
                                    "simpleSettingValue": {
                                        "@odata.type": "#microsoft.graph.deviceManagementConfigurationIntegerSettingValue",
                                        "value": 0,
                                    },
                                },
                                {
                                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance",
                                    "settingDefinitionId": "com.apple.mcx.filevault2_enable",
                                    "choiceSettingValue": {
                                        "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingValue",
                                        "value": "com.apple.mcx.filevault2_enable_0",
                                        "children": [],
                                    },
                                },
                                {
                                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance",
                                    "settingDefinitionId": "com.apple.mcx.filevault2_recoverykeyrotationinmonths",
                                    "choiceSettingValue": {
                                        "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingValue",
                                        "value": "com.apple.mcx.filevault2_recoverykeyrotationinmonths_12",
                                        "children": [],
                                    },
                                },
                                {
                                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance",
                                    "settingDefinitionId": "com.apple.mcx.filevault2_userecoverykey",
                                    "choiceSettingValue": {
                                        "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingValue",
                                        "value": "com.apple.mcx.filevault2_userecoverykey_true",
                                        "children": [],
                                    },
                                },
                            ],
                        },
                    ],
                    "settingInstanceTemplateReference": {
                        "settingInstanceTemplateId": "0e20e909-e28a-41a1-8541-5aadd4714d7d",
                    },
                },
            }),
            json!({
                "@odata.type": "#microsoft.graph.deviceManagementConfigurationSetting",
                "settingInstance": {
                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationGroupSettingCollectionInstance",
                    "settingDefinitionId": "com.apple.security.fderecoverykeyescrow_com.apple.security.fderecoverykeyescrow",
                    "groupSettingCollectionValue": [
                        {
                            "children": [
                                {
                                    "@odata.type": "#microsoft.graph.deviceManagementConfigurationSimpleSettingInstance",
                                    "settingDefinitionId": "com.apple.security.fderecoverykeyescrow_location",
                                    "simpleSettingValue": {
                                        "@odata.type": "#microsoft.graph.deviceManagementConfigurationStringSettingValue",
                                        "value": escrow_message,
                                    },
                                },
                            ],
                        },
                    ],
                    "settingInstanceTemplateReference": {
                        "settingInstanceTemplateId": "6f9cb7be-2e50-408a-b24b-6e1387a07fc7",
                    },
                },
            }),
        ],
        template_reference: Some(json!({
            "templateId": "e688156f-6564-4c03-b34f-83b90fe6bb82_1",
            "templateFamily": "endpointSecurityDiskEncryption",
            "templateDisplayName": "MacOS Filevault",
            "templateDisplayVersion": "Version 1",
        })),
    }
}
