//! Microsoft Defender antivirus baseline for macOS, expressed as a
//! settings-catalog policy against the Defender template.

use serde_json::{json, Value};

use crate::devices::types::{ConfigurationArgs, DeviceConfigurationPolicy};

const DEFENDER_TEMPLATE_ID: &str = "2d345ec2-c817-49e5-9156-3ed416dc972a_1";

enum SettingValue {
    /// Choice value string, fully qualified.
    Choice(&'static str),
    Integer(i64),
}

struct DefenderSetting {
    definition_id: &'static str,
    instance_template_id: &'static str,
    value_template_id: &'static str,
    value: SettingValue,
}

/// The fixed Defender baseline: preferences keyed under
/// `com.apple.managedclient.preferences`, enforcement set to level 2
/// (enforced) for the engine, tamper protection and overall level.
const BASELINE: &[DefenderSetting] = &[
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_enabled",
        instance_template_id: "9e424cc6-35b9-48ef-863c-73295aa9d2d7",
        value_template_id: "7ea0a2aa-0953-4340-b590-522f040b0da3",
        value: SettingValue::Choice("com.apple.managedclient.preferences_enabled_true"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_automaticsamplesubmission",
        instance_template_id: "d5563bad-08c5-47de-8bbb-5d44e0f9a23a",
        value_template_id: "de57abd5-1a87-463e-96e7-e117524003ba",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_automaticsamplesubmission_true",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_diagnosticlevel",
        instance_template_id: "c7a9a79b-20cf-461f-8021-94702a32543b",
        value_template_id: "5fc10db6-9ee5-434a-9ed0-1382bf72969e",
        value: SettingValue::Choice("com.apple.managedclient.preferences_diagnosticlevel_0"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_automaticdefinitionupdateenabled",
        instance_template_id: "cc18c6dc-dca5-4845-9c78-c718c9447ddd",
        value_template_id: "112fd4a8-1393-49b6-9569-0d37266a6ad3",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_automaticdefinitionupdateenabled_true",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_enablerealtimeprotection",
        instance_template_id: "426bd5b7-cf4e-49b6-99fe-f763def46e61",
        value_template_id: "3c72c919-e0b9-4ed2-aead-a9c98ea63216",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_enablerealtimeprotection_true",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_passivemode",
        instance_template_id: "7246d8d4-3cfb-4423-8b64-4e6a0db9eb62",
        value_template_id: "e4f0126b-24dc-4341-9edc-94577787dc8e",
        value: SettingValue::Choice("com.apple.managedclient.preferences_passivemode_true"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_scanhistorymaximumitems",
        instance_template_id: "46df7588-c7fa-48a1-983b-59fcfff33eec",
        value_template_id: "de0f30a5-14f9-4190-82b9-f95aea6438f8",
        value: SettingValue::Integer(10000),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_scanresultsretentiondays",
        instance_template_id: "6b2a8b5b-379a-461b-b36d-42a12dabd54b",
        value_template_id: "f97c1b05-9600-4175-9ad4-81fc33bcc3b2",
        value: SettingValue::Integer(90),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_exclusionsmergepolicy",
        instance_template_id: "c07a6983-ac3e-4f38-be45-20954638dabd",
        value_template_id: "effc409a-9169-43f0-a807-2a388875cf99",
        value: SettingValue::Choice("com.apple.managedclient.preferences_exclusionsmergepolicy_1"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_threattypesettingsmergepolicy",
        instance_template_id: "65d9ddaf-0552-4e40-8575-71dd54b2ccb4",
        value_template_id: "613bcf39-69ec-4a1f-8822-07789ae7f8cb",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_threattypesettingsmergepolicy_0",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_enablefilehashcomputation",
        instance_template_id: "8472c23f-3f2d-4acf-9386-a0715ad6e591",
        value_template_id: "96559430-ea19-4fb6-b98a-c237a2e31ae5",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_enablefilehashcomputation_true",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_scanafterdefinitionupdate",
        instance_template_id: "65bc7d9e-a0fc-4e3f-b464-550c30589e3c",
        value_template_id: "1d05f27d-cc04-44a3-82f8-91df943b03e4",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_scanafterdefinitionupdate_true",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_scanarchives",
        instance_template_id: "27ca9434-85a0-4175-999d-bbef8eb8d066",
        value_template_id: "26bb4b38-6e8a-4e3d-9045-81314475b3fe",
        value: SettingValue::Choice("com.apple.managedclient.preferences_scanarchives_true"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_enforcementlevel_antivirusengine",
        instance_template_id: "a1bf7f4c-196e-4930-8395-a9b496433322",
        value_template_id: "440003a2-8406-47bb-a785-a45869556ead",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_enforcementlevel_antivirusengine_2",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_enforcementlevel",
        instance_template_id: "94f6f35c-4cee-4a61-930a-491b698c790a",
        value_template_id: "96ced765-4f68-441a-b9ad-b683cfdfa28f",
        value: SettingValue::Choice("com.apple.managedclient.preferences_enforcementlevel_2"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_enforcementlevel_tamperprotection",
        instance_template_id: "3c4efab3-cf91-4540-b86d-54507c90bb4b",
        value_template_id: "6e25fd09-16f1-42fd-9ffe-954ee1c0b904",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_enforcementlevel_tamperprotection_2",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_consumerexperience",
        instance_template_id: "1cb52ec2-c861-4c4a-9184-e4cc13eba6ad",
        value_template_id: "95f4ea0a-5907-4008-931b-652105f937a0",
        value: SettingValue::Choice("com.apple.managedclient.preferences_consumerexperience_1"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_hidestatusmenuicon",
        instance_template_id: "1b9f3e2b-46e8-4346-935d-dd0bd8ad2443",
        value_template_id: "fd30f322-4968-4479-8510-ad308ca8abe3",
        value: SettingValue::Choice("com.apple.managedclient.preferences_hidestatusmenuicon_true"),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_userinitiatedfeedback",
        instance_template_id: "4423d695-27c2-4266-b253-bff098657834",
        value_template_id: "41df6cea-c66a-44a6-b37b-c73c811a898c",
        value: SettingValue::Choice(
            "com.apple.managedclient.preferences_userinitiatedfeedback_0",
        ),
    },
    DefenderSetting {
        definition_id: "com.apple.managedclient.preferences_maximumondemandscanthreads",
        instance_template_id: "e02fd3ba-4146-4b7d-9c7f-dffec96465e5",
        value_template_id: "fe25bbb2-f6de-480a-9153-11f90d7dab4e",
        value: SettingValue::Integer(2),
    },
];

fn build_setting(setting: &DefenderSetting) -> Value {
    let value = match &setting.value {
        SettingValue::Choice(choice) => json!({
            "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance",
            "settingDefinitionId": setting.definition_id,
            "settingInstanceTemplateReference": {
                "settingInstanceTemplateId": setting.instance_template_id,
            },
            "choiceSettingValue": {
                "value": choice,
                "settingValueTemplateReference": {
                    "settingValueTemplateId": setting.value_template_id,
                    "useTemplateDefault": false,
                },
                "children": [],
            },
        }),
        SettingValue::Integer(n) => json!({
            "@odata.type": "#microsoft.graph.deviceManagementConfigurationSimpleSettingInstance",
            "settingDefinitionId": setting.definition_id,
            "settingInstanceTemplateReference": {
                "settingInstanceTemplateId": setting.instance_template_id,
            },
            "simpleSettingValue": {
                "@odata.type": "#microsoft.graph.deviceManagementConfigurationIntegerSettingValue",
                "value": n,
                "settingValueTemplateReference": {
                    "settingValueTemplateId": setting.value_template_id,
                    "useTemplateDefault": false,
                },
            },
        }),
    };

    json!({
        "@odata.type": "#microsoft.graph.deviceManagementConfigurationSetting",
        "settingInstance": value,
    })
}

pub fn create_antivirus_payload(args: &ConfigurationArgs) -> DeviceConfigurationPolicy {
    DeviceConfigurationPolicy {
        name: args.name.clone(),
        description: Some(args.description.clone().unwrap_or_else(|| args.name.clone())),
        platforms: "macOS".into(),
        technologies: "mdm,microsoftSense".into(),
        role_scope_tag_ids: vec!["0".into()],
        settings: BASELINE.iter().map(build_setting).collect(),
        template_reference: Some(json!({ "templateId": DEFENDER_TEMPLATE_ID })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_antivirus_payload_targets_defender_template() {
        let payload = create_antivirus_payload(&ConfigurationArgs {
            name: "mac-av".into(),
            description: None,
        });
        assert_eq!(payload.technologies, "mdm,microsoftSense");
        assert_eq!(
            payload.template_reference.unwrap()["templateId"],
            DEFENDER_TEMPLATE_ID
        );
        assert_eq!(payload.settings.len(), BASELINE.len());
        // Description falls back to the name.
        assert_eq!(payload.description.as_deref(), Some("mac-av"));
    }

    #[test]
    fn test_integer_settings_carry_typed_values() {
        let payload = create_antivirus_payload(&ConfigurationArgs {
            name: "mac-av".into(),
            description: None,
        });
        let retention = payload
            .settings
            .iter()
            .find(|s| {
                s["settingInstance"]["settingDefinitionId"]
                    == "com.apple.managedclient.preferences_scanresultsretentiondays"
            })
            .expect("retention setting present");
        assert_eq!(retention["settingInstance"]["simpleSettingValue"]["value"], 90);
    }
}
