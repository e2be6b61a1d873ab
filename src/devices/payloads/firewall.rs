//! macOS firewall policy builder. The firewall itself is always enabled;
//! stealth mode, incoming-block and the per-application allow list come
//! from caller input.

use serde_json::{json, Value};

use crate::devices::types::DeviceConfigurationPolicy;

#[derive(Debug, Clone, Default)]
pub struct FirewallArgs {
    pub name: String,
    pub description: Option<String>,
    pub enable_stealth_mode: bool,
    pub block_all_incoming: bool,
    pub allow_built_in_apps: bool,
    pub allow_signed_apps: bool,
    pub allowed_applications: Vec<String>,
}

fn choice(definition_id: &str, value: String) -> Value {
    json!({
        "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingInstance",
        "settingDefinitionId": definition_id,
        "choiceSettingValue": {
            "@odata.type": "#microsoft.graph.deviceManagementConfigurationChoiceSettingValue",
            "value": value,
            "children": [],
        },
    })
}

fn bool_choice(definition_id: &str, enabled: bool) -> Value {
    choice(
        definition_id,
        format!("{}_{}", definition_id, if enabled { "true" } else { "false" }),
    )
}

pub fn create_firewall_payload(args: &FirewallArgs) -> DeviceConfigurationPolicy {
    let mut children = vec![
        bool_choice(
            "com.apple.security.firewall_enablestealthmode",
            args.enable_stealth_mode,
        ),
        bool_choice("com.apple.security.firewall_enablefirewall", true),
        bool_choice(
            "com.apple.security.firewall_blockallincoming",
            args.block_all_incoming,
        ),
        bool_choice(
            "com.apple.security.firewall_allowsigned",
            args.allow_built_in_apps,
        ),
        bool_choice(
            "com.apple.security.firewall_allowsignedapp",
            args.allow_signed_apps,
        ),
    ];

    if !args.allowed_applications.is_empty() {
        let applications: Vec<Value> = args
            .allowed_applications
            .iter()
            .map(|bundle_id| {
                json!({
                    "children": [
                        bool_choice("com.apple.security.firewall_applications_item_allowed", true),
                        {
                            "@odata.type": "#microsoft.graph.deviceManagementConfigurationSimpleSettingInstance",
                            "settingDefinitionId": "com.apple.security.firewall_applications_item_bundleid",
                            "simpleSettingValue": {
                                "@odata.type": "#microsoft.graph.deviceManagementConfigurationStringSettingValue",
                                "value": bundle_id,
                            },
                        },
                    ],
                })
            })
            .collect();

        children.push(json!({
            "@odata.type": "#microsoft.graph.deviceManagementConfigurationGroupSettingCollectionInstance",
            "settingDefinitionId": "com.apple.security.firewall_applications",
            "groupSettingCollectionValue": applications,
        }));
    }

    DeviceConfigurationPolicy {
        name: args.name.clone(),
        description: Some(args.description.clone().unwrap_or_else(|| args.name.clone())),
        platforms: "macOS".into(),
        technologies: "mdm,appleRemoteManagement".into(),
        role_scope_tag_ids: vec!["0".into()],
        settings: vec![json!({
            "@odata.type": "#microsoft.graph.deviceManagementConfigurationSetting",
            "settingInstance": {
                "@odata.type": "#microsoft.graph.deviceManagementConfigurationGroupSettingCollectionInstance",
                "settingDefinitionId": "com.apple.security.firewall_com.apple.security.firewall",
                "groupSettingCollectionValue": [{ "children": children }],
                "settingInstanceTemplateReference": {
                    "settingInstanceTemplateId": "1d79203d-05b3-41d2-b435-0403fc4141cb",
                },
            },
        })],
        template_reference: Some(json!({
            "templateId": "de730c94-09d5-4972-9672-1b9cefe77b64_1",
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firewall_children(payload: &DeviceConfigurationPolicy) -> &Vec<Value> {
        payload.settings[0]["settingInstance"]["groupSettingCollectionValue"][0]["children"]
            .as_array()
            .expect("children array")
    }

    #[test]
    fn test_firewall_always_enabled() {
        let payload = create_firewall_payload(&FirewallArgs {
            name: "mac-fw".into(),
            ..Default::default()
        });
        let children = firewall_children(&payload);
        assert_eq!(
            children[1]["choiceSettingValue"]["value"],
            "com.apple.security.firewall_enablefirewall_true"
        );
        // No allow list, so only the five boolean settings.
        assert_eq!(children.len(), 5);
    }

    #[test]
    fn test_stealth_mode_flag_reflected() {
        let payload = create_firewall_payload(&FirewallArgs {
            name: "mac-fw".into(),
            enable_stealth_mode: true,
            ..Default::default()
        });
        let children = firewall_children(&payload);
        assert_eq!(
            children[0]["choiceSettingValue"]["value"],
            "com.apple.security.firewall_enablestealthmode_true"
        );
    }

    #[test]
    fn test_allowed_applications_expand_per_bundle_id() {
        let payload = create_firewall_payload(&FirewallArgs {
            name: "mac-fw".into(),
            allowed_applications: vec!["com.corp.agent".into(), "com.corp.vpn".into()],
            ..Default::default()
        });
        let children = firewall_children(&payload);
        let apps = children[5]["groupSettingCollectionValue"]
            .as_array()
            .expect("application collection");
        assert_eq!(apps.len(), 2);
        assert_eq!(
            apps[1]["children"][1]["simpleSettingValue"]["value"],
            "com.corp.vpn"
        );
    }
}
