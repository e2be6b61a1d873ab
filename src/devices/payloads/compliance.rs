//! Default-template merge for the macOS compliance policy payload.

use serde_json::{json, Value};

use crate::devices::compliance::{MacCompliancePolicyInputs, ScheduledActions};
use crate::devices::types::EMPTY_NOTIFICATION_TEMPLATE_ID;
use crate::error::Result;

pub const MACOS_COMPLIANCE_ODATA_TYPE: &str = "#microsoft.graph.macOSCompliancePolicy";

/// Safe baseline for a macOS compliance policy. Every field here can be
/// overridden field-by-field by caller input.
fn default_template() -> Value {
    json!({
        "@odata.type": MACOS_COMPLIANCE_ODATA_TYPE,
        "roleScopeTagIds": ["0"],
        "description": "Compliance policy for MacOS devices",
        "displayName": "MACOS Compliance Policy",
        "passwordRequired": true,
        "passwordBlockSimple": true,
        "passwordMinimumLength": 8,
        "passwordMinimumCharacterSetCount": 1,
        "passwordRequiredType": "deviceDefault",
        "osMinimumVersion": "14",
        "osMaximumVersion": "26.2",
        "systemIntegrityProtectionEnabled": true,
        "deviceThreatProtectionEnabled": false,
        "deviceThreatProtectionRequiredSecurityLevel": "secured",
        "advancedThreatProtectionRequiredSecurityLevel": "secured",
        "gatekeeperAllowedAppSource": "macAppStoreAndIdentifiedDevelopers",
        "storageRequireEncryption": true,
        "firewallEnabled": true,
        "firewallBlockAllIncoming": false,
        "firewallEnableStealthMode": false,
    })
}

/// Build the full compliance policy body from caller input.
///
/// Present input fields overlay the template shallowly, top-level key by
/// key; the scheduled-actions sub-structure is never overlaid but rebuilt
/// from scratch on every call.
pub fn build_compliance_payload(inputs: &MacCompliancePolicyInputs) -> Result<Value> {
    let mut payload = default_template();

    let overlay = serde_json::to_value(inputs)?;
    if let (Value::Object(base), Value::Object(overlay)) = (&mut payload, overlay) {
        for (key, value) in overlay {
            // Caller-facing scheduled-action day counts are not a remote
            // field; they feed the rebuild below.
            if key == "scheduledActions" {
                continue;
            }
            base.insert(key, value);
        }
    }

    if let Value::Object(base) = &mut payload {
        base.insert(
            "scheduledActionsForRule".to_string(),
            build_scheduled_action_rules(inputs.scheduled_actions.as_ref()),
        );
    }

    Ok(payload)
}

/// Rebuild the fixed two-rule action list: block first, then remote-lock.
/// Grace periods are day-counts converted to hours, 0 when unset.
pub fn build_scheduled_action_rules(actions: Option<&ScheduledActions>) -> Value {
    let grace_hours =
        |days: Option<u32>| days.map(|d| u64::from(d) * 24).unwrap_or(0);

    json!([
        {
            "ruleName": null,
            "scheduledActionConfigurations": [
                {
                    "actionType": "block",
                    "gracePeriodHours": grace_hours(
                        actions.and_then(|a| a.mark_device_noncompliant_days)
                    ),
                    "notificationTemplateId": EMPTY_NOTIFICATION_TEMPLATE_ID,
                    "notificationMessageCCList": [],
                },
                {
                    "actionType": "remoteLock",
                    "gracePeriodHours": grace_hours(
                        actions.and_then(|a| a.remotely_lock_noncompliant_device_days)
                    ),
                    "notificationTemplateId": EMPTY_NOTIFICATION_TEMPLATE_ID,
                    "notificationMessageCCList": [],
                },
            ],
        }
    ])
}

/// The PATCH body for an update: the merged payload minus the scheduled
/// actions, which travel via their own sub-resource call.
pub fn build_compliance_patch_body(inputs: &MacCompliancePolicyInputs) -> Result<Value> {
    let mut payload = build_compliance_payload(inputs)?;
    if let Value::Object(base) = &mut payload {
        base.remove("scheduledActionsForRule");
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::compliance::MacCompliancePolicyInputs;

    #[test]
    fn test_omitted_fields_take_template_defaults() {
        let payload = build_compliance_payload(&MacCompliancePolicyInputs::default()).unwrap();
        assert_eq!(payload["displayName"], "MACOS Compliance Policy");
        assert_eq!(payload["passwordRequired"], true);
        assert_eq!(payload["passwordMinimumLength"], 8);
        assert_eq!(payload["osMinimumVersion"], "14");
        assert_eq!(payload["osMaximumVersion"], "26.2");
        assert_eq!(payload["firewallEnabled"], true);
        assert_eq!(payload["@odata.type"], MACOS_COMPLIANCE_ODATA_TYPE);
    }

    #[test]
    fn test_present_fields_always_win() {
        let inputs = MacCompliancePolicyInputs {
            display_name: Some("Corp mac baseline".into()),
            password_required: Some(false),
            os_minimum_version: Some("15".into()),
            ..Default::default()
        };
        let payload = build_compliance_payload(&inputs).unwrap();
        assert_eq!(payload["displayName"], "Corp mac baseline");
        assert_eq!(payload["passwordRequired"], false);
        assert_eq!(payload["osMinimumVersion"], "15");
        // Untouched fields keep their defaults.
        assert_eq!(payload["passwordBlockSimple"], true);
    }

    #[test]
    fn test_extra_fields_overlay_unknown_keys() {
        let mut inputs = MacCompliancePolicyInputs::default();
        inputs
            .extra
            .insert("passwordExpirationDays".into(), serde_json::json!(90));
        let payload = build_compliance_payload(&inputs).unwrap();
        assert_eq!(payload["passwordExpirationDays"], 90);
    }

    #[test]
    fn test_scheduled_actions_three_days_is_72_hours() {
        let inputs = MacCompliancePolicyInputs {
            scheduled_actions: Some(ScheduledActions {
                mark_device_noncompliant_days: Some(3),
                remotely_lock_noncompliant_device_days: None,
            }),
            ..Default::default()
        };
        let payload = build_compliance_payload(&inputs).unwrap();
        let configs = &payload["scheduledActionsForRule"][0]["scheduledActionConfigurations"];
        assert_eq!(configs[0]["actionType"], "block");
        assert_eq!(configs[0]["gracePeriodHours"], 72);
        assert_eq!(configs[1]["actionType"], "remoteLock");
        assert_eq!(configs[1]["gracePeriodHours"], 0);
    }

    #[test]
    fn test_scheduled_actions_default_to_zero_grace() {
        let payload = build_compliance_payload(&MacCompliancePolicyInputs::default()).unwrap();
        let configs = &payload["scheduledActionsForRule"][0]["scheduledActionConfigurations"];
        assert_eq!(configs[0]["gracePeriodHours"], 0);
        assert_eq!(configs[1]["gracePeriodHours"], 0);
        assert_eq!(
            configs[0]["notificationTemplateId"],
            EMPTY_NOTIFICATION_TEMPLATE_ID
        );
    }

    #[test]
    fn test_scheduled_actions_are_rebuilt_not_overlaid() {
        // Even when the caller smuggles a scheduledActionsForRule through the
        // extra map, the builder regenerates the sub-structure.
        let mut inputs = MacCompliancePolicyInputs::default();
        inputs.extra.insert(
            "scheduledActionsForRule".into(),
            serde_json::json!([{"ruleName": "stale"}]),
        );
        let payload = build_compliance_payload(&inputs).unwrap();
        assert_eq!(payload["scheduledActionsForRule"][0]["ruleName"], Value::Null);
    }

    #[test]
    fn test_patch_body_excludes_scheduled_actions() {
        let body = build_compliance_patch_body(&MacCompliancePolicyInputs::default()).unwrap();
        assert!(body.get("scheduledActionsForRule").is_none());
        assert_eq!(body["@odata.type"], MACOS_COMPLIANCE_ODATA_TYPE);
    }
}
