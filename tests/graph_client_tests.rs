//! Integration tests for the Graph client and the resource providers
//!
//! Uses wiremock to simulate Graph responses and verify request shapes,
//! error surfacing and the multi-call lifecycle sequences.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intune_components::devices::{
    CompliancePolicyAssignmentInputs, CompliancePolicyAssignmentProvider, ConfigurationArgs,
    ConfigurationPolicyProvider, CorporateDeviceIdentifier, CorporateDeviceIdentifiersInputs,
    CorporateDeviceIdentifiersProvider, DeviceCatalogInputs, DeviceCatalogProvider,
    DeviceIdentityType, DevicePlatform, MacCompliancePolicyInputs, MacCompliancePolicyProvider,
    ScheduledActions,
};
use intune_components::devices::payloads::create_antivirus_payload;
use intune_components::{GraphClient, IntuneError, ResourceProvider};

/// Test helper to create a mock server
async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

fn test_client(server: &MockServer) -> GraphClient {
    GraphClient::with_base_url("test-token".into(), server.uri())
}

/// Test successful GET with bearer auth
#[tokio::test]
async fn test_get_sends_bearer_token() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/deviceManagement/deviceCompliancePolicies/p1"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "displayName": "Baseline"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = client
        .get("deviceManagement/deviceCompliancePolicies/p1")
        .await
        .unwrap();
    assert_eq!(body["displayName"], "Baseline");
}

/// Test that a Graph error response surfaces status and the OData message
#[tokio::test]
async fn test_error_response_carries_status_and_message() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/deviceManagement/deviceCompliancePolicies/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": "ResourceNotFound",
                "message": "No policy with that id"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .get("deviceManagement/deviceCompliancePolicies/missing")
        .await
        .unwrap_err();

    match err {
        IntuneError::GraphApiError { status, body, .. } => {
            assert_eq!(status, 404);
            assert!(body.contains("No policy with that id"), "body: {}", body);
        }
        other => panic!("expected GraphApiError, got {:?}", other),
    }
}

/// Test that an empty 204 body does not fail JSON decoding
#[tokio::test]
async fn test_delete_tolerates_empty_body() {
    let server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path("/beta/deviceManagement/configurationPolicies('p1')"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client
        .delete_beta("deviceManagement/configurationPolicies('p1')")
        .await
        .unwrap();
}

/// Test configuration policy creation extracts the remote id
#[tokio::test]
async fn test_configuration_policy_create() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/beta/deviceManagement/configurationPolicies"))
        .and(body_partial_json(json!({
            "platforms": "macOS",
            "technologies": "mdm,microsoftSense"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "policy-123",
            "name": "corp-antivirus"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let provider = ConfigurationPolicyProvider::new("antivirus");
    let payload = create_antivirus_payload(&ConfigurationArgs {
        name: "corp-antivirus".into(),
        description: None,
    });
    let created = provider.create(&client, payload).await.unwrap();
    assert_eq!(created.id, "policy-123");
}

/// Test the two-step compliance update: scheduled actions first, then PATCH
#[tokio::test]
async fn test_compliance_update_sequence() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/deviceManagement/deviceCompliancePolicies/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "@odata.type": "#microsoft.graph.macOSCompliancePolicy"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(
            "/v1.0/deviceManagement/deviceCompliancePolicies/c1/scheduleActionsForRules",
        ))
        .and(body_partial_json(json!({
            "deviceComplianceScheduledActionForRules": [{
                "scheduledActionConfigurations": [{
                    "actionType": "block",
                    "gracePeriodHours": 72
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1.0/deviceManagement/deviceCompliancePolicies/c1"))
        .and(body_partial_json(json!({
            "@odata.type": "#microsoft.graph.macOSCompliancePolicy",
            "passwordMinimumLength": 12
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let provider = MacCompliancePolicyProvider::new("compliance");
    let news = MacCompliancePolicyInputs {
        password_minimum_length: Some(12),
        scheduled_actions: Some(ScheduledActions {
            mark_device_noncompliant_days: Some(3),
            remotely_lock_noncompliant_device_days: None,
        }),
        ..Default::default()
    };
    provider
        .update(&client, "c1", MacCompliancePolicyInputs::default(), news)
        .await
        .unwrap();
}

/// Test compliance assignment posts a group target to the beta assign path
#[tokio::test]
async fn test_compliance_assignment_group_target() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path(
            "/beta/deviceManagement/deviceCompliancePolicies/c1/assign",
        ))
        .and(body_partial_json(json!({
            "assignments": [{
                "target": {
                    "@odata.type": "#microsoft.graph.groupAssignmentTarget",
                    "groupId": "grp-1"
                }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let provider = CompliancePolicyAssignmentProvider::new("compliance-assignment");
    let created = provider
        .create(
            &client,
            CompliancePolicyAssignmentInputs {
                compliance_policy_id: "c1".into(),
                group_id: Some("grp-1".into()),
                all_users: true,
                all_devices: false,
            },
        )
        .await
        .unwrap();
    // Synthetic id: assign calls do not return a resource of their own.
    assert_eq!(created.id, "compliance-assignment");
}

/// Test that a failed identifier import is swallowed, not propagated
#[tokio::test]
async fn test_identifier_import_failure_is_swallowed() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path(
            "/beta/deviceManagement/importedDeviceIdentities/importDeviceIdentityList",
        ))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let provider = CorporateDeviceIdentifiersProvider::new("identifiers");
    let result = provider
        .create(
            &client,
            CorporateDeviceIdentifiersInputs {
                identifiers: vec![CorporateDeviceIdentifier {
                    imported_device_identity_type: DeviceIdentityType::SerialNumber,
                    imported_device_identifier: "C02XXXX".into(),
                    platform: DevicePlatform::MacOS,
                    description: None,
                }],
            },
        )
        .await;
    assert!(result.is_ok());
}

/// Test device category creation and the tolerant delete
#[tokio::test]
async fn test_device_category_lifecycle() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/beta/deviceManagement/deviceCategories"))
        .and(body_partial_json(json!({"displayName": "Laptops"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "cat-1"})))
        .expect(1)
        .mount(&server)
        .await;

    // Category already removed remotely; delete must still succeed.
    Mock::given(method("DELETE"))
        .and(path("/beta/deviceManagement/deviceCategories/cat-1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "ResourceNotFound", "message": "gone"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let provider = DeviceCatalogProvider::new("laptops");
    let created = provider
        .create(
            &client,
            DeviceCatalogInputs {
                catalog_name: "Laptops".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id, "cat-1");

    provider
        .delete(&client, "cat-1", created.outs)
        .await
        .unwrap();
}

/// Test settings-catalog update uses PUT against the OData-keyed path
#[tokio::test]
async fn test_configuration_policy_update_is_put() {
    let server = setup_mock_server().await;

    Mock::given(method("PUT"))
        .and(path("/beta/deviceManagement/configurationPolicies('p9')"))
        .and(body_partial_json(json!({"name": "corp-firewall"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p9"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let provider = ConfigurationPolicyProvider::new("firewall");
    let mut policy = create_antivirus_payload(&ConfigurationArgs {
        name: "corp-firewall".into(),
        description: None,
    });
    policy.name = "corp-firewall".into();
    provider
        .update(&client, "p9", policy.clone(), policy)
        .await
        .unwrap();
}
