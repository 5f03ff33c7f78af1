// crates/serverless-contracts-core/tests/triggers.rs
// ============================================================================
// Module: Trigger Descriptor Tests
// Description: Tests for route registration descriptors derived from contracts.
// ============================================================================
//! ## Overview
//! Validates trigger key selection and configuration merging.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::HttpMethod;
use serverless_contracts_core::IntegrationType;
use serverless_contracts_core::TriggerKind;
use serverless_contracts_core::get_complete_trigger;
use serverless_contracts_core::get_trigger;

/// Builds a contract routed at `/users/{userId}`.
fn contract(integration_type: IntegrationType) -> ApiGatewayContract {
    ApiGatewayContract::builder("getUser", "/users/{userId}", HttpMethod::Get, integration_type)
        .path_parameters_schema(json!({
            "type": "object",
            "properties": { "userId": { "type": "string" } },
            "required": ["userId"]
        }))
        .build()
        .unwrap()
}

// ============================================================================
// SECTION: Simple Trigger
// ============================================================================

#[test]
fn http_api_contract_uses_http_api_key() {
    let trigger = get_trigger(&contract(IntegrationType::HttpApi));
    assert_eq!(trigger.kind(), TriggerKind::HttpApi);
    assert_eq!(
        serde_json::to_value(&trigger).unwrap(),
        json!({ "httpApi": { "path": "/users/{userId}", "method": "GET" } })
    );
}

#[test]
fn rest_api_contract_uses_http_key() {
    let trigger = get_trigger(&contract(IntegrationType::RestApi));
    assert_eq!(trigger.kind(), TriggerKind::Http);
    assert_eq!(trigger.to_value(), json!({ "http": { "path": "/users/{userId}", "method": "GET" } }));
    assert_eq!(trigger.path(), Some("/users/{userId}"));
    assert_eq!(trigger.method(), Some("GET"));
}

// ============================================================================
// SECTION: Complete Trigger
// ============================================================================

#[test]
fn complete_trigger_merges_platform_configuration() {
    let mut extra = Map::new();
    extra.insert("authorizer".to_string(), json!({ "name": "userPool" }));
    extra.insert("cors".to_string(), Value::Bool(true));
    let trigger = get_complete_trigger(&contract(IntegrationType::RestApi), extra);
    assert_eq!(
        trigger.to_value(),
        json!({
            "http": {
                "path": "/users/{userId}",
                "method": "GET",
                "authorizer": { "name": "userPool" },
                "cors": true
            }
        })
    );
}

#[test]
fn contract_route_overrides_caller_route() {
    let mut extra = Map::new();
    extra.insert("path".to_string(), json!("/elsewhere"));
    extra.insert("method".to_string(), json!("DELETE"));
    let trigger = get_complete_trigger(&contract(IntegrationType::HttpApi), extra);
    assert_eq!(trigger.path(), Some("/users/{userId}"));
    assert_eq!(trigger.method(), Some("GET"));
    assert_eq!(trigger.config().len(), 2);
}
