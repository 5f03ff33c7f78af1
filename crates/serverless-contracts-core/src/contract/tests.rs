// crates/serverless-contracts-core/src/contract/tests.rs
// ============================================================================
// Module: Contract Model Unit Tests
// Description: Unit coverage for contract construction and schema composition.
// Purpose: Ensure structural checks fail closed and composition is exact.
// Dependencies: serverless-contracts-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises [`super::ApiGatewayContract`] construction checks and
//! [`super::compose_input_schema`].

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use serde_json::Value;
use serde_json::json;

use super::ApiGatewayContract;
use super::ApiGatewayContractSpec;
use super::ContractError;
use super::InputChannel;
use super::compose_input_schema;
use crate::http::AuthorizerType;
use crate::http::HttpMethod;
use crate::http::IntegrationType;

/// Path parameters schema requiring `userId` and `pageNumber`.
fn path_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "userId": { "type": "string" }, "pageNumber": { "type": "string" } },
        "required": ["userId", "pageNumber"],
        "additionalProperties": false
    })
}

/// Object body schema requiring `foo`.
fn body_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "foo": { "type": "string" } },
        "required": ["foo"]
    })
}

// ============================================================================
// SECTION: Construction
// ============================================================================

#[test]
fn builder_produces_contract_with_declared_fields() {
    let contract = ApiGatewayContract::builder(
        "getUser",
        "/users/{userId}",
        HttpMethod::Get,
        IntegrationType::HttpApi,
    )
    .authorizer_type(AuthorizerType::Jwt)
    .path_parameters_schema(path_schema())
    .output_schema(json!({ "type": "object" }))
    .build()
    .unwrap();

    assert_eq!(contract.id(), "getUser");
    assert_eq!(contract.path(), "/users/{userId}");
    assert_eq!(contract.method(), HttpMethod::Get);
    assert_eq!(contract.integration_type(), IntegrationType::HttpApi);
    assert_eq!(contract.authorizer_type(), AuthorizerType::Jwt);
    assert_eq!(contract.path_parameters_schema(), Some(&path_schema()));
    assert!(contract.query_string_parameters_schema().is_none());
    assert!(contract.headers_schema().is_none());
    assert!(contract.body_schema().is_none());
    assert_eq!(contract.declared_channels(), vec![InputChannel::PathParameters]);
}

#[test]
fn placeholder_without_path_schema_is_rejected() {
    let err = ApiGatewayContract::builder(
        "getUser",
        "/users/{userId}",
        HttpMethod::Get,
        IntegrationType::RestApi,
    )
    .build()
    .unwrap_err();
    assert_eq!(err.kind(), "invalid_contract");
}

#[test]
fn undeclared_placeholder_is_rejected() {
    let err = ApiGatewayContract::builder(
        "getPost",
        "/posts/{postId}",
        HttpMethod::Get,
        IntegrationType::RestApi,
    )
    .path_parameters_schema(path_schema())
    .build()
    .unwrap_err();
    let ContractError::InvalidContract(message) = err;
    assert!(message.contains("postId"));
}

#[test]
fn malformed_template_is_rejected() {
    let result =
        ApiGatewayContract::builder("broken", "/users/{userId", HttpMethod::Get, IntegrationType::RestApi)
            .path_parameters_schema(path_schema())
            .build();
    assert!(result.is_err());
}

#[test]
fn empty_id_and_relative_path_are_rejected() {
    assert!(
        ApiGatewayContract::builder(" ", "/a", HttpMethod::Get, IntegrationType::RestApi)
            .build()
            .is_err()
    );
    assert!(
        ApiGatewayContract::builder("id", "a", HttpMethod::Get, IntegrationType::RestApi)
            .build()
            .is_err()
    );
}

#[test]
fn constrained_schema_must_be_string_valued() {
    let err = ApiGatewayContract::builder("q", "/q", HttpMethod::Get, IntegrationType::HttpApi)
        .query_string_parameters_schema(json!({
            "type": "object",
            "properties": { "page": { "type": "integer" } }
        }))
        .build()
        .unwrap_err();
    let ContractError::InvalidContract(message) = err;
    assert!(message.contains("page"));
}

#[test]
fn constrained_schema_accepts_string_enums() {
    let contract = ApiGatewayContract::builder("h", "/h", HttpMethod::Get, IntegrationType::HttpApi)
        .headers_schema(json!({
            "type": "object",
            "properties": { "x-mode": { "enum": ["fast", "slow"] }, "x-tag": { "const": "a" } }
        }))
        .build();
    assert!(contract.is_ok());
}

#[test]
fn constrained_schema_must_be_object_typed() {
    let result = ApiGatewayContract::builder("h", "/h", HttpMethod::Get, IntegrationType::HttpApi)
        .headers_schema(json!({ "type": "array" }))
        .build();
    assert!(result.is_err());
}

#[test]
fn body_schema_may_be_any_schema_shape() {
    let contract = ApiGatewayContract::builder("b", "/b", HttpMethod::Post, IntegrationType::HttpApi)
        .body_schema(json!({ "type": "array", "items": { "type": "number" } }))
        .output_schema(json!(true))
        .build();
    assert!(contract.is_ok());

    let invalid = ApiGatewayContract::builder("b", "/b", HttpMethod::Post, IntegrationType::HttpApi)
        .body_schema(json!("not a schema"))
        .build();
    assert!(invalid.is_err());
}

#[test]
fn deserialization_runs_structural_checks() {
    let valid: ApiGatewayContract = serde_json::from_value(json!({
        "id": "listUsers",
        "path": "/users",
        "method": "GET",
        "integrationType": "restApi"
    }))
    .unwrap();
    assert_eq!(valid.authorizer_type(), AuthorizerType::None);

    let invalid = serde_json::from_value::<ApiGatewayContract>(json!({
        "id": "getUser",
        "path": "/users/{userId}",
        "method": "GET",
        "integrationType": "restApi"
    }));
    assert!(invalid.is_err());
}

#[test]
fn serialization_omits_absent_schemas() {
    let contract = ApiGatewayContract::builder("b", "/b", HttpMethod::Post, IntegrationType::HttpApi)
        .body_schema(body_schema())
        .build()
        .unwrap();
    let value = serde_json::to_value(&contract).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "b",
            "path": "/b",
            "method": "POST",
            "integrationType": "httpApi",
            "authorizerType": "none",
            "bodySchema": body_schema()
        })
    );
    let spec: ApiGatewayContractSpec = contract.into();
    assert_eq!(spec.body_schema, Some(body_schema()));
}

// ============================================================================
// SECTION: Channel Requirements
// ============================================================================

#[test]
fn channel_requires_value_follows_schema_required_list() {
    let contract = ApiGatewayContract::builder("c", "/c", HttpMethod::Post, IntegrationType::HttpApi)
        .query_string_parameters_schema(json!({
            "type": "object",
            "properties": { "page": { "type": "string" } }
        }))
        .body_schema(body_schema())
        .build()
        .unwrap();
    assert!(!contract.channel_requires_value(InputChannel::QueryStringParameters));
    assert!(contract.channel_requires_value(InputChannel::Body));
    assert!(!contract.channel_requires_value(InputChannel::Headers));
}

#[test]
fn primitive_body_requires_value() {
    let contract = ApiGatewayContract::builder("c", "/c", HttpMethod::Post, IntegrationType::HttpApi)
        .body_schema(json!({ "type": "string" }))
        .build()
        .unwrap();
    assert!(contract.channel_requires_value(InputChannel::Body));
}

// ============================================================================
// SECTION: Aggregate Input Schema
// ============================================================================

#[test]
fn input_schema_with_only_body_requires_only_body() {
    let contract = ApiGatewayContract::builder("b", "/b", HttpMethod::Post, IntegrationType::HttpApi)
        .body_schema(body_schema())
        .build()
        .unwrap();
    let schema = compose_input_schema(&contract);
    assert_eq!(schema["required"], json!(["body"]));
    assert_eq!(schema["properties"], json!({ "body": body_schema() }));
    assert_eq!(schema["additionalProperties"], json!(true));
}

#[test]
fn input_schema_lists_every_declared_channel_in_order() {
    let contract = ApiGatewayContract::builder(
        "full",
        "/users/{userId}",
        HttpMethod::Get,
        IntegrationType::HttpApi,
    )
    .path_parameters_schema(path_schema())
    .query_string_parameters_schema(json!({ "type": "object", "properties": {} }))
    .headers_schema(json!({ "type": "object" }))
    .body_schema(body_schema())
    .build()
    .unwrap();
    let schema = contract.input_schema();
    assert_eq!(
        schema["required"],
        json!(["pathParameters", "queryStringParameters", "headers", "body"])
    );
    assert_eq!(schema["properties"]["pathParameters"], path_schema());
}

#[test]
fn input_schema_for_contract_without_inputs_is_empty_object() {
    let contract = ApiGatewayContract::builder("ping", "/ping", HttpMethod::Get, IntegrationType::RestApi)
        .build()
        .unwrap();
    let schema = compose_input_schema(&contract);
    assert_eq!(schema["properties"], json!({}));
    assert_eq!(schema["required"], json!([]));
}

#[test]
fn input_schema_is_deterministic() {
    let contract = ApiGatewayContract::builder("b", "/b", HttpMethod::Post, IntegrationType::HttpApi)
        .headers_schema(json!({ "type": "object" }))
        .body_schema(body_schema())
        .build()
        .unwrap();
    let first = compose_input_schema(&contract);
    let _trigger = contract.input_schema();
    let second = compose_input_schema(&contract);
    assert_eq!(first, second);
}

#[test]
fn http_methods_parse_case_insensitively_and_reject_unknown_verbs() {
    for method in [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ] {
        assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
        assert_eq!(method.as_str().to_ascii_lowercase().parse::<HttpMethod>().unwrap(), method);
    }
    let err = "TRACE".parse::<HttpMethod>().unwrap_err();
    assert_eq!(err.kind(), "invalid_contract");

    let contract = ApiGatewayContract::builder(
        "ping",
        "/ping",
        "post".parse().unwrap(),
        IntegrationType::RestApi,
    )
    .build()
    .unwrap();
    assert_eq!(contract.method(), HttpMethod::Post);
}
