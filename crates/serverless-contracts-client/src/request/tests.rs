// crates/serverless-contracts-client/src/request/tests.rs
// ============================================================================
// Module: Request Builder Unit Tests
// Description: Unit coverage for request descriptor assembly.
// Purpose: Ensure descriptors never disagree with the contract.
// Dependencies: serverless-contracts-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises [`super::build_request`] path filling, path value encoding, and
//! channel agreement.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use serde_json::json;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::HttpMethod;
use serverless_contracts_core::IntegrationType;
use serverless_contracts_core::TemplateError;
use url::Url;

use super::RequestArguments;
use super::build_request;
use crate::error::ClientError;
use crate::http::ReqwestTransport;

/// Contract declaring every channel.
fn full_contract() -> ApiGatewayContract {
    ApiGatewayContract::builder("getUser", "/users/{userId}", HttpMethod::Get, IntegrationType::HttpApi)
        .path_parameters_schema(json!({
            "type": "object",
            "properties": { "userId": { "type": "string" }, "pageNumber": { "type": "string" } },
            "required": ["userId", "pageNumber"],
            "additionalProperties": false
        }))
        .query_string_parameters_schema(json!({
            "type": "object",
            "properties": { "testId": { "type": "string" } },
            "required": ["testId"]
        }))
        .headers_schema(json!({
            "type": "object",
            "properties": { "myHeader": { "type": "string" } },
            "required": ["myHeader"]
        }))
        .body_schema(json!({
            "type": "object",
            "properties": { "foo": { "type": "string" } },
            "required": ["foo"]
        }))
        .build()
        .unwrap()
}

#[test]
fn descriptor_matches_the_documented_example() {
    let args = RequestArguments::new()
        .path_parameter("userId", "123")
        .path_parameter("pageNumber", "12")
        .query_parameter("testId", "155")
        .header("myHeader", "12")
        .body(json!({ "foo": "bar" }));
    let descriptor = build_request(&full_contract(), args).unwrap();
    assert_eq!(
        serde_json::to_value(&descriptor).unwrap(),
        json!({
            "method": "GET",
            "path": "/users/123",
            "headers": { "myHeader": "12" },
            "queryStringParameters": { "testId": "155" },
            "body": { "foo": "bar" }
        })
    );
}

#[test]
fn missing_path_value_fails_before_channel_checks() {
    let err = build_request(&full_contract(), RequestArguments::new()).unwrap_err();
    match err {
        ClientError::Template(TemplateError::MissingPathParameter {
            name,
        }) => assert_eq!(name, "userId"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn omitted_required_channel_is_a_schema_mismatch() {
    let args = RequestArguments::new()
        .path_parameter("userId", "1")
        .query_parameter("testId", "1")
        .header("myHeader", "1");
    let err = build_request(&full_contract(), args).unwrap_err();
    assert_eq!(err.kind(), "schema_mismatch");
    assert!(err.to_string().contains("body"));
}

#[test]
fn undeclared_channel_is_a_schema_mismatch() {
    let contract =
        ApiGatewayContract::builder("listUsers", "/users", HttpMethod::Get, IntegrationType::RestApi)
            .build()
            .unwrap();
    let err = build_request(&contract, RequestArguments::new().body(json!({}))).unwrap_err();
    assert_eq!(err.kind(), "schema_mismatch");

    let err = build_request(&contract, RequestArguments::new().path_parameter("x", "1")).unwrap_err();
    assert_eq!(err.kind(), "schema_mismatch");
}

#[test]
fn optional_channels_may_be_omitted_and_stay_absent() {
    let contract =
        ApiGatewayContract::builder("search", "/search", HttpMethod::Get, IntegrationType::HttpApi)
            .query_string_parameters_schema(json!({
                "type": "object",
                "properties": { "q": { "type": "string" } }
            }))
            .build()
            .unwrap();
    let descriptor = build_request(&contract, RequestArguments::new()).unwrap();
    assert_eq!(serde_json::to_value(&descriptor).unwrap(), json!({ "method": "GET", "path": "/search" }));
}

#[test]
fn input_value_lists_supplied_channels_only() {
    let args = RequestArguments::new().header("a", "1").body(json!([1, 2]));
    assert_eq!(args.input_value(), json!({ "headers": { "a": "1" }, "body": [1, 2] }));
}

/// Contract with a single path placeholder.
fn user_contract(path: &str) -> ApiGatewayContract {
    ApiGatewayContract::builder("user", path, HttpMethod::Get, IntegrationType::HttpApi)
        .path_parameters_schema(json!({
            "type": "object",
            "properties": { "userId": { "type": "string" }, "proxy+": { "type": "string" } }
        }))
        .build()
        .unwrap()
}

/// Resolves a descriptor path against a fixed base URL.
fn resolved(path: &str) -> String {
    let transport =
        ReqwestTransport::new(Url::parse("https://api.example.com/prod").unwrap()).unwrap();
    let descriptor = super::RequestDescriptor {
        method: HttpMethod::Get,
        path: path.to_string(),
        headers: None,
        query_string_parameters: None,
        body: None,
    };
    transport.resolve(&descriptor).unwrap().to_string()
}

#[test]
fn path_values_stay_inside_their_segment() {
    let contract = user_contract("/users/{userId}");
    let descriptor =
        build_request(&contract, RequestArguments::new().path_parameter("userId", "../admin"))
            .unwrap();
    assert_eq!(descriptor.path, "/users/..%2Fadmin");
    assert_eq!(resolved(&descriptor.path), "https://api.example.com/prod/users/..%2Fadmin");

    let descriptor =
        build_request(&contract, RequestArguments::new().path_parameter("userId", "a/b?x=1"))
            .unwrap();
    assert_eq!(descriptor.path, "/users/a%2Fb%3Fx=1");
    assert_eq!(resolved(&descriptor.path), "https://api.example.com/prod/users/a%2Fb%3Fx=1");

    let descriptor =
        build_request(&contract, RequestArguments::new().path_parameter("userId", "a b%"))
            .unwrap();
    assert_eq!(descriptor.path, "/users/a%20b%25");
}

#[test]
fn dot_and_empty_path_values_are_rejected() {
    let contract = user_contract("/users/{userId}");
    for value in ["..", ".", ""] {
        let err =
            build_request(&contract, RequestArguments::new().path_parameter("userId", value))
                .unwrap_err();
        assert_eq!(err.kind(), "schema_mismatch", "value {value:?}");
    }
}

#[test]
fn greedy_placeholders_keep_separators_but_encode_segments() {
    let contract = user_contract("/files/{proxy+}");
    let descriptor = build_request(
        &contract,
        RequestArguments::new().path_parameter("proxy+", "docs/a b/c?d"),
    )
    .unwrap();
    assert_eq!(descriptor.path, "/files/docs/a%20b/c%3Fd");

    let err = build_request(
        &contract,
        RequestArguments::new().path_parameter("proxy+", "docs/../../admin"),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "schema_mismatch");
}
