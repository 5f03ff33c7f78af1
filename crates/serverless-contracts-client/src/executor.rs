// crates/serverless-contracts-client/src/executor.rs
// ============================================================================
// Module: Request Executor
// Description: Sends contract requests and decodes typed responses.
// Purpose: Issue exactly one transport call per request with matching typing.
// Dependencies: serde, serde_json, serverless-contracts-core
// ============================================================================

//! ## Overview
//! [`execute`] builds the descriptor, sends it once, rejects non-2xx
//! statuses, and decodes the body into the caller's output type.
//! [`ContractClient`] adds a validation policy and an audit sink on top.
//! Invariants:
//! - Without an output schema, or with an empty body, the output is decoded
//!   from JSON `null`.
//! - Enforced validation runs on arguments before the call and on the
//!   decoded body after it, including the `null` read from an empty body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::AuditEvent;
use serverless_contracts_core::AuditEventParams;
use serverless_contracts_core::AuditOutcome;
use serverless_contracts_core::AuditSink;
use serverless_contracts_core::NoopAuditSink;
use serverless_contracts_core::ValidationMode;
use serverless_contracts_core::ValidationSettings;

use crate::error::ClientError;
use crate::request::RequestArguments;
use crate::request::build_request;
use crate::transport::Transport;
use crate::transport::TransportResponse;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Typed response of a contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractResponse<O> {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// Decoded body.
    pub body: O,
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Executes one contract call without validation.
///
/// # Errors
///
/// Returns [`ClientError`] when building, sending, or decoding fails, or
/// when the endpoint answers with a non-2xx status.
pub async fn execute<O: DeserializeOwned>(
    contract: &ApiGatewayContract,
    transport: &dyn Transport,
    args: RequestArguments,
) -> Result<ContractResponse<O>, ClientError> {
    execute_with(contract, transport, &ValidationSettings::off(), args).await
}

/// Executes one contract call under a validation policy.
///
/// # Errors
///
/// Returns [`ClientError`] when building, validating, sending, or decoding
/// fails, or when the endpoint answers with a non-2xx status.
pub async fn execute_with<O: DeserializeOwned>(
    contract: &ApiGatewayContract,
    transport: &dyn Transport,
    validation: &ValidationSettings,
    args: RequestArguments,
) -> Result<ContractResponse<O>, ClientError> {
    if validation.mode() == ValidationMode::Enforce {
        validation.check_input("input", &contract.input_schema(), &args.input_value())?;
    }
    let request = build_request(contract, args)?;
    let response = transport.send(&request).await?;
    decode_response(contract, validation, response)
}

/// Checks the status and decodes the body.
fn decode_response<O: DeserializeOwned>(
    contract: &ApiGatewayContract,
    validation: &ValidationSettings,
    response: TransportResponse,
) -> Result<ContractResponse<O>, ClientError> {
    let TransportResponse {
        status,
        headers,
        body,
    } = response;
    if !(200..300).contains(&status) {
        return Err(ClientError::UnexpectedStatus {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    let value = match contract.output_schema() {
        Some(_) if !body.is_empty() => serde_json::from_slice(&body)
            .map_err(|err| ClientError::ResponseDecode(err.to_string()))?,
        _ => Value::Null,
    };
    validation.check_output("output", contract.output_schema(), &value)?;
    let body =
        serde_json::from_value(value).map_err(|err| ClientError::ResponseDecode(err.to_string()))?;
    Ok(ContractResponse {
        status,
        headers,
        body,
    })
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Contract client bundling a transport, validation policy, and audit sink.
#[derive(Clone)]
pub struct ContractClient {
    /// Injected transport.
    transport: Arc<dyn Transport>,
    /// Validation policy.
    validation: ValidationSettings,
    /// Audit sink for request records.
    audit: Arc<dyn AuditSink>,
}

impl ContractClient {
    /// Creates a client with validation off and no audit sink.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            validation: ValidationSettings::off(),
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the validation policy.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationSettings) -> Self {
        self.validation = validation;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the validation policy.
    #[must_use]
    pub const fn validation(&self) -> &ValidationSettings {
        &self.validation
    }

    /// Executes one contract call and records its outcome.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`execute_with`].
    pub async fn execute<O: DeserializeOwned>(
        &self,
        contract: &ApiGatewayContract,
        args: RequestArguments,
    ) -> Result<ContractResponse<O>, ClientError> {
        let body_present = args.body.is_some();
        let result = execute_with(contract, self.transport.as_ref(), &self.validation, args).await;
        let (outcome, error_kind, status_code) = match &result {
            Ok(response) => (AuditOutcome::Ok, None, Some(response.status)),
            Err(ClientError::UnexpectedStatus {
                status, ..
            }) => (AuditOutcome::Error, Some("unexpected_status"), Some(*status)),
            Err(err) => (AuditOutcome::Error, Some(err.kind()), None),
        };
        self.audit.record(&AuditEvent::request(AuditEventParams {
            contract_id: contract.id().to_string(),
            method: contract.method(),
            path: contract.path().to_string(),
            outcome,
            error_kind,
            status_code,
            body_present,
        }));
        result
    }
}
