// crates/serverless-contracts-server/src/handler.rs
// ============================================================================
// Module: Handler Wrapping
// Description: Adapters binding business handlers to a contract.
// Purpose: Run the decode, validate, dispatch, and encode steps of an invocation.
// Dependencies: async-trait, serde, serde_json, serverless-contracts-core
// ============================================================================

//! ## Overview
//! [`wrap_bare_handler`] exposes `ParsedEvent -> Output` for unit tests of
//! business logic. [`wrap_handler`] builds on it to expose
//! `RawEvent -> WireResponse` for the platform dispatcher and records one
//! audit event per invocation.
//! Invariants:
//! - Input is validated before the handler runs; output before encoding.
//! - Handler errors are returned as [`ServerError::Handler`] and never mapped to a status.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::AuditEvent;
use serverless_contracts_core::AuditEventParams;
use serverless_contracts_core::AuditOutcome;
use serverless_contracts_core::AuditSink;
use serverless_contracts_core::NoopAuditSink;
use serverless_contracts_core::ValidationMode;
use serverless_contracts_core::ValidationSettings;

use crate::error::BoxError;
use crate::error::ServerError;
use crate::event::ParsedEvent;
use crate::event::RawEvent;
use crate::event::decode_event;
use crate::response::WireResponse;
use crate::response::encode_response;

// ============================================================================
// SECTION: Handler Trait
// ============================================================================

/// Business logic bound to a contract.
#[async_trait]
pub trait ContractHandler: Send + Sync {
    /// Output value, shaped by the contract's output schema.
    type Output: Serialize + Send;

    /// Handles one parsed invocation.
    ///
    /// # Errors
    ///
    /// Returns the handler's own error, which the adapter propagates unchanged.
    async fn handle(&self, event: ParsedEvent) -> Result<Self::Output, BoxError>;
}

#[async_trait]
impl<F, Fut, O, E> ContractHandler for F
where
    F: Fn(ParsedEvent) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
    O: Serialize + Send + 'static,
    E: Into<BoxError> + 'static,
{
    type Output = O;

    async fn handle(&self, event: ParsedEvent) -> Result<O, BoxError> {
        (self)(event).await.map_err(Into::into)
    }
}

// ============================================================================
// SECTION: Bare Handler
// ============================================================================

/// Handler bound to a contract, taking parsed events.
pub struct BareHandler<H> {
    /// Contract driving validation.
    contract: Arc<ApiGatewayContract>,
    /// Business handler.
    handler: H,
    /// Validation policy.
    validation: ValidationSettings,
}

impl<H: ContractHandler> BareHandler<H> {
    /// Replaces the validation policy.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationSettings) -> Self {
        self.validation = validation;
        self
    }

    /// Returns the bound contract.
    #[must_use]
    pub fn contract(&self) -> &ApiGatewayContract {
        &self.contract
    }

    /// Returns the validation policy.
    #[must_use]
    pub const fn validation(&self) -> &ValidationSettings {
        &self.validation
    }

    /// Validates the event (when enforcing) and runs the handler.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Validation`] when enforced input validation fails
    /// and [`ServerError::Handler`] when the handler fails.
    pub async fn call(&self, event: ParsedEvent) -> Result<H::Output, ServerError> {
        if self.validation.mode() == ValidationMode::Enforce {
            self.validation.check_input(
                "input",
                &self.contract.input_schema(),
                &event.input_value(),
            )?;
        }
        self.handler.handle(event).await.map_err(ServerError::Handler)
    }
}

/// Binds `handler` to `contract`, exposing `ParsedEvent -> Output`.
pub fn wrap_bare_handler<H: ContractHandler>(
    contract: impl Into<Arc<ApiGatewayContract>>,
    handler: H,
) -> BareHandler<H> {
    BareHandler {
        contract: contract.into(),
        handler,
        validation: ValidationSettings::default(),
    }
}

// ============================================================================
// SECTION: Lambda Handler
// ============================================================================

/// Handler bound to a contract, taking wire-level events.
pub struct LambdaHandler<H> {
    /// Parsed-event adapter.
    bare: BareHandler<H>,
    /// Audit sink for invocation records.
    audit: Arc<dyn AuditSink>,
}

impl<H: ContractHandler> LambdaHandler<H> {
    /// Replaces the validation policy.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationSettings) -> Self {
        self.bare = self.bare.with_validation(validation);
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit_sink(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the parsed-event adapter.
    #[must_use]
    pub const fn bare(&self) -> &BareHandler<H> {
        &self.bare
    }

    /// Handles one wire-level invocation.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when decoding, validation, the handler, or
    /// encoding fails.
    pub async fn invoke(&self, raw: RawEvent) -> Result<WireResponse, ServerError> {
        let body_present = raw.body.is_some();
        let result = self.run(raw).await;
        self.record(body_present, &result);
        result
    }

    /// Handles one invocation given as its JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidEvent`] when the envelope shape is wrong,
    /// and otherwise the errors of [`LambdaHandler::invoke`].
    pub async fn invoke_value(&self, raw: Value) -> Result<Value, ServerError> {
        let raw = RawEvent::from_value(raw)?;
        let response = self.invoke(raw).await?;
        serde_json::to_value(response).map_err(|err| ServerError::Encode(err.to_string()))
    }

    /// Runs decode, dispatch, and encode.
    async fn run(&self, raw: RawEvent) -> Result<WireResponse, ServerError> {
        let contract = self.bare.contract();
        let event = decode_event(contract, raw)?;
        let output = self.bare.call(event).await?;
        encode_response(contract, self.bare.validation(), &output)
    }

    /// Records the invocation outcome.
    fn record(&self, body_present: bool, result: &Result<WireResponse, ServerError>) {
        let contract = self.bare.contract();
        let (outcome, error_kind, status_code) = match result {
            Ok(response) => (AuditOutcome::Ok, None, Some(response.status_code)),
            Err(err) => (AuditOutcome::Error, Some(err.kind()), None),
        };
        self.audit.record(&AuditEvent::invocation(AuditEventParams {
            contract_id: contract.id().to_string(),
            method: contract.method(),
            path: contract.path().to_string(),
            outcome,
            error_kind,
            status_code,
            body_present,
        }));
    }
}

/// Binds `handler` to `contract`, exposing `RawEvent -> WireResponse`.
pub fn wrap_handler<H: ContractHandler>(
    contract: impl Into<Arc<ApiGatewayContract>>,
    handler: H,
) -> LambdaHandler<H> {
    LambdaHandler {
        bare: wrap_bare_handler(contract, handler),
        audit: Arc::new(NoopAuditSink),
    }
}
