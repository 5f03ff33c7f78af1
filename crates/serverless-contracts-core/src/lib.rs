// crates/serverless-contracts-core/src/lib.rs
// ============================================================================
// Module: Serverless Contracts Core Library
// Description: Public API surface for the contract definition and derivation engine.
// Purpose: Expose the contract model, derivations, validation, and audit types.
// Dependencies: crate::{audit, contract, http, serverless, template, trigger, validation}
// ============================================================================

//! ## Overview
//! Serverless Contracts core defines the immutable [`ApiGatewayContract`] that
//! binds a route, an HTTP method, and the input/output schemas of one
//! HTTP-triggered function. Every other view of the endpoint (trigger
//! descriptors, aggregate input schemas, parsed invocation events, outbound
//! request descriptors) is derived from that single value by pure functions.
//! Invariants:
//! - Contracts are immutable after construction and safe to share across threads.
//! - An absent schema means the channel does not exist; it never defaults to `{}`.
//! - Derivations are deterministic and never cached.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod contract;
pub mod http;
pub mod serverless;
pub mod template;
pub mod trigger;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditEvent;
pub use audit::AuditEventParams;
pub use audit::AuditOutcome;
pub use audit::AuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use audit::WriterAuditSink;
pub use contract::ApiGatewayContract;
pub use contract::ApiGatewayContractBuilder;
pub use contract::ApiGatewayContractSpec;
pub use contract::ContractError;
pub use contract::InputChannel;
pub use contract::compose_input_schema;
pub use http::AuthorizerType;
pub use http::HttpMethod;
pub use http::IntegrationType;
pub use serverless::CloudFormationContract;
pub use serverless::CloudFormationContractSpec;
pub use serverless::ContractType;
pub use serverless::EventContract;
pub use serverless::EventContractSpec;
pub use serverless::ServerlessContract;
pub use template::TemplateError;
pub use template::fill_path_template;
pub use template::path_template_placeholders;
pub use trigger::TriggerDescriptor;
pub use trigger::TriggerKind;
pub use trigger::get_complete_trigger;
pub use trigger::get_trigger;
pub use validation::JsonSchemaValidator;
pub use validation::SchemaValidator;
pub use validation::ValidationError;
pub use validation::ValidationMode;
pub use validation::ValidationSettings;
