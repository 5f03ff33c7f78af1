// crates/serverless-contracts-server/src/lib.rs
// ============================================================================
// Module: Serverless Contracts Server Library
// Description: Server-side adapter between wire invocation events and handlers.
// Purpose: Decode, validate, dispatch, and encode one invocation per call.
// Dependencies: crate::{context, error, event, handler, response}
// ============================================================================

//! ## Overview
//! Each invocation walks `RawEvent -> ParsedEvent -> handler output ->
//! WireResponse`. Every transition is driven by the same
//! [`serverless_contracts_core::ApiGatewayContract`] that produced the route's
//! trigger descriptor, so routing, parsing, and encoding cannot drift apart.
//! Invariants:
//! - Handlers receive the parsed event only.
//! - Handler failures propagate; the adapter never converts them into responses.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod context;
pub mod error;
pub mod event;
pub mod handler;
pub mod response;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::AuthorizerContext;
pub use context::RequestContext;
pub use context::decode_request_context;
pub use error::BoxError;
pub use error::ServerError;
pub use event::ParsedEvent;
pub use event::RawEvent;
pub use event::decode_event;
pub use handler::BareHandler;
pub use handler::ContractHandler;
pub use handler::LambdaHandler;
pub use handler::wrap_bare_handler;
pub use handler::wrap_handler;
pub use response::WireResponse;
pub use response::encode_response;
pub use serverless_contracts_core::get_complete_trigger;
pub use serverless_contracts_core::get_trigger;
