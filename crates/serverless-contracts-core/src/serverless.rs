// crates/serverless-contracts-core/src/serverless.rs
// ============================================================================
// Module: Contract Union
// Description: Tagged union over every contract kind of a deployment unit.
// Purpose: Register heterogeneous contracts through one serializable type.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`ServerlessContract`] is a closed, internally tagged enum keyed by
//! `contractType`. Each member carries its own schema logic; the union only
//! exposes the shared identity surface.
//! Invariants:
//! - Contract identifiers are non-empty; deserialization runs the same
//!   checks as the constructors.
//! - The discriminator is derived from the variant, never stored separately.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::contract::ApiGatewayContract;
use crate::contract::ContractError;
use crate::validation::SchemaValidator;
use crate::validation::ValidationError;

// ============================================================================
// SECTION: Discriminator
// ============================================================================

/// Contract kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractType {
    /// HTTP-triggered function contract.
    ApiGatewayContract,
    /// Exported stack output reference.
    CloudFormation,
    /// Event payload contract.
    Event,
}

impl ContractType {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiGatewayContract => "apiGatewayContract",
            Self::CloudFormation => "cloudFormation",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: CloudFormation Contract
// ============================================================================

/// Serialized form of a [`CloudFormationContract`], prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFormationContractSpec {
    /// Contract identifier.
    pub id: String,
    /// Export name.
    pub name: String,
}

/// Reference to a value exported by another stack.
///
/// # Invariants
/// - `id` and `name` are non-blank, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CloudFormationContractSpec")]
pub struct CloudFormationContract {
    /// Contract identifier.
    id: String,
    /// Export name.
    name: String,
}

impl CloudFormationContract {
    /// Creates a stack output reference.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidContract`] when `id` or `name` is blank.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ContractError> {
        let id = id.into();
        let name = name.into();
        require_identifier(&id)?;
        if name.trim().is_empty() {
            return Err(ContractError::InvalidContract(format!(
                "contract {id}: export name must not be empty"
            )));
        }
        Ok(Self {
            id,
            name,
        })
    }

    /// Returns the contract identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the export name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `Fn::ImportValue` intrinsic resolving the export.
    #[must_use]
    pub fn import_value(&self) -> Value {
        let mut intrinsic = Map::new();
        intrinsic.insert("Fn::ImportValue".to_string(), Value::String(self.name.clone()));
        Value::Object(intrinsic)
    }
}

impl TryFrom<CloudFormationContractSpec> for CloudFormationContract {
    type Error = ContractError;

    fn try_from(spec: CloudFormationContractSpec) -> Result<Self, Self::Error> {
        Self::new(spec.id, spec.name)
    }
}

// ============================================================================
// SECTION: Event Contract
// ============================================================================

/// Serialized form of an [`EventContract`], prior to validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContractSpec {
    /// Contract identifier.
    pub id: String,
    /// Payload JSON schema.
    pub payload_schema: Value,
}

/// Contract for an asynchronous event payload.
///
/// # Invariants
/// - `id` is non-blank and the payload schema is an object or boolean,
///   including when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventContractSpec")]
pub struct EventContract {
    /// Contract identifier.
    id: String,
    /// Payload JSON schema.
    payload_schema: Value,
}

impl EventContract {
    /// Creates an event contract.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidContract`] when `id` is blank or the
    /// payload schema is neither an object nor a boolean.
    pub fn new(id: impl Into<String>, payload_schema: Value) -> Result<Self, ContractError> {
        let id = id.into();
        require_identifier(&id)?;
        if !(payload_schema.is_object() || payload_schema.is_boolean()) {
            return Err(ContractError::InvalidContract(format!(
                "contract {id}: payloadSchema must be an object or boolean schema"
            )));
        }
        Ok(Self {
            id,
            payload_schema,
        })
    }

    /// Returns the contract identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the payload schema.
    #[must_use]
    pub const fn payload_schema(&self) -> &Value {
        &self.payload_schema
    }

    /// Validates a payload against the payload schema.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the payload does not conform.
    pub fn validate_payload(
        &self,
        validator: &dyn SchemaValidator,
        payload: &Value,
    ) -> Result<(), ValidationError> {
        validator.validate("payload", &self.payload_schema, payload)
    }
}

impl TryFrom<EventContractSpec> for EventContract {
    type Error = ContractError;

    fn try_from(spec: EventContractSpec) -> Result<Self, Self::Error> {
        Self::new(spec.id, spec.payload_schema)
    }
}

// ============================================================================
// SECTION: Union
// ============================================================================

/// Every contract kind of a deployment unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "contractType")]
pub enum ServerlessContract {
    /// HTTP-triggered function contract.
    #[serde(rename = "apiGatewayContract")]
    ApiGateway(ApiGatewayContract),
    /// Exported stack output reference.
    #[serde(rename = "cloudFormation")]
    CloudFormation(CloudFormationContract),
    /// Event payload contract.
    #[serde(rename = "event")]
    Event(EventContract),
}

impl ServerlessContract {
    /// Returns the contract identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::ApiGateway(contract) => contract.id(),
            Self::CloudFormation(contract) => contract.id(),
            Self::Event(contract) => contract.id(),
        }
    }

    /// Returns the contract kind discriminator.
    #[must_use]
    pub const fn contract_type(&self) -> ContractType {
        match self {
            Self::ApiGateway(_) => ContractType::ApiGatewayContract,
            Self::CloudFormation(_) => ContractType::CloudFormation,
            Self::Event(_) => ContractType::Event,
        }
    }

    /// Returns the HTTP contract when this is one.
    #[must_use]
    pub const fn as_api_gateway(&self) -> Option<&ApiGatewayContract> {
        match self {
            Self::ApiGateway(contract) => Some(contract),
            Self::CloudFormation(_) | Self::Event(_) => None,
        }
    }
}

impl From<ApiGatewayContract> for ServerlessContract {
    fn from(contract: ApiGatewayContract) -> Self {
        Self::ApiGateway(contract)
    }
}

impl From<CloudFormationContract> for ServerlessContract {
    fn from(contract: CloudFormationContract) -> Self {
        Self::CloudFormation(contract)
    }
}

impl From<EventContract> for ServerlessContract {
    fn from(contract: EventContract) -> Self {
        Self::Event(contract)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects blank contract identifiers.
fn require_identifier(id: &str) -> Result<(), ContractError> {
    if id.trim().is_empty() {
        return Err(ContractError::InvalidContract("contract id must not be empty".to_string()));
    }
    Ok(())
}
