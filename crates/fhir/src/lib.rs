//! Base FHIR R4 model subset for US Core profiling.
//!
//! This crate provides **wire models** and **tree-manipulation helpers** for the
//! narrow slice of FHIR that the US Core codecs and validators operate on:
//! - typed extension trees (URI-keyed, scalar or nested children)
//! - profile assertion lists on resource metadata
//! - `Patient` and `Observation` resources with their composite components
//!
//! This crate focuses on:
//! - FHIR semantic alignment (JSON wire form, camelCase field names)
//! - serialisation/deserialisation with strict schemas where serde allows
//! - in-memory tree edits with idempotent set/clear semantics
//!
//! It deliberately does NOT model the full base schema: fields are only as
//! wide as the profiling codecs and conformance validators require.

pub mod extension;
pub mod meta;
pub mod observation;
pub mod patient;
pub mod types;

// Re-export the tree primitives and resources at the crate root
pub use extension::{Extension, ExtensionHost, ExtensionValue};
pub use meta::{Meta, Resource};
pub use observation::{Effective, Observation, ObservationComponent};
pub use patient::Patient;
pub use types::{
    AdministrativeGender, CodeableConcept, Coding, HumanName, Identifier, ObservationStatus,
    Period, Quantity, Reference,
};

/// Errors returned by the `fhir` model crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
