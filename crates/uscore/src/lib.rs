//! US Core profile codecs.
//!
//! This crate layers US Core profile semantics on top of the base `fhir`
//! model: each module owns one profile (or one extension) and provides the
//! write-path operations for it as free functions over `&mut Patient` /
//! `&mut Observation`:
//! - `patient` — US Core Patient profile assertion
//! - `birth_sex` — the birth sex extension (singleton coded value)
//! - `race` — the race extension (multi-value categories with an
//!   unknown/concrete exclusivity policy)
//! - `vital_signs` — US Core Vital Signs profile and category
//! - `blood_pressure` — US Core Blood Pressure profile, code and components
//!
//! All operations are idempotent in-memory edits; reads are soft (absent or
//! unrecognised data is `None`, never an error). The only hard failures are
//! structural programming errors: empty required text and unregistered
//! enum-to-coding mappings.

pub mod birth_sex;
pub mod blood_pressure;
pub mod patient;
pub mod race;
pub mod vital_signs;

pub use birth_sex::BirthSex;
pub use race::OmbRaceCategory;

/// Errors returned by the US Core codecs.
#[derive(Debug, thiserror::Error)]
pub enum UsCoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no registered coding for {domain} value {value:?}")]
    UnmappedValue {
        domain: &'static str,
        value: String,
    },
}

/// Type alias for Results that can fail with a [`UsCoreError`].
pub type UsCoreResult<T> = Result<T, UsCoreError>;
