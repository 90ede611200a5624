//! Declarative conformance validation for US Core profiles.
//!
//! A small rule engine: a validator is an ordered list of per-field rules,
//! each pairing a field name with a predicate that yields a message on
//! failure. Running a validator is a pure function from a document to an
//! [`Outcome`]; failures are data, never errors, and accumulate in rule
//! declaration order.
//!
//! Profile validators:
//! - `patient` — US Core Patient (identifier, us-core-8 names, gender)
//! - `vital_signs` — US Core Vital Signs (category tag)
//! - `blood_pressure` — US Core Blood Pressure (embeds vital signs; panel
//!   code plus systolic and diastolic component presence)

pub mod blood_pressure;
pub mod concept;
pub mod patient;
pub mod rules;
pub mod vital_signs;

pub use rules::{Failure, Outcome, Rule, RuleSet};
