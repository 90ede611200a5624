//! Shared FHIR data types.
//!
//! Wire representations of the FHIR data types used across the `Patient` and
//! `Observation` resources. All structs serialise to the FHIR JSON form
//! (camelCase field names, absent optionals omitted).

use serde::{Deserialize, Serialize};

/// A reference to a code defined by a terminology system.
///
/// Immutable once constructed; codecs compare codings by exact string
/// equality on `(system, code)`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Coding {
    /// Identity of the terminology system (canonical URI or OID URN).
    pub system: String,

    /// Symbol in the system's syntax.
    pub code: String,

    /// Human-readable representation defined by the system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    /// Create a coding without display text.
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Coding {
            system: system.into(),
            code: code.into(),
            display: None,
        }
    }

    /// Create a coding with display text.
    pub fn with_display(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Coding {
            system: system.into(),
            code: code.into(),
            display: Some(display.into()),
        }
    }

    /// Exact match on both system and code.
    pub fn matches(&self, system: &str, code: &str) -> bool {
        self.system == system && self.code == code
    }
}

/// A concept, potentially represented by one or more codings plus free text.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Create a concept carrying a single coding.
    pub fn from_coding(coding: Coding) -> Self {
        CodeableConcept {
            coding: vec![coding],
            text: None,
        }
    }

    /// Whether any coding matches the given system and code exactly.
    pub fn contains(&self, system: &str, code: &str) -> bool {
        self.coding.iter().any(|c| c.matches(system, code))
    }
}

impl From<Coding> for CodeableConcept {
    fn from(coding: Coding) -> Self {
        CodeableConcept::from_coding(coding)
    }
}

/// A measured amount with a unit.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Quantity {
    pub value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Quantity {
    /// Create a quantity with a unit.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Quantity {
            value,
            unit: Some(unit.into()),
        }
    }
}

/// An identifier intended for computation (e.g. an MRN).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Identifier {
    /// Create an identifier with both a system and a value.
    pub fn new(system: impl Into<String>, value: impl Into<String>) -> Self {
        Identifier {
            system: Some(system.into()),
            value: Some(value.into()),
        }
    }
}

/// A human name, with URI-keyed extensions (used for data-absent-reason).
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HumanName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<crate::Extension>,
}

/// A literal reference from one resource to another.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Reference {
    pub reference: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Create a reference from a relative or absolute literal (e.g. `Patient/abc`).
    pub fn new(reference: impl Into<String>) -> Self {
        Reference {
            reference: reference.into(),
            display: None,
        }
    }
}

/// Administrative gender codes.
/// http://hl7.org/fhir/valueset-administrative-gender.html
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

/// Observation status codes.
/// http://hl7.org/fhir/valueset-observation-status.html
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
}

/// A time range with inclusive boundaries.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<chrono::DateTime<chrono::Utc>>,
}
