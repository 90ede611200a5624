//! US Core Birth Sex extension.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition-us-core-birthsex.html
//!
//! A singleton coded extension on Patient: set replaces any existing value,
//! reads are soft. The value is stored as a bare FHIR `code` (`valueCode`),
//! not a full coding.

use fhir::{ExtensionHost, ExtensionValue, Patient};

use crate::{UsCoreError, UsCoreResult};

/// Official extension URL for the US Core Birth Sex extension.
pub const EXTENSION_URL: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-birthsex";

/// Codes for assigning sex at birth as specified by the Office of the
/// National Coordinator for Health IT (ONC).
/// http://hl7.org/fhir/us/core/ValueSet-birthsex.html
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BirthSex {
    /// F: Female
    Female,
    /// M: Male
    Male,
    /// UNK: a proper value is applicable, but not known
    Unknown,
}

/// Registered enum-to-code mappings. Lookups go through this table so a
/// missing registration fails loudly instead of being coerced.
const BIRTH_SEX_CODES: &[(BirthSex, &str)] = &[
    (BirthSex::Female, "F"),
    (BirthSex::Male, "M"),
    (BirthSex::Unknown, "UNK"),
];

fn code_for(value: BirthSex) -> UsCoreResult<&'static str> {
    BIRTH_SEX_CODES
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, code)| *code)
        .ok_or(UsCoreError::UnmappedValue {
            domain: "birth sex",
            value: format!("{value:?}"),
        })
}

fn value_for(code: &str) -> Option<BirthSex> {
    BIRTH_SEX_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(v, _)| *v)
}

/// Set the US Core Birth Sex on a patient, replacing any existing value.
///
/// # Errors
///
/// Returns [`UsCoreError::UnmappedValue`] if the value has no registered code.
pub fn set_birth_sex(patient: &mut Patient, value: BirthSex) -> UsCoreResult<()> {
    let code = code_for(value)?;
    patient.set_extension(EXTENSION_URL, ExtensionValue::Code(code.to_string()));
    Ok(())
}

/// Read the US Core Birth Sex from a patient.
///
/// Soft read: `None` when the extension is absent, holds no code value, or
/// holds a code outside the registered table.
pub fn birth_sex(patient: &Patient) -> Option<BirthSex> {
    patient
        .extension(EXTENSION_URL)?
        .as_code()
        .and_then(value_for)
}

/// Remove any US Core Birth Sex extension from a patient.
pub fn clear_birth_sex(patient: &mut Patient) {
    patient.remove_extension(EXTENSION_URL);
}
