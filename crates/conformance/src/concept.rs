//! Coded-value containment predicates.
//!
//! Shared by the profile validators: "this field must contain a coding from
//! system S with code C". Absent, empty, or coding-free inputs simply fail
//! the predicate; they never panic.

use fhir::CodeableConcept;

/// Whether a single concept contains a coding matching (system, code) exactly.
pub fn concept_contains(concept: Option<&CodeableConcept>, system: &str, code: &str) -> bool {
    concept.is_some_and(|c| c.contains(system, code))
}

/// Whether any concept in a list contains a coding matching (system, code).
pub fn concept_list_contains(concepts: &[CodeableConcept], system: &str, code: &str) -> bool {
    concepts.iter().any(|c| c.contains(system, code))
}

/// Failure message naming the missing system#code pair.
pub fn must_contain_message(field: &str, system: &str, code: &str) -> String {
    format!("{field} must contain a CodeableConcept with a code matching: {system}#{code}.")
}
