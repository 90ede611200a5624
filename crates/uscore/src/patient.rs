//! US Core Patient profile assertion.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition-us-core-patient.html

use fhir::{Patient, Resource};

/// The official URL for the US Core Patient profile.
pub const PROFILE_URL: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-patient";

/// Assert that a patient conforms to the US Core Patient profile. Idempotent.
pub fn set_profile(patient: &mut Patient) {
    patient.assert_profile(PROFILE_URL);
}

/// Retract the US Core Patient profile assertion. Idempotent.
pub fn clear_profile(patient: &mut Patient) {
    patient.retract_profile(PROFILE_URL);
}
