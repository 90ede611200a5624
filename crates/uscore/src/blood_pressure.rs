//! US Core Blood Pressure profile.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition-us-core-blood-pressure.html
//!
//! A two-component vital-sign measurement: systolic and diastolic values in
//! mm[Hg], each identified by its LOINC code with replace-by-kind semantics.

use fhir::{
    CodeableConcept, Coding, Effective, Observation, ObservationStatus, Quantity, Reference,
    Resource,
};

use crate::vital_signs;

/// The official URL for the US Core Blood Pressure profile.
pub const PROFILE_URL: &str =
    "http://hl7.org/fhir/us/core/StructureDefinition/us-core-blood-pressure";

/// System URL for LOINC.
pub const SYSTEM_LOINC: &str = "http://loinc.org";

/// Blood pressure panel with all children optional.
/// https://loinc.org/85354-9/
pub const LOINC_BLOOD_PRESSURE_PANEL: &str = "85354-9";

/// Systolic blood pressure.
pub const LOINC_SYSTOLIC: &str = "8480-6";

/// Diastolic blood pressure.
pub const LOINC_DIASTOLIC: &str = "8462-4";

/// UCUM unit for blood pressure values.
pub const UNIT_MM_HG: &str = "mm[Hg]";

/// Assert that an observation conforms to the US Core Blood Pressure profile.
pub fn set_profile(observation: &mut Observation) {
    observation.assert_profile(PROFILE_URL);
}

/// Retract the US Core Blood Pressure profile assertion.
pub fn clear_profile(observation: &mut Observation) {
    observation.retract_profile(PROFILE_URL);
}

/// Set the required blood-pressure panel code on an observation.
pub fn set_code(observation: &mut Observation) {
    observation.code = Some(CodeableConcept::from_coding(Coding::new(
        SYSTEM_LOINC,
        LOINC_BLOOD_PRESSURE_PANEL,
    )));
}

/// Add or update the systolic component, replacing any existing one.
pub fn set_systolic(observation: &mut Observation, value: f64) {
    observation.set_component(
        Coding::new(SYSTEM_LOINC, LOINC_SYSTOLIC),
        Quantity::new(value, UNIT_MM_HG),
    );
}

/// Remove all systolic components.
pub fn clear_systolic(observation: &mut Observation) {
    observation.clear_components(SYSTEM_LOINC, LOINC_SYSTOLIC);
}

/// Add or update the diastolic component, replacing any existing one.
pub fn set_diastolic(observation: &mut Observation, value: f64) {
    observation.set_component(
        Coding::new(SYSTEM_LOINC, LOINC_DIASTOLIC),
        Quantity::new(value, UNIT_MM_HG),
    );
}

/// Remove all diastolic components.
pub fn clear_diastolic(observation: &mut Observation) {
    observation.clear_components(SYSTEM_LOINC, LOINC_DIASTOLIC);
}

/// Create a new, conformant US Core Blood Pressure observation.
///
/// Composes base fields, the broad vital-signs profile and category, the
/// specific blood-pressure profile and code, then both components. The order
/// only affects the readability of the resulting structure; every step is
/// idempotent.
pub fn create(
    status: ObservationStatus,
    subject: Reference,
    effective: Effective,
    systolic: f64,
    diastolic: f64,
) -> Observation {
    let mut observation = Observation::new(status, subject, effective);

    vital_signs::set_profile(&mut observation);
    vital_signs::set_category(&mut observation);

    set_profile(&mut observation);
    set_code(&mut observation);
    set_systolic(&mut observation, systolic);
    set_diastolic(&mut observation, diastolic);

    observation
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample() -> Observation {
        Observation::new(
            ObservationStatus::Final,
            Reference::new("Patient/example"),
            Effective::DateTime(Utc.with_ymd_and_hms(2026, 1, 11, 14, 35, 22).unwrap()),
        )
    }

    #[test]
    fn set_systolic_replaces_by_kind() {
        let mut observation = sample();
        set_systolic(&mut observation, 100.0);
        set_systolic(&mut observation, 120.0);

        assert_eq!(observation.component.len(), 1);
        let systolic = observation
            .component(SYSTEM_LOINC, LOINC_SYSTOLIC)
            .expect("systolic component");
        assert_eq!(systolic.value.as_ref().expect("value").value, 120.0);
    }

    #[test]
    fn clear_diastolic_leaves_systolic_alone() {
        let mut observation = sample();
        set_systolic(&mut observation, 100.0);
        set_diastolic(&mut observation, 70.0);

        clear_diastolic(&mut observation);

        assert!(observation.component(SYSTEM_LOINC, LOINC_DIASTOLIC).is_none());
        assert!(observation.component(SYSTEM_LOINC, LOINC_SYSTOLIC).is_some());
    }

    #[test]
    fn create_composes_profiles_code_and_components() {
        let observation = create(
            ObservationStatus::Final,
            Reference::new("Patient/example"),
            Effective::DateTime(Utc.with_ymd_and_hms(2026, 1, 11, 14, 35, 22).unwrap()),
            100.0,
            70.0,
        );

        assert!(observation.has_profile(vital_signs::PROFILE_URL));
        assert!(observation.has_profile(PROFILE_URL));
        assert!(observation.category[0].contains(
            vital_signs::SYSTEM_OBSERVATION_CATEGORY,
            vital_signs::CATEGORY_VITAL_SIGNS
        ));
        assert!(observation
            .code
            .as_ref()
            .expect("code")
            .contains(SYSTEM_LOINC, LOINC_BLOOD_PRESSURE_PANEL));

        let systolic = observation
            .component(SYSTEM_LOINC, LOINC_SYSTOLIC)
            .expect("systolic");
        assert_eq!(systolic.value.as_ref().expect("value").value, 100.0);
        let diastolic = observation
            .component(SYSTEM_LOINC, LOINC_DIASTOLIC)
            .expect("diastolic");
        assert_eq!(diastolic.value.as_ref().expect("value").value, 70.0);
        assert_eq!(
            diastolic.value.as_ref().expect("value").unit.as_deref(),
            Some(UNIT_MM_HG)
        );
    }
}
