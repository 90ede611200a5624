//! US Core Vital Signs profile.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition/us-core-vital-signs.html

use fhir::{Coding, Observation, Resource};

/// The official URL for the US Core Vital Signs profile.
pub const PROFILE_URL: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-vital-signs";

/// System URL for observation categories.
pub const SYSTEM_OBSERVATION_CATEGORY: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";

/// Category code for vital signs.
pub const CATEGORY_VITAL_SIGNS: &str = "vital-signs";

/// Assert that an observation conforms to the US Core Vital Signs profile.
pub fn set_profile(observation: &mut Observation) {
    observation.assert_profile(PROFILE_URL);
}

/// Retract the US Core Vital Signs profile assertion.
pub fn clear_profile(observation: &mut Observation) {
    observation.retract_profile(PROFILE_URL);
}

/// Tag an observation with the vital-signs category, replacing any existing
/// vital-signs category concept.
pub fn set_category(observation: &mut Observation) {
    observation.set_category(Coding::new(SYSTEM_OBSERVATION_CATEGORY, CATEGORY_VITAL_SIGNS));
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::{Effective, ObservationStatus, Period, Reference};

    fn sample() -> Observation {
        Observation::new(
            ObservationStatus::Final,
            Reference::new("Patient/example"),
            Effective::Period(Period::default()),
        )
    }

    #[test]
    fn set_category_twice_tags_once() {
        let mut observation = sample();
        set_category(&mut observation);
        set_category(&mut observation);

        assert_eq!(observation.category.len(), 1);
        assert!(
            observation.category[0].contains(SYSTEM_OBSERVATION_CATEGORY, CATEGORY_VITAL_SIGNS)
        );
    }

    #[test]
    fn set_profile_is_idempotent() {
        let mut observation = sample();
        set_profile(&mut observation);
        set_profile(&mut observation);

        assert_eq!(
            observation.meta.as_ref().expect("meta").profile,
            vec![PROFILE_URL]
        );
    }
}
