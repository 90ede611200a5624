//! US Core Vital Signs validator.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition/us-core-vital-signs.html

use fhir::Observation;
use uscore::vital_signs::{CATEGORY_VITAL_SIGNS, SYSTEM_OBSERVATION_CATEGORY};

use crate::concept::{concept_list_contains, must_contain_message};
use crate::rules::RuleSet;

/// Build the US Core Vital Signs rule set.
pub fn validator() -> RuleSet<Observation> {
    RuleSet::new().rule("Observation.category", |observation: &Observation| {
        let satisfied = concept_list_contains(
            &observation.category,
            SYSTEM_OBSERVATION_CATEGORY,
            CATEGORY_VITAL_SIGNS,
        );
        (!satisfied).then(|| {
            must_contain_message(
                "Observation.category",
                SYSTEM_OBSERVATION_CATEGORY,
                CATEGORY_VITAL_SIGNS,
            )
        })
    })
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
    fn categorised_observation_passes() {
        let mut observation = sample();
        uscore::vital_signs::set_category(&mut observation);

        assert!(validator().validate(&observation).is_valid());
    }

    #[test]
    fn missing_category_fails_with_pair_in_message() {
        let outcome = validator().validate(&sample());

        assert_eq!(outcome.failures().len(), 1);
        let failure = &outcome.failures()[0];
        assert_eq!(failure.field, "Observation.category");
        assert!(failure.message.contains("#vital-signs"));
    }
}
