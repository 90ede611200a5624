//! US Core Blood Pressure validator.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition-us-core-blood-pressure.html
//!
//! Embeds the vital-signs rules, then requires the blood-pressure panel code
//! and one component per required kind (systolic, diastolic), each evaluated
//! independently.

use fhir::Observation;
use uscore::blood_pressure::{
    LOINC_BLOOD_PRESSURE_PANEL, LOINC_DIASTOLIC, LOINC_SYSTOLIC, SYSTEM_LOINC,
};

use crate::concept::{concept_contains, must_contain_message};
use crate::rules::RuleSet;
use crate::vital_signs;

fn has_component(observation: &Observation, code: &str) -> bool {
    observation
        .component
        .iter()
        .any(|component| component.code.contains(SYSTEM_LOINC, code))
}

fn component_rule(code: &'static str) -> impl Fn(&Observation) -> Option<String> + Send + Sync {
    move |observation| {
        (!has_component(observation, code)).then(|| {
            format!("US Core Blood Pressure requires a component: {SYSTEM_LOINC}#{code}")
        })
    }
}

/// Build the US Core Blood Pressure rule set.
pub fn validator() -> RuleSet<Observation> {
    RuleSet::new()
        .embed(vital_signs::validator())
        .rule("Observation.code", |observation: &Observation| {
            let satisfied = concept_contains(
                observation.code.as_ref(),
                SYSTEM_LOINC,
                LOINC_BLOOD_PRESSURE_PANEL,
            );
            (!satisfied).then(|| {
                must_contain_message("Observation.code", SYSTEM_LOINC, LOINC_BLOOD_PRESSURE_PANEL)
            })
        })
        .rule("Observation.component", component_rule(LOINC_SYSTOLIC))
        .rule("Observation.component", component_rule(LOINC_DIASTOLIC))
}
