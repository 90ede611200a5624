//! US Core Patient validator.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition-us-core-patient.html
//!
//! Rules:
//! - at least one identifier carrying both a system and a value (an empty
//!   list fails the same rule, so dependent checks never run on nothing)
//! - at least one name satisfying the us-core-8 invariant, and all names
//!   satisfying it — evaluated and reported independently
//! - gender present

use fhir::{ExtensionHost, HumanName, Patient};

use crate::rules::RuleSet;

/// Canonical URL for the Data Absent Reason extension.
/// http://www.hl7.org/fhir/valueset-data-absent-reason.html
pub const URL_DATA_ABSENT_REASON: &str = "http://hl7.org/fhir/StructureDefinition/data-absent-reason";

/// The us-core-8 invariant: a name needs a family, a given, or a
/// data-absent-reason extension.
pub fn passes_us_core_8(name: &HumanName) -> bool {
    if name.family.as_deref().is_some_and(|family| !family.is_empty()) {
        return true;
    }

    if name.given.iter().any(|given| !given.is_empty()) {
        return true;
    }

    name.has_extension(URL_DATA_ABSENT_REASON)
}

/// Build the US Core Patient rule set.
pub fn validator() -> RuleSet<Patient> {
    RuleSet::new()
        .rule("Patient.identifier", |patient: &Patient| {
            let satisfied = patient.identifier.iter().any(|id| {
                id.system.as_deref().is_some_and(|s| !s.is_empty())
                    && id.value.as_deref().is_some_and(|v| !v.is_empty())
            });
            (!satisfied).then(|| {
                "Patient.identifier requires one element with both a system and a value."
                    .to_string()
            })
        })
        .rule("Patient.name", |patient: &Patient| {
            let satisfied = patient.name.iter().any(passes_us_core_8);
            (!satisfied).then(|| {
                "Patient.name requires one name with a family, given, or Data Absent Reason."
                    .to_string()
            })
        })
        .rule("Patient.name", |patient: &Patient| {
            // vacuously true on an empty list; the at-least-one rule above
            // reports that case
            let satisfied = patient.name.iter().all(passes_us_core_8);
            (!satisfied).then(|| {
                "Patient.name requires all names have a family, given, or Data Absent Reason."
                    .to_string()
            })
        })
        .rule("Patient.gender", |patient: &Patient| {
            patient
                .gender
                .is_none()
                .then(|| "Patient.gender is required.".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhir::{AdministrativeGender, ExtensionValue, Identifier};

    fn valid_patient() -> Patient {
        let mut patient = Patient::new();
        patient
            .identifier
            .push(Identifier::new("http://example.org/mrn", "ABC123"));
        patient.name.push(HumanName {
            given: vec!["Test".into()],
            ..HumanName::default()
        });
        patient.gender = Some(AdministrativeGender::Unknown);
        patient
    }

    #[test]
    fn conformant_patient_passes() {
        let outcome = validator().validate(&valid_patient());
        assert!(outcome.is_valid(), "failures: {:?}", outcome.failures());
    }

    #[test]
    fn empty_identifier_list_fails_only_the_identifier_rule() {
        let mut patient = valid_patient();
        patient.identifier.clear();

        let outcome = validator().validate(&patient);

        assert_eq!(outcome.failures().len(), 1);
        let failure = &outcome.failures()[0];
        assert_eq!(failure.field, "Patient.identifier");
        assert!(failure.message.contains("requires one element"));
    }

    #[test]
    fn identifier_without_value_fails() {
        let mut patient = valid_patient();
        patient.identifier = vec![Identifier {
            system: Some("http://example.org/mrn".into()),
            value: None,
        }];

        let outcome = validator().validate(&patient);
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].field, "Patient.identifier");
    }

    #[test]
    fn invalid_name_fails_both_name_rules() {
        let mut patient = valid_patient();
        // no family, no given, no data-absent-reason
        patient.name = vec![HumanName::default()];

        let outcome = validator().validate(&patient);

        let name_failures: Vec<_> = outcome
            .failures()
            .iter()
            .filter(|f| f.field == "Patient.name")
            .collect();
        assert_eq!(name_failures.len(), 2);
        assert!(name_failures[0].message.contains("requires one name"));
        assert!(name_failures[1].message.contains("requires all names"));
    }

    #[test]
    fn mixed_names_fail_only_the_all_rule() {
        let mut patient = valid_patient();
        patient.name.push(HumanName::default());

        let outcome = validator().validate(&patient);

        assert_eq!(outcome.failures().len(), 1);
        assert!(outcome.failures()[0].message.contains("requires all names"));
    }

    #[test]
    fn data_absent_reason_satisfies_us_core_8() {
        let mut name = HumanName::default();
        name.add_extension(URL_DATA_ABSENT_REASON, ExtensionValue::Code("unknown".into()));
        assert!(passes_us_core_8(&name));
    }

    #[test]
    fn empty_strings_do_not_satisfy_us_core_8() {
        let name = HumanName {
            family: Some(String::new()),
            given: vec![String::new()],
            extension: vec![],
        };
        assert!(!passes_us_core_8(&name));
    }

    #[test]
    fn missing_gender_is_reported_independently() {
        let mut patient = valid_patient();
        patient.gender = None;

        let outcome = validator().validate(&patient);
        assert_eq!(outcome.failures().len(), 1);
        assert_eq!(outcome.failures()[0].field, "Patient.gender");
    }
}
