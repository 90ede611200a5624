//! Patient resource wire model.
//!
//! The subject record of the profiling toolkit. Only the fields the US Core
//! codecs and validators touch are modelled; everything else is rejected by
//! strict deserialisation.
//!
//! Responsibilities:
//! - Define the strict wire model for serialisation/deserialisation
//! - Host the extension tree and the profile assertion list
//! - Parse/render FHIR JSON with path-bearing error messages

use serde::{Deserialize, Serialize};

use crate::extension::{Extension, ExtensionHost};
use crate::meta::{Meta, Resource};
use crate::types::{AdministrativeGender, HumanName, Identifier};
use crate::{FhirError, FhirResult};

/// Wire representation of a FHIR Patient (subset).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Patient {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<AdministrativeGender>,

    #[serde(rename = "birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl Default for Patient {
    fn default() -> Self {
        Patient::new()
    }
}

impl Patient {
    /// Create an empty patient record.
    pub fn new() -> Self {
        Patient {
            resource_type: "Patient".to_string(),
            id: None,
            meta: None,
            extension: Vec::new(),
            identifier: Vec::new(),
            name: Vec::new(),
            gender: None,
            birth_date: None,
        }
    }

    /// Parse a patient resource from FHIR JSON text.
    ///
    /// Uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `name.0.family`) to the failing field when the JSON does not match the
    /// wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if:
    /// - the JSON does not represent a valid patient resource,
    /// - any field has an unexpected type or any unknown keys are present,
    /// - resourceType is not "Patient".
    pub fn parse(json_text: &str) -> FhirResult<Patient> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let patient = match serde_path_to_error::deserialize::<_, Patient>(&mut deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(FhirError::Translation(format!(
                    "Patient schema mismatch at {path}: {source}"
                )));
            }
        };

        if patient.resource_type != "Patient" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Patient', got '{}'",
                patient.resource_type
            )));
        }

        Ok(patient)
    }

    /// Render the patient as compact FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if serialisation fails.
    pub fn to_json(&self) -> FhirResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render the patient as pretty-printed FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if serialisation fails.
    pub fn to_json_pretty(&self) -> FhirResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ExtensionHost for Patient {
    fn extensions(&self) -> &[Extension] {
        &self.extension
    }

    fn extensions_mut(&mut self) -> &mut Vec<Extension> {
        &mut self.extension
    }
}

impl Resource for Patient {
    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn meta_mut(&mut self) -> &mut Option<Meta> {
        &mut self.meta
    }
}

impl ExtensionHost for HumanName {
    fn extensions(&self) -> &[Extension] {
        &self.extension
    }

    fn extensions_mut(&mut self) -> &mut Vec<Extension> {
        &mut self.extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionValue;

    #[test]
    fn round_trips_sample_json() {
        let input = r#"{
  "resourceType": "Patient",
  "id": "example",
  "meta": {
    "profile": ["http://hl7.org/fhir/us/core/StructureDefinition/us-core-patient"]
  },
  "identifier": [
    {"system": "http://example.org/fhir/patient/identifier", "value": "ABC123"}
  ],
  "name": [
    {"given": ["Test"]}
  ],
  "gender": "unknown"
}"#;

        let patient = Patient::parse(input).expect("parse json");
        let output = patient.to_json_pretty().expect("render patient");
        let reparsed = Patient::parse(&output).expect("reparse json");
        assert_eq!(patient, reparsed);
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = r#"{
  "resourceType": "Patient",
  "unexpected_key": true
}"#;

        let err = Patient::parse(input).expect_err("should reject unknown key");
        assert!(matches!(err, FhirError::Translation(msg) if msg.contains("unexpected_key")));
    }

    #[test]
    fn rejects_wrong_resource_type() {
        let input = r#"{"resourceType": "Observation"}"#;
        let err = Patient::parse(input).expect_err("should reject resourceType");
        assert!(
            matches!(err, FhirError::InvalidInput(msg) if msg.contains("Expected resourceType 'Patient'"))
        );
    }

    #[test]
    fn parse_error_reports_path_to_failing_field() {
        let input = r#"{
  "resourceType": "Patient",
  "name": [{"given": "not-a-list"}]
}"#;

        let err = Patient::parse(input).expect_err("should reject bad field type");
        assert!(matches!(err, FhirError::Translation(msg) if msg.contains("name")));
    }

    #[test]
    fn extension_tree_round_trips_through_json() {
        let mut patient = Patient::new();
        patient.set_extension(
            "http://example.org/ext/flag",
            ExtensionValue::Code("F".into()),
        );

        let json = patient.to_json().expect("render");
        let reparsed = Patient::parse(&json).expect("parse");
        assert_eq!(
            reparsed
                .extension("http://example.org/ext/flag")
                .and_then(|e| e.as_code()),
            Some("F")
        );
    }
}
