//! Observation resource wire model.
//!
//! The measurement record of the profiling toolkit. Hosts the composite
//! component list: repeatable sub-records identified by the coding of their
//! `code` concept (e.g. the LOINC code distinguishing systolic from
//! diastolic), with replace-by-kind set semantics.

use serde::{Deserialize, Serialize};

use crate::extension::{Extension, ExtensionHost};
use crate::meta::{Meta, Resource};
use crate::types::{CodeableConcept, Coding, ObservationStatus, Period, Quantity, Reference};
use crate::{FhirError, FhirResult};

/// The observation `effective[x]` choice: a point in time or a range.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub enum Effective {
    #[serde(rename = "effectiveDateTime")]
    DateTime(chrono::DateTime<chrono::Utc>),

    #[serde(rename = "effectivePeriod")]
    Period(Period),
}

/// One composite sub-record of an observation, identified by its code concept.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ObservationComponent {
    pub code: CodeableConcept,

    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
}

/// Wire representation of a FHIR Observation (subset).
///
/// `effective[x]` is required, matching the vital-signs profiles this model
/// serves. Strict deserialisation is not available here: the flattened
/// choice type rules out `deny_unknown_fields` (serde limitation).
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Observation {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    pub status: ObservationStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<Reference>,

    #[serde(flatten)]
    pub effective: Effective,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<ObservationComponent>,
}

impl Observation {
    /// Create an observation with the base fields set.
    pub fn new(status: ObservationStatus, subject: Reference, effective: Effective) -> Self {
        Observation {
            resource_type: "Observation".to_string(),
            id: None,
            meta: None,
            extension: Vec::new(),
            status,
            category: Vec::new(),
            code: None,
            subject: Some(subject),
            effective,
            component: Vec::new(),
        }
    }

    /// First component whose code concept contains the given kind.
    pub fn component(&self, system: &str, code: &str) -> Option<&ObservationComponent> {
        self.component.iter().find(|c| c.code.contains(system, code))
    }

    /// Replace-by-kind: remove any component of this kind, then append one
    /// carrying the given value. Guarantees at most one component per kind.
    pub fn set_component(&mut self, kind: Coding, value: Quantity) {
        self.clear_components(&kind.system, &kind.code);
        self.component.push(ObservationComponent {
            code: CodeableConcept::from_coding(kind),
            value: Some(value),
        });
    }

    /// Remove all components of the given kind. No-op when none exist.
    pub fn clear_components(&mut self, system: &str, code: &str) {
        self.component.retain(|c| !c.code.contains(system, code));
    }

    /// Replace-by-coding on the category list: remove any category concept
    /// containing this coding, then append a concept carrying it.
    pub fn set_category(&mut self, coding: Coding) {
        self.category
            .retain(|concept| !concept.contains(&coding.system, &coding.code));
        self.category.push(CodeableConcept::from_coding(coding));
    }

    /// Parse an observation resource from FHIR JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the JSON does not match the wire schema or
    /// resourceType is not "Observation".
    pub fn parse(json_text: &str) -> FhirResult<Observation> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);

        let observation =
            match serde_path_to_error::deserialize::<_, Observation>(&mut deserializer) {
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
                        "Observation schema mismatch at {path}: {source}"
                    )));
                }
            };

        if observation.resource_type != "Observation" {
            return Err(FhirError::InvalidInput(format!(
                "Expected resourceType 'Observation', got '{}'",
                observation.resource_type
            )));
        }

        Ok(observation)
    }

    /// Render the observation as pretty-printed FHIR JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if serialisation fails.
    pub fn to_json_pretty(&self) -> FhirResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ExtensionHost for Observation {
    fn extensions(&self) -> &[Extension] {
        &self.extension
    }

    fn extensions_mut(&mut self) -> &mut Vec<Extension> {
        &mut self.extension
    }
}

impl Resource for Observation {
    fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    fn meta_mut(&mut self) -> &mut Option<Meta> {
        &mut self.meta
    }
}
