//! US Core Race extension.
//!
//! http://hl7.org/fhir/us/core/StructureDefinition/us-core-race.html
//!
//! A complex extension on Patient: a mandatory `text` child plus repeatable
//! `ombCategory` and `detailed` coded children. Category adds carry a
//! dedup/exclusivity policy: concrete OMB categories accumulate (deduplicated
//! by code), while the UNK/ASKU null-flavor placeholders are mutually
//! exclusive with concrete categories and are evicted the moment a concrete
//! category is known.

use fhir::{Coding, Extension, ExtensionHost, ExtensionValue, Patient};

use crate::{UsCoreError, UsCoreResult};

/// The official URL for the US Core Race extension.
pub const EXTENSION_URL: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-race";

/// Sub-extension URL for OMB race categories.
pub const URL_OMB_CATEGORY: &str = "ombCategory";

/// Sub-extension URL for detailed race codings.
pub const URL_DETAILED: &str = "detailed";

/// Sub-extension URL for the mandatory text field.
pub const URL_TEXT: &str = "text";

/// System URL for CDC Race and Ethnicity.
/// http://hl7.org/fhir/us/core/CodeSystem-cdcrec.html
pub const SYSTEM_CDC_REC: &str = "urn:oid:2.16.840.1.113883.6.238";

/// System URL for HL7 Null Flavors.
/// https://terminology.hl7.org/CodeSystem-v3-NullFlavor.html
pub const SYSTEM_NULL_FLAVOR: &str = "http://terminology.hl7.org/CodeSystem/v3-NullFlavor";

/// Text used when a category add has to create the parent extension itself.
const GENERATED_TEXT: &str = "Generated Text";

/// OMB Race Categories.
/// http://hl7.org/fhir/us/core/ValueSet-omb-race-category.html
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OmbRaceCategory {
    AmericanIndianOrAlaskaNative,
    Asian,
    BlackOrAfricanAmerican,
    NativeHawaiianOrOtherPacificIslander,
    White,
    /// UNK null flavor: a proper value is applicable, but not known.
    Unknown,
    /// ASKU null flavor: information was sought but not found.
    AskedButNoAnswer,
}

/// Registered category-to-coding triples. Lookups go through this table so a
/// missing registration fails loudly instead of being coerced.
const OMB_CATEGORY_CODINGS: &[(OmbRaceCategory, &str, &str, &str)] = &[
    (
        OmbRaceCategory::AmericanIndianOrAlaskaNative,
        SYSTEM_CDC_REC,
        "1002-5",
        "American Indian or Alaska Native",
    ),
    (OmbRaceCategory::Asian, SYSTEM_CDC_REC, "2028-9", "Asian"),
    (
        OmbRaceCategory::BlackOrAfricanAmerican,
        SYSTEM_CDC_REC,
        "2054-5",
        "Black or African American",
    ),
    (
        OmbRaceCategory::NativeHawaiianOrOtherPacificIslander,
        SYSTEM_CDC_REC,
        "2076-8",
        "Native Hawaiian or Other Pacific Islander",
    ),
    (OmbRaceCategory::White, SYSTEM_CDC_REC, "2106-3", "White"),
    (
        OmbRaceCategory::Unknown,
        SYSTEM_NULL_FLAVOR,
        "UNK",
        "Unknown",
    ),
    (
        OmbRaceCategory::AskedButNoAnswer,
        SYSTEM_NULL_FLAVOR,
        "ASKU",
        "Asked but no answer",
    ),
];

/// Resolve a category to its registered coding.
///
/// # Errors
///
/// Returns [`UsCoreError::UnmappedValue`] if the category is not in the table.
pub fn category_coding(category: OmbRaceCategory) -> UsCoreResult<Coding> {
    OMB_CATEGORY_CODINGS
        .iter()
        .find(|(c, _, _, _)| *c == category)
        .map(|(_, system, code, display)| Coding::with_display(*system, *code, *display))
        .ok_or(UsCoreError::UnmappedValue {
            domain: "OMB race category",
            value: format!("{category:?}"),
        })
}

/// UNK and ASKU are placeholders: superseded by any concrete category.
fn is_placeholder_code(code: &str) -> bool {
    code == "UNK" || code == "ASKU"
}

/// Add or replace the US Core Race extension with the given values.
///
/// Singleton replace on the parent node: any existing race extension is
/// removed, then one is rebuilt with a `text` child, the given OMB category
/// children, and the given detailed codings, in that order.
///
/// # Errors
///
/// Returns [`UsCoreError::InvalidInput`] when `text` is empty, or
/// [`UsCoreError::UnmappedValue`] for an unregistered category.
pub fn set_race(
    patient: &mut Patient,
    text: &str,
    omb_categories: &[OmbRaceCategory],
    detailed: &[Coding],
) -> UsCoreResult<()> {
    if text.is_empty() {
        return Err(UsCoreError::InvalidInput(
            "race text cannot be empty".into(),
        ));
    }

    let mut race = Extension::parent(EXTENSION_URL);

    // text is mandatory 1..1, so singleton set
    race.set_extension(URL_TEXT, ExtensionValue::Text(text.to_string()));

    for category in omb_categories {
        let coding = category_coding(*category)?;
        race.add_extension(URL_OMB_CATEGORY, ExtensionValue::Coding(coding));
    }

    for coding in detailed {
        race.add_extension(URL_DETAILED, ExtensionValue::Coding(coding.clone()));
    }

    patient.remove_extension(EXTENSION_URL);
    patient.extensions_mut().push(race);

    Ok(())
}

/// Add an OMB category to the race extension under the exclusivity policy.
///
/// - No race extension yet: create one with generated text and this category.
/// - Category already present (matched by code): no-op.
/// - Existing UNK/ASKU children are dropped, superseded by any concrete add.
/// - Adding UNK/ASKU while a concrete category remains: no-op.
/// - Otherwise the category children are rebuilt with the retained set plus
///   the new category appended.
///
/// # Errors
///
/// Returns [`UsCoreError::UnmappedValue`] for an unregistered category.
pub fn add_omb_category(patient: &mut Patient, category: OmbRaceCategory) -> UsCoreResult<()> {
    let coding = category_coding(category)?;

    let Some(index) = patient
        .extensions()
        .iter()
        .position(|ext| ext.url == EXTENSION_URL)
    else {
        return set_race(patient, GENERATED_TEXT, &[category], &[]);
    };
    let race = &mut patient.extensions_mut()[index];

    let mut retained: Vec<Extension> = Vec::new();

    for existing in race.extensions_with_url(URL_OMB_CATEGORY) {
        match existing.as_coding() {
            // already present, nothing else to do
            Some(c) if c.code == coding.code => return Ok(()),
            // placeholder, superseded by the incoming category
            Some(c) if is_placeholder_code(&c.code) => {}
            _ => retained.push(existing.clone()),
        }
    }

    if !retained.is_empty() && is_placeholder_code(&coding.code) {
        // don't add a placeholder when a concrete category is present
        return Ok(());
    }

    race.remove_extension(URL_OMB_CATEGORY);
    for existing in retained {
        race.extensions_mut().push(existing);
    }
    race.add_extension(URL_OMB_CATEGORY, ExtensionValue::Coding(coding));

    Ok(())
}

/// Set the text on the race extension, creating the extension if absent.
///
/// # Errors
///
/// Returns [`UsCoreError::InvalidInput`] when `text` is empty.
pub fn set_race_text(patient: &mut Patient, text: &str) -> UsCoreResult<()> {
    if text.is_empty() {
        return Err(UsCoreError::InvalidInput(
            "race text cannot be empty".into(),
        ));
    }

    let Some(index) = patient
        .extensions()
        .iter()
        .position(|ext| ext.url == EXTENSION_URL)
    else {
        return set_race(patient, text, &[], &[]);
    };

    patient.extensions_mut()[index].set_extension(URL_TEXT, ExtensionValue::Text(text.to_string()));
    Ok(())
}

/// Read the race extension text. Soft read: `None` when absent or malformed.
pub fn race_text(patient: &Patient) -> Option<&str> {
    patient
        .extension(EXTENSION_URL)?
        .extension(URL_TEXT)?
        .as_text()
}

/// Remove any US Core Race extension from a patient.
pub fn clear_race(patient: &mut Patient) {
    patient.remove_extension(EXTENSION_URL);
}
