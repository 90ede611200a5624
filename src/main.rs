//! Demonstration driver for the US Core profiling toolkit.
//!
//! Builds a sample US Core patient and blood-pressure observation, writes the
//! patient and its validation outcome to JSON files, and logs both validator
//! results. Output paths can be overridden on the command line:
//! `uscore-run [patient.json] [outcome.json]`.

use anyhow::Context;
use chrono::Utc;
use fhir::{
    AdministrativeGender, Effective, HumanName, Identifier, ObservationStatus, Patient, Reference,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uscore::{BirthSex, OmbRaceCategory};

fn build_sample_patient() -> anyhow::Result<Patient> {
    let mut patient = Patient::new();

    // US Core requires an identifier with a system and a value
    patient.identifier.push(Identifier::new(
        "http://example.org/fhir/patient/identifier",
        "ABC123",
    ));

    // US Core requires a name with a given, family, or data-absent-reason
    patient.name.push(HumanName {
        given: vec!["Test".to_string()],
        ..HumanName::default()
    });

    // US Core requires a gender
    patient.gender = Some(AdministrativeGender::Unknown);

    uscore::race::set_race(
        &mut patient,
        "Race default text",
        &[OmbRaceCategory::AmericanIndianOrAlaskaNative],
        &[],
    )?;

    uscore::patient::set_profile(&mut patient);
    uscore::birth_sex::set_birth_sex(&mut patient, BirthSex::Female)?;

    Ok(patient)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let patient_path = args.next().unwrap_or_else(|| "patient.json".to_string());
    let outcome_path = args.next().unwrap_or_else(|| "outcome.json".to_string());

    let patient = build_sample_patient()?;

    match uscore::birth_sex::birth_sex(&patient) {
        Some(value) => info!(?value, "found US Core birth sex"),
        None => info!("US Core birth sex not found"),
    }

    let patient_json = patient.to_json_pretty()?;
    std::fs::write(&patient_path, &patient_json)
        .with_context(|| format!("failed to write {patient_path}"))?;
    println!("{patient_json}");

    let patient_outcome = conformance::patient::validator().validate(&patient);
    info!(
        valid = patient_outcome.is_valid(),
        failures = patient_outcome.failures().len(),
        "validated patient against US Core Patient"
    );

    let outcome_json = serde_json::to_string_pretty(&patient_outcome)?;
    std::fs::write(&outcome_path, &outcome_json)
        .with_context(|| format!("failed to write {outcome_path}"))?;
    println!("{outcome_json}");

    let observation = uscore::blood_pressure::create(
        ObservationStatus::Final,
        Reference::new("Patient/example"),
        Effective::DateTime(Utc::now()),
        100.0,
        70.0,
    );

    let observation_outcome = conformance::blood_pressure::validator().validate(&observation);
    info!(
        valid = observation_outcome.is_valid(),
        failures = observation_outcome.failures().len(),
        "validated observation against US Core Blood Pressure"
    );
    for failure in observation_outcome.failures() {
        info!(field = %failure.field, message = %failure.message, "conformance failure");
    }

    Ok(())
}
