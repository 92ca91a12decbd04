//! Shared data model for COVID-19 note extraction.
//!
//! Per-sentence [`SymptomRecord`] and [`DiagnosisRecord`] flags, the
//! merged [`PatientFeatureSet`] with its oxygen observations, and the
//! [`Severity`] codes produced by classification.

#![deny(unsafe_code)]

pub mod diagnosis;
pub mod error;
pub mod oxygen;
pub mod patient;
pub mod severity;
pub mod symptoms;

pub use diagnosis::{DIAGNOSIS_FIELDS, DiagnosisRecord};
pub use error::{ModelError, Result};
pub use oxygen::{OxygenObservation, OxygenObservations};
pub use patient::{FieldValue, NON_SYMPTOM_FIELDS, PatientFeatureSet};
pub use severity::{Severity, SeverityReport};
pub use symptoms::{SYMPTOM_FIELDS, SymptomRecord};
