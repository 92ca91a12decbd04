//! Feature extraction from clinical note sentences.
//!
//! [`SymptomFinder`] turns one sentence into a [`SymptomRecord`] of symptom,
//! treatment and organ-support flags. [`DiagnosisFinder`] decides whether a
//! sentence asserts a COVID-19 diagnosis and pneumonia.
//!
//! [`SymptomRecord`]: covid_model::SymptomRecord

#![deny(unsafe_code)]

pub mod catalog;
pub mod cleanup;
pub mod diagnosis;
pub mod fever;
pub mod icu;
mod patterns;
pub mod symptoms;

pub use cleanup::{clean_diagnosis_sentence, clean_symptom_sentence};
pub use diagnosis::{DiagnosisFinder, DiagnosisMarkers};
pub use fever::{FeverFinding, TemperatureUnit, detect_fever};
pub use icu::detect_icu;
pub use symptoms::{ExtractOptions, SymptomFinder};
