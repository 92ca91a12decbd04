//! COVID-19 severity classification.
//!
//! [`classify`] maps a merged [`PatientFeatureSet`] to one of the five
//! [`Severity`] levels of the surveillance case definition.
//!
//! [`PatientFeatureSet`]: covid_model::PatientFeatureSet
//! [`Severity`]: covid_model::Severity

#![deny(unsafe_code)]

pub mod classify;
pub mod device;

pub use classify::{
    ESCALATION_WINDOW_DAYS, HIGH_FLOW_RATE, classify, dates_in_range, is_critical, is_severe,
};
pub use device::is_high_flow_device;
