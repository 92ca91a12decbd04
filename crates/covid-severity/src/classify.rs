//! The severity decision procedure.

use chrono::NaiveDateTime;
use covid_model::{PatientFeatureSet, Severity};
use tracing::debug;

use crate::device::is_high_flow_device;

/// Flow rates above this (L/min) count as high flow.
pub const HIGH_FLOW_RATE: f64 = 15.0;

/// Diagnosis and ICU dates this close together (in whole days) escalate a
/// severe or mild case to critical.
pub const ESCALATION_WINDOW_DAYS: i64 = 14;

/// Critical criteria: death from COVID, airway or organ support, ICU stay,
/// ARDS or respiratory failure, septic shock, multiple organ dysfunction.
pub fn is_critical(features: &PatientFeatureSet) -> bool {
    features.died_from_covid
        || features.is_intubated
        || features.is_ventilated
        || features.on_ecmo
        || features.in_icu
        || features.has_ards_or_rf
        || features.has_septic_shock
        || features.has_mod
}

/// Severe criteria, checked only when the case is not critical.
///
/// Azithromycin and dexamethasone alone do not qualify.
pub fn is_severe(features: &PatientFeatureSet) -> bool {
    let respiratory = features.has_dyspnea && (features.has_fever || features.has_cough);
    let treated = features.on_remdesivir
        || features.on_plasma
        || features.on_plaquenil
        || features.on_other_drugs;
    let high_flow_device = features
        .oxygen
        .devices()
        .flatten()
        .any(is_high_flow_device);
    let high_flow_rate = features
        .oxygen
        .flow_rates()
        .flatten()
        .any(|rate| rate > HIGH_FLOW_RATE);

    respiratory || features.has_pneumonia || treated || high_flow_device || high_flow_rate
}

/// Whether both dates are present and at most [`ESCALATION_WINDOW_DAYS`] apart.
pub fn dates_in_range(first: Option<NaiveDateTime>, second: Option<NaiveDateTime>) -> bool {
    match (first, second) {
        (Some(a), Some(b)) => {
            let delta = if a >= b { a - b } else { b - a };
            delta.num_days() <= ESCALATION_WINDOW_DAYS
        }
        _ => false,
    }
}

/// Classify a patient's COVID-19 severity per the surveillance case
/// definition. Every patient is assumed to be COVID positive.
///
/// Critical criteria win outright. Otherwise severe criteria are checked,
/// then any symptom field (outside the exclusion set) or oxygen observation
/// makes the case mild. With nothing found, an explicit asymptomatic flag
/// gives asymptomatic and anything else is unknown.
///
/// A severe or mild case whose two dates fall within the escalation window
/// becomes critical. Asymptomatic and unknown cases are never escalated.
pub fn classify(features: &PatientFeatureSet) -> Severity {
    let base = if is_critical(features) {
        Severity::Critical
    } else if is_severe(features) {
        Severity::Severe
    } else if features.has_any_symptom() {
        Severity::Mild
    } else if features.is_asymptomatic {
        Severity::Asymptomatic
    } else {
        Severity::Unknown
    };

    let escalate = matches!(base, Severity::Severe | Severity::Mild)
        && dates_in_range(features.datetime1, features.datetime2);

    let severity = if escalate { Severity::Critical } else { base };
    debug!(%base, %severity, escalate, "severity decision");
    severity
}
