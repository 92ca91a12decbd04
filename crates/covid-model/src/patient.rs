//! The aggregated per-patient feature set consumed by severity classification.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::diagnosis::DiagnosisRecord;
use crate::oxygen::OxygenObservations;
use crate::symptoms::SymptomRecord;

/// Fields that never count as symptoms when deciding between mild,
/// asymptomatic and unknown.
pub const NON_SYMPTOM_FIELDS: &[&str] = &[
    "sentence",
    "text_list",
    "has_symptoms",
    "has_other_symptoms",
    "on_remdesivir",
    "on_plasma",
    "on_plaquenil",
    "on_azithromycin",
    "on_other_drugs",
    "on_dexamethasone",
    "is_asymptomatic",
    "died_from_covid",
    "datetime1",
    "datetime2",
];

/// Everything known about one patient, merged across sentences by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientFeatureSet {
    /// From the diagnosis finder.
    pub has_pneumonia: bool,

    pub has_fever: bool,
    pub has_dyspnea: bool,
    pub has_cough: bool,
    pub is_intubated: bool,
    pub is_ventilated: bool,
    pub in_icu: bool,
    pub has_ards_or_rf: bool,
    pub on_ecmo: bool,
    pub has_septic_shock: bool,
    pub has_mod: bool,
    pub on_remdesivir: bool,
    pub on_plasma: bool,
    pub on_plaquenil: bool,
    pub on_azithromycin: bool,
    pub on_other_drugs: bool,
    pub on_dexamethasone: bool,
    pub has_chills: bool,
    pub has_rigors: bool,
    pub has_myalgia: bool,
    pub has_runny_nose: bool,
    pub has_sore_throat: bool,
    pub has_prob_with_taste: bool,
    pub has_prob_with_smell: bool,
    pub has_fatigue: bool,
    pub has_wheezing: bool,
    pub has_chest_pain: bool,
    pub has_nausea: bool,
    pub has_vomiting: bool,
    pub has_headache: bool,
    pub has_abdominal_pain: bool,
    pub has_diarrhea: bool,
    pub is_asymptomatic: bool,

    /// Whether COVID-19 was a cause of death.
    pub died_from_covid: bool,

    /// Oxygen flow rates, devices and needs-O2 flags, positionally paired.
    #[serde(flatten)]
    pub oxygen: OxygenObservations,

    /// Chart radio-button answers about symptoms.
    pub has_symptoms: bool,
    pub has_other_symptoms: bool,

    /// Source text for this patient, kept for debugging.
    pub text_list: Vec<String>,

    /// Dates of COVID diagnosis and ICU admission, in either order.
    pub datetime1: Option<NaiveDateTime>,
    pub datetime2: Option<NaiveDateTime>,
}

/// A field value as seen by the symptom scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Flag(bool),
    /// A list-valued field, represented by its length.
    List(usize),
    Text(&'a [String]),
    Date(Option<NaiveDateTime>),
}

impl FieldValue<'_> {
    /// True for a set flag or a non-empty list.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Flag(value) => *value,
            Self::List(len) => *len > 0,
            Self::Text(values) => !values.is_empty(),
            Self::Date(value) => value.is_some(),
        }
    }
}

impl PatientFeatureSet {
    /// Build a feature set from merged symptom and diagnosis records.
    pub fn from_records(symptoms: &SymptomRecord, diagnosis: &DiagnosisRecord) -> Self {
        Self {
            has_pneumonia: diagnosis.has_pneumonia,
            has_fever: symptoms.has_fever,
            has_dyspnea: symptoms.has_dyspnea,
            has_cough: symptoms.has_cough,
            is_intubated: symptoms.is_intubated,
            is_ventilated: symptoms.is_ventilated,
            in_icu: symptoms.in_icu,
            has_ards_or_rf: symptoms.has_ards_or_rf,
            on_ecmo: symptoms.on_ecmo,
            has_septic_shock: symptoms.has_septic_shock,
            has_mod: symptoms.has_mod,
            on_remdesivir: symptoms.on_remdesivir,
            on_plasma: symptoms.on_plasma,
            on_plaquenil: symptoms.on_plaquenil,
            on_azithromycin: symptoms.on_azithromycin,
            on_other_drugs: symptoms.on_other_drugs,
            on_dexamethasone: symptoms.on_dexamethasone,
            has_chills: symptoms.has_chills,
            has_rigors: symptoms.has_rigors,
            has_myalgia: symptoms.has_myalgia,
            has_runny_nose: symptoms.has_runny_nose,
            has_sore_throat: symptoms.has_sore_throat,
            has_prob_with_taste: symptoms.has_prob_with_taste,
            has_prob_with_smell: symptoms.has_prob_with_smell,
            has_fatigue: symptoms.has_fatigue,
            has_wheezing: symptoms.has_wheezing,
            has_chest_pain: symptoms.has_chest_pain,
            has_nausea: symptoms.has_nausea,
            has_vomiting: symptoms.has_vomiting,
            has_headache: symptoms.has_headache,
            has_abdominal_pain: symptoms.has_abdominal_pain,
            has_diarrhea: symptoms.has_diarrhea,
            is_asymptomatic: symptoms.is_asymptomatic,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_oxygen(mut self, oxygen: OxygenObservations) -> Self {
        self.oxygen = oxygen;
        self
    }

    #[must_use]
    pub fn with_dates(
        mut self,
        datetime1: Option<NaiveDateTime>,
        datetime2: Option<NaiveDateTime>,
    ) -> Self {
        self.datetime1 = datetime1;
        self.datetime2 = datetime2;
        self
    }

    /// Every field with its name, in declaration order.
    ///
    /// The oxygen observations appear as their three wire-level lists.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue<'_>)> {
        use FieldValue::{Date, Flag, List, Text};

        let oxygen_len = self.oxygen.len();
        vec![
            ("has_pneumonia", Flag(self.has_pneumonia)),
            ("has_fever", Flag(self.has_fever)),
            ("has_dyspnea", Flag(self.has_dyspnea)),
            ("has_cough", Flag(self.has_cough)),
            ("is_intubated", Flag(self.is_intubated)),
            ("is_ventilated", Flag(self.is_ventilated)),
            ("in_icu", Flag(self.in_icu)),
            ("has_ards_or_rf", Flag(self.has_ards_or_rf)),
            ("on_ecmo", Flag(self.on_ecmo)),
            ("has_septic_shock", Flag(self.has_septic_shock)),
            ("has_mod", Flag(self.has_mod)),
            ("on_remdesivir", Flag(self.on_remdesivir)),
            ("on_plasma", Flag(self.on_plasma)),
            ("on_plaquenil", Flag(self.on_plaquenil)),
            ("on_azithromycin", Flag(self.on_azithromycin)),
            ("on_other_drugs", Flag(self.on_other_drugs)),
            ("on_dexamethasone", Flag(self.on_dexamethasone)),
            ("has_chills", Flag(self.has_chills)),
            ("has_rigors", Flag(self.has_rigors)),
            ("has_myalgia", Flag(self.has_myalgia)),
            ("has_runny_nose", Flag(self.has_runny_nose)),
            ("has_sore_throat", Flag(self.has_sore_throat)),
            ("has_prob_with_taste", Flag(self.has_prob_with_taste)),
            ("has_prob_with_smell", Flag(self.has_prob_with_smell)),
            ("has_fatigue", Flag(self.has_fatigue)),
            ("has_wheezing", Flag(self.has_wheezing)),
            ("has_chest_pain", Flag(self.has_chest_pain)),
            ("has_nausea", Flag(self.has_nausea)),
            ("has_vomiting", Flag(self.has_vomiting)),
            ("has_headache", Flag(self.has_headache)),
            ("has_abdominal_pain", Flag(self.has_abdominal_pain)),
            ("has_diarrhea", Flag(self.has_diarrhea)),
            ("is_asymptomatic", Flag(self.is_asymptomatic)),
            ("died_from_covid", Flag(self.died_from_covid)),
            ("o2_flow_rate_list", List(oxygen_len)),
            ("o2_device_list", List(oxygen_len)),
            ("needs_o2_list", List(oxygen_len)),
            ("has_symptoms", Flag(self.has_symptoms)),
            ("has_other_symptoms", Flag(self.has_other_symptoms)),
            ("text_list", Text(&self.text_list)),
            ("datetime1", Date(self.datetime1)),
            ("datetime2", Date(self.datetime2)),
        ]
    }

    /// Fields that count toward a mild classification, i.e. everything
    /// outside [`NON_SYMPTOM_FIELDS`].
    pub fn symptom_fields(&self) -> impl Iterator<Item = (&'static str, FieldValue<'_>)> {
        self.fields()
            .into_iter()
            .filter(|(name, _)| !NON_SYMPTOM_FIELDS.contains(name))
    }

    /// Whether any symptom field is set or any oxygen observation exists.
    pub fn has_any_symptom(&self) -> bool {
        self.symptom_fields().any(|(_, value)| value.is_present())
    }
}
