//! Per-sentence symptom, treatment and organ-support flags.
//!
//! Field order is part of the output contract: records are serialized in
//! declaration order so that downstream tools can diff JSON output line by
//! line. [`SYMPTOM_FIELDS`] lists the same order for display.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Serialized field names of [`SymptomRecord`], in output order.
pub const SYMPTOM_FIELDS: [&str; 33] = [
    "sentence",
    "has_fever",
    "has_dyspnea",
    "has_cough",
    "is_intubated",
    "is_ventilated",
    "in_icu",
    "has_ards_or_rf",
    "on_ecmo",
    "has_septic_shock",
    "has_mod",
    "on_remdesivir",
    "on_plasma",
    "on_plaquenil",
    "on_azithromycin",
    "on_other_drugs",
    "on_dexamethasone",
    "has_chills",
    "has_rigors",
    "has_myalgia",
    "has_runny_nose",
    "has_sore_throat",
    "has_prob_with_taste",
    "has_prob_with_smell",
    "has_fatigue",
    "has_wheezing",
    "has_chest_pain",
    "has_nausea",
    "has_vomiting",
    "has_headache",
    "has_abdominal_pain",
    "has_diarrhea",
    "is_asymptomatic",
];

/// Feature flags found in one cleaned sentence (or merged across several).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomRecord {
    /// The cleaned sentence the flags were extracted from (empty when merged).
    pub sentence: String,
    pub has_fever: bool,
    pub has_dyspnea: bool,
    pub has_cough: bool,
    pub is_intubated: bool,
    pub is_ventilated: bool,
    pub in_icu: bool,
    /// ARDS or respiratory failure.
    pub has_ards_or_rf: bool,
    pub on_ecmo: bool,
    pub has_septic_shock: bool,
    /// Multiple organ dysfunction.
    pub has_mod: bool,
    pub on_remdesivir: bool,
    /// Convalescent plasma.
    pub on_plasma: bool,
    /// Hydroxychloroquine alone.
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
}

impl SymptomRecord {
    /// Create an all-false record for a sentence.
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
            ..Self::default()
        }
    }

    /// OR-merge several sentence records into a single record.
    ///
    /// The merged record has an empty sentence.
    pub fn merge<'a>(records: impl IntoIterator<Item = &'a SymptomRecord>) -> Self {
        let mut merged = Self::default();
        for record in records {
            merged.absorb(record);
        }
        merged
    }

    /// Set every flag that is set in `other`.
    pub fn absorb(&mut self, other: &SymptomRecord) {
        self.has_fever |= other.has_fever;
        self.has_dyspnea |= other.has_dyspnea;
        self.has_cough |= other.has_cough;
        self.is_intubated |= other.is_intubated;
        self.is_ventilated |= other.is_ventilated;
        self.in_icu |= other.in_icu;
        self.has_ards_or_rf |= other.has_ards_or_rf;
        self.on_ecmo |= other.on_ecmo;
        self.has_septic_shock |= other.has_septic_shock;
        self.has_mod |= other.has_mod;
        self.on_remdesivir |= other.on_remdesivir;
        self.on_plasma |= other.on_plasma;
        self.on_plaquenil |= other.on_plaquenil;
        self.on_azithromycin |= other.on_azithromycin;
        self.on_other_drugs |= other.on_other_drugs;
        self.on_dexamethasone |= other.on_dexamethasone;
        self.has_chills |= other.has_chills;
        self.has_rigors |= other.has_rigors;
        self.has_myalgia |= other.has_myalgia;
        self.has_runny_nose |= other.has_runny_nose;
        self.has_sore_throat |= other.has_sore_throat;
        self.has_prob_with_taste |= other.has_prob_with_taste;
        self.has_prob_with_smell |= other.has_prob_with_smell;
        self.has_fatigue |= other.has_fatigue;
        self.has_wheezing |= other.has_wheezing;
        self.has_chest_pain |= other.has_chest_pain;
        self.has_nausea |= other.has_nausea;
        self.has_vomiting |= other.has_vomiting;
        self.has_headache |= other.has_headache;
        self.has_abdominal_pain |= other.has_abdominal_pain;
        self.has_diarrhea |= other.has_diarrhea;
        self.is_asymptomatic |= other.is_asymptomatic;
    }

    /// All boolean flags paired with their field names, in output order.
    pub fn flags(&self) -> [(&'static str, bool); 32] {
        [
            ("has_fever", self.has_fever),
            ("has_dyspnea", self.has_dyspnea),
            ("has_cough", self.has_cough),
            ("is_intubated", self.is_intubated),
            ("is_ventilated", self.is_ventilated),
            ("in_icu", self.in_icu),
            ("has_ards_or_rf", self.has_ards_or_rf),
            ("on_ecmo", self.on_ecmo),
            ("has_septic_shock", self.has_septic_shock),
            ("has_mod", self.has_mod),
            ("on_remdesivir", self.on_remdesivir),
            ("on_plasma", self.on_plasma),
            ("on_plaquenil", self.on_plaquenil),
            ("on_azithromycin", self.on_azithromycin),
            ("on_other_drugs", self.on_other_drugs),
            ("on_dexamethasone", self.on_dexamethasone),
            ("has_chills", self.has_chills),
            ("has_rigors", self.has_rigors),
            ("has_myalgia", self.has_myalgia),
            ("has_runny_nose", self.has_runny_nose),
            ("has_sore_throat", self.has_sore_throat),
            ("has_prob_with_taste", self.has_prob_with_taste),
            ("has_prob_with_smell", self.has_prob_with_smell),
            ("has_fatigue", self.has_fatigue),
            ("has_wheezing", self.has_wheezing),
            ("has_chest_pain", self.has_chest_pain),
            ("has_nausea", self.has_nausea),
            ("has_vomiting", self.has_vomiting),
            ("has_headache", self.has_headache),
            ("has_abdominal_pain", self.has_abdominal_pain),
            ("has_diarrhea", self.has_diarrhea),
            ("is_asymptomatic", self.is_asymptomatic),
        ]
    }

    /// Names of the flags that are set.
    pub fn positive_flags(&self) -> Vec<&'static str> {
        self.flags()
            .into_iter()
            .filter_map(|(name, value)| value.then_some(name))
            .collect()
    }

    /// Serialize as a single-line JSON array holding this one record.
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&[self])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_ors_flags_and_clears_sentence() {
        let first = SymptomRecord {
            has_fever: true,
            ..SymptomRecord::new("fever to 101")
        };
        let second = SymptomRecord {
            has_cough: true,
            ..SymptomRecord::new("dry cough")
        };
        let merged = SymptomRecord::merge([&first, &second]);
        assert!(merged.has_fever);
        assert!(merged.has_cough);
        assert!(!merged.has_dyspnea);
        assert!(merged.sentence.is_empty());
    }

    #[test]
    fn merge_of_nothing_is_all_false() {
        let none: [&SymptomRecord; 0] = [];
        let merged = SymptomRecord::merge(none);
        assert!(merged.positive_flags().is_empty());
    }

    #[test]
    fn field_list_matches_flags() {
        let record = SymptomRecord::default();
        let names: Vec<&str> = record.flags().iter().map(|(name, _)| *name).collect();
        assert_eq!(SYMPTOM_FIELDS[0], "sentence");
        assert_eq!(&SYMPTOM_FIELDS[1..], names.as_slice());
    }

    #[test]
    fn json_line_keeps_field_order() {
        let json = SymptomRecord::new("x").to_json_line().unwrap();
        assert!(json.starts_with(r#"[{"sentence":"x","has_fever":false,"has_dyspnea":false"#));
        assert!(json.ends_with(r#""is_asymptomatic":false}]"#));
        assert!(!json.contains('\n'));
    }
}
