//! Sentence-level symptom finder.

use covid_match::{Feature, MatchOptions};
use covid_model::SymptomRecord;
use tracing::debug;

use crate::catalog::CATALOG;
use crate::cleanup::clean_symptom_sentence;
use crate::fever::{FeverFinding, detect_fever};
use crate::icu::detect_icu;

/// Switches for one symptom-finder call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Emit debug events for matcher internals.
    pub trace: bool,
    /// Suppress vomiting, nausea and abdominal pain, which are too
    /// nonspecific in pregnancy notes.
    pub ignore_common: bool,
    /// Allow sentence text in trace events.
    pub log_data: bool,
}

impl From<ExtractOptions> for MatchOptions {
    fn from(options: ExtractOptions) -> Self {
        Self {
            trace: options.trace,
            log_data: options.log_data,
        }
    }
}

/// Extracts every symptom, treatment and organ-support flag from a sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomFinder;

impl SymptomFinder {
    /// Clean `sentence` and evaluate every feature on it.
    pub fn run(&self, sentence: &str, options: &ExtractOptions) -> SymptomRecord {
        self.run_with_fever(sentence, options).0
    }

    /// Like [`SymptomFinder::run`], also returning the fever reading.
    pub fn run_with_fever(
        &self,
        sentence: &str,
        options: &ExtractOptions,
    ) -> (SymptomRecord, FeverFinding) {
        let cleaned = clean_symptom_sentence(sentence);
        let match_options = MatchOptions::from(*options);
        if options.trace {
            debug!(sentence = match_options.loggable(&cleaned), "cleaned sentence");
        }

        let catalog = &*CATALOG;
        let has = |feature: &Feature| feature.detect(&cleaned, &match_options);

        let fever = detect_fever(&cleaned, &match_options);
        let has_ards_or_rf = has(&catalog.ards);

        let mut record = SymptomRecord {
            has_fever: fever.present,
            // ARDS or respiratory failure implies dyspnea.
            has_dyspnea: has(&catalog.dyspnea) || has_ards_or_rf,
            has_cough: has(&catalog.cough),
            is_intubated: has(&catalog.intubated),
            is_ventilated: has(&catalog.ventilated),
            in_icu: detect_icu(&cleaned, &match_options),
            has_ards_or_rf,
            on_ecmo: has(&catalog.ecmo),
            has_septic_shock: has(&catalog.septic_shock),
            has_mod: has(&catalog.organ_dysfunction),
            on_remdesivir: has(&catalog.remdesivir),
            on_plasma: has(&catalog.plasma),
            on_plaquenil: has(&catalog.plaquenil),
            on_azithromycin: has(&catalog.azithromycin),
            on_other_drugs: has(&catalog.other_drugs),
            on_dexamethasone: has(&catalog.dexamethasone),
            has_chills: has(&catalog.chills),
            has_rigors: has(&catalog.rigors),
            has_myalgia: has(&catalog.myalgia),
            has_runny_nose: has(&catalog.runny_nose),
            has_sore_throat: has(&catalog.sore_throat),
            has_prob_with_taste: has(&catalog.taste),
            has_prob_with_smell: has(&catalog.smell),
            has_fatigue: has(&catalog.fatigue),
            has_wheezing: has(&catalog.wheezing),
            has_chest_pain: has(&catalog.chest_pain),
            has_nausea: has(&catalog.nausea),
            has_vomiting: has(&catalog.vomiting),
            has_headache: has(&catalog.headache),
            has_abdominal_pain: has(&catalog.abdominal_pain),
            has_diarrhea: has(&catalog.diarrhea),
            is_asymptomatic: has(&catalog.asymptomatic),
            sentence: String::new(),
        };

        if options.ignore_common {
            record.has_vomiting = false;
            record.has_nausea = false;
            record.has_abdominal_pain = false;
        }

        record.sentence = cleaned;
        (record, fever)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sentence: &str) -> SymptomRecord {
        SymptomFinder.run(sentence, &ExtractOptions::default())
    }

    #[test]
    fn record_carries_the_cleaned_sentence() {
        let record = run("fever,  cough (dry)");
        // The closing parenthesis leaves a trailing space behind.
        assert_eq!(record.sentence, "fever cough dry ");
        assert!(record.has_fever);
        assert!(record.has_cough);
        assert!(!record.has_dyspnea);
    }

    #[test]
    fn ards_implies_dyspnea() {
        let record = run("developed ARDS");
        assert!(record.has_ards_or_rf);
        assert!(record.has_dyspnea);
    }

    #[test]
    fn ignore_common_clears_gi_symptoms() {
        let sentence = "nausea and vomiting with abdominal pain and headache";
        let plain = run(sentence);
        assert!(plain.has_nausea && plain.has_vomiting && plain.has_abdominal_pain);

        let options = ExtractOptions {
            ignore_common: true,
            ..ExtractOptions::default()
        };
        let quiet = SymptomFinder.run(sentence, &options);
        assert!(!quiet.has_nausea && !quiet.has_vomiting && !quiet.has_abdominal_pain);
        assert!(quiet.has_headache);
    }

    #[test]
    fn fever_reading_is_exposed() {
        let (record, fever) = SymptomFinder.run_with_fever(
            "Temp 38.9 and chills",
            &ExtractOptions {
                trace: true,
                ..ExtractOptions::default()
            },
        );
        assert!(record.has_fever);
        assert!(record.has_chills);
        assert_eq!(fever.temperature, Some(38.9));
    }
}
