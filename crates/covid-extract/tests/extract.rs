//! End-to-end extraction over realistic note sentences.

use covid_extract::{DiagnosisFinder, ExtractOptions, SymptomFinder};
use covid_match::MatchOptions;
use covid_model::{DiagnosisRecord, SymptomRecord};

fn symptoms(sentence: &str) -> SymptomRecord {
    SymptomFinder.run(sentence, &ExtractOptions::default())
}

fn diagnosis(sentence: &str) -> DiagnosisRecord {
    DiagnosisFinder.run(sentence, &MatchOptions::default())
}

/// Every record flag backed by a negation scan, with a phrase that sets it.
/// `in_icu` and `is_asymptomatic` have no negation scan.
const NEGATABLE: [(&str, &str); 30] = [
    ("has_fever", "fever"),
    ("has_dyspnea", "shortness of breath"),
    ("has_cough", "cough"),
    ("is_intubated", "intubation"),
    ("is_ventilated", "ventilator"),
    ("has_ards_or_rf", "ards"),
    ("on_ecmo", "ecmo"),
    ("has_septic_shock", "septic shock"),
    ("has_mod", "multiple organ failure"),
    ("on_remdesivir", "remdesivir"),
    ("on_plasma", "convalescent plasma"),
    ("on_plaquenil", "hydroxychloroquine"),
    ("on_azithromycin", "azithromycin"),
    ("on_other_drugs", "tocilizumab"),
    ("on_dexamethasone", "dexamethasone"),
    ("has_chills", "chills"),
    ("has_rigors", "rigors"),
    ("has_myalgia", "myalgias"),
    ("has_runny_nose", "runny nose"),
    ("has_sore_throat", "sore throat"),
    ("has_prob_with_taste", "ageusia"),
    ("has_prob_with_smell", "anosmia"),
    ("has_fatigue", "fatigue"),
    ("has_wheezing", "wheezing"),
    ("has_chest_pain", "chest pain"),
    ("has_nausea", "nausea"),
    ("has_vomiting", "vomiting"),
    ("has_headache", "headache"),
    ("has_abdominal_pain", "abdominal pain"),
    ("has_diarrhea", "diarrhea"),
];

fn flag(record: &SymptomRecord, name: &str) -> bool {
    record
        .flags()
        .into_iter()
        .find(|(field, _)| *field == name)
        .map(|(_, value)| value)
        .unwrap_or_else(|| panic!("unknown flag {name}"))
}

#[test]
fn negation_cues_flip_presence() {
    for (name, phrase) in NEGATABLE {
        let plain = format!("pt reports {phrase}");
        assert!(flag(&symptoms(&plain), name), "{name}: {plain}");
        for cue in ["denies", "no", "without"] {
            let sentence = format!("pt {cue} {phrase}");
            assert!(!flag(&symptoms(&sentence), name), "{name}: {sentence}");
        }
    }
}

#[test]
fn negation_table_covers_every_scanned_flag() {
    let record = SymptomRecord::default();
    let scanned: Vec<&str> = record
        .flags()
        .into_iter()
        .map(|(name, _)| name)
        .filter(|name| !matches!(*name, "in_icu" | "is_asymptomatic"))
        .collect();
    let table: Vec<&str> = NEGATABLE.iter().map(|(name, _)| *name).collect();
    assert_eq!(table, scanned);
}

#[test]
fn fever_readings_follow_unit_thresholds() {
    let cases = [
        ("Tmax temp 38.5", true),
        ("temp 99", false),
        ("temp 101", true),
        ("temp 38.0", false),
        ("temp 100.4", false),
    ];
    for (sentence, expected) in cases {
        assert_eq!(symptoms(sentence).has_fever, expected, "{sentence}");
    }
}

#[test]
fn icu_admission_needs_context() {
    assert!(!symptoms("admitted to ICU for delivery").in_icu);
    assert!(symptoms("admitted to ICU with covid pneumonia").in_icu);
}

#[test]
fn critical_care_sentence() {
    let record = symptoms("Intubated 12/1 & started on remdesivir, dexamethasone and ECMO");
    assert!(record.is_intubated);
    assert!(record.on_remdesivir);
    assert!(record.on_dexamethasone);
    assert!(record.on_ecmo);
    assert!(!record.has_fever);
}

#[test]
fn positivity_sentences() {
    assert!(diagnosis("hx covid positive").has_covid);
    assert!(!diagnosis("covid negative").has_covid);
    assert!(diagnosis("pneumonia due to covid").has_pneumonia);
}

#[test]
fn merged_records_or_flags() {
    let records = [symptoms("reports cough"), symptoms("reports chills")];
    let merged = SymptomRecord::merge(&records);
    assert!(merged.has_cough && merged.has_chills);
    assert!(merged.sentence.is_empty());

    let notes = [diagnosis("covid negative"), diagnosis("hx covid positive")];
    assert!(DiagnosisRecord::merge(&notes).has_covid);
}

#[test]
fn negation_reaches_across_a_short_gap() {
    // The cue scopes over up to five words, so a later mention is negated too.
    assert!(!symptoms("denies fever, reports cough").has_cough);
}

#[test]
fn symptom_record_json_line() {
    let record = symptoms("denies fever. reports cough");
    let line = record.to_json_line().unwrap();
    assert!(line.starts_with(r#"[{"sentence":"denies fever. reports cough","has_fever":false,"has_dyspnea":false,"has_cough":true,"#));
    insta::assert_json_snapshot!(record.positive_flags(), @r#"
    [
      "has_cough"
    ]
    "#);
}
