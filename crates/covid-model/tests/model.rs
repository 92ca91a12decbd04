//! Serialization contract tests for the feature model.

use chrono::NaiveDate;
use covid_model::{DiagnosisRecord, PatientFeatureSet, Severity, SeverityReport};

#[test]
fn diagnosis_record_json_field_order() {
    let record = DiagnosisRecord {
        sentence: "hx covid positive".to_string(),
        has_covid: true,
        has_pneumonia: false,
    };
    insta::assert_json_snapshot!(record, @r#"
    {
      "sentence": "hx covid positive",
      "has_covid": true,
      "has_pneumonia": false
    }
    "#);
    assert_eq!(
        record.to_json_line().unwrap(),
        r#"[{"sentence":"hx covid positive","has_covid":true,"has_pneumonia":false}]"#
    );
}

#[test]
fn severity_report_json() {
    let report = SeverityReport::from(Severity::Mild);
    insta::assert_json_snapshot!(report, @r#"
    {
      "code": 2,
      "label": "mild"
    }
    "#);
}

#[test]
fn patient_feature_set_reads_paired_oxygen_lists() {
    let json = r#"{
        "has_dyspnea": true,
        "o2_flow_rate_list": [2, null],
        "o2_device_list": ["nc", "hfnc"],
        "needs_o2_list": [true, true],
        "datetime1": "2020-11-01T00:00:00",
        "datetime2": "2020-11-11T08:30:00"
    }"#;
    let features: PatientFeatureSet = serde_json::from_str(json).unwrap();
    assert!(features.has_dyspnea);
    assert!(!features.has_fever);
    assert_eq!(features.oxygen.len(), 2);
    let flows: Vec<Option<f64>> = features.oxygen.flow_rates().collect();
    assert_eq!(flows, vec![Some(2.0), None]);
    let devices: Vec<Option<&str>> = features.oxygen.devices().collect();
    assert_eq!(devices, vec![Some("nc"), Some("hfnc")]);
    assert_eq!(
        features.datetime1,
        NaiveDate::from_ymd_opt(2020, 11, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    );
}

#[test]
fn patient_feature_set_rejects_unpaired_oxygen_lists() {
    let json = r#"{
        "o2_flow_rate_list": [2, 4],
        "o2_device_list": ["nc"],
        "needs_o2_list": [true, true]
    }"#;
    let err = serde_json::from_str::<PatientFeatureSet>(json).unwrap_err();
    assert!(
        err.to_string().contains("must be paired"),
        "unexpected error: {err}"
    );
}

#[test]
fn patient_feature_set_round_trips_through_json() {
    let features = PatientFeatureSet {
        has_chest_pain: true,
        text_list: vec!["chest pain".to_string()],
        ..PatientFeatureSet::default()
    };
    let json = serde_json::to_string(&features).unwrap();
    assert!(json.contains(r#""o2_flow_rate_list":[]"#));
    let back: PatientFeatureSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, features);
}
