//! Loading engine documents from disk and running them through a pipeline

use std::{fs, sync::Arc};

use chrono::NaiveDate;
use tempfile::TempDir;
use vitalguard_core::{
    time::FixedTime, traits::DiscardSink, PatientProfile, RiskAssessmentPipeline, VitalSigns,
};
use vitalguard_schemas::{
    load_from_path, respiratory_risk_v1, ConfigError, ConfigRegistry, PartitionDoc,
};

#[test]
fn saved_document_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("respiratory_risk_v2.json");

    let mut doc = respiratory_risk_v1().unwrap();
    doc.version = "v2".to_string();
    doc.consequent.partition = Some(PartitionDoc::Custom(vec![
        "low".into(),
        "medium".into(),
        "high".into(),
    ]));
    fs::write(&path, doc.to_json().unwrap()).unwrap();

    let loaded = load_from_path(&path).unwrap();
    assert_eq!(loaded, doc);

    let registry = ConfigRegistry::new();
    registry.load_builtin().unwrap();
    registry.register(loaded).unwrap();
    assert_eq!(
        registry.latest_name("respiratory_risk").unwrap(),
        "respiratory_risk_v2"
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    match load_from_path(&path) {
        Err(ConfigError::Io { path: reported, .. }) => assert!(reported.ends_with("absent.json")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"name": "broken", "version": "v1"}"#).unwrap();

    assert!(matches!(load_from_path(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn registry_engine_drives_pipeline() {
    let registry = ConfigRegistry::new();
    registry.load_builtin().unwrap();
    let engine = registry.latest_engine("respiratory_risk").unwrap();

    // 2025-03-01T00:00:00Z
    let pipeline = RiskAssessmentPipeline::builder(Arc::clone(&engine))
        .build(DiscardSink, FixedTime::new(1_740_787_200_000))
        .unwrap();

    let patient = PatientProfile::new("doc-1", NaiveDate::from_ymd_opt(1980, 1, 1));
    let vitals = VitalSigns::new(30.0, 120.0, 90.0, 38.5, 10.0, 4.0).unwrap();
    let report = pipeline.assess(vitals, &patient).unwrap();

    assert!(report.risk_score().is_some());
    assert!(report.alert_raised());
    assert_eq!(report.violations().len(), 3);
}
