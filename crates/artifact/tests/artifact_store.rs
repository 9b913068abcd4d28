//! Save / load tests for model artifacts

use std::fs;

use anomaly_core::{AnomalyDetector, IsolationForest, IsolationForestConfig};
use artifact::{ArtifactLoadError, ArtifactSaveError, ModelArtifact, TrainingSummary, FORMAT_VERSION};
use chrono::{NaiveDate, TimeZone, Utc};
use features_api::FeatureConfig;
use features_core::{FeatureEngineer, FeatureRanges, GeoIndex};
use features_spi::{OrderRecord, ZipPrefix};
use regressor_core::{evaluate, GradientBoostingConfig, GradientBoostingRegressor, Regressor};

fn zip(v: u32) -> ZipPrefix {
    ZipPrefix::new(v).unwrap()
}

fn records() -> Vec<OrderRecord> {
    let customers = [(1037, "SP"), (20040, "RJ"), (30110, "MG")];
    (0..60)
        .map(|i| {
            let (customer, state) = customers[i % 3];
            let purchased = NaiveDate::from_ymd_opt(2017, 1 + (i % 12) as u32, 1 + (i % 27) as u32)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap();
            OrderRecord {
                order_id: format!("order-{i}"),
                purchased_at: purchased,
                approved_at: None,
                estimated_delivery_at: None,
                delivered_at: Some(purchased + chrono::Duration::days(3 + (i % 3) as i64 * 5)),
                price: 50.0 + i as f64,
                freight_value: 10.0 + (i % 7) as f64,
                product_category: Some(["bebes", "esporte_lazer"][i % 2].to_string()),
                product_weight_g: Some(300.0 + 10.0 * i as f64),
                product_vol_cm3: 1000.0 + 50.0 * i as f64,
                customer_zip_prefix: zip(customer),
                customer_state: state.to_string(),
                seller_zip_prefix: zip(1037),
                seller_state: "SP".to_string(),
            }
        })
        .collect()
}

fn geo() -> GeoIndex {
    let mut builder = GeoIndex::builder();
    builder.add(zip(1037), -23.55, -46.63, "SP");
    builder.add(zip(20040), -22.91, -43.17, "RJ");
    builder.add(zip(30110), -19.92, -43.94, "MG");
    builder.build()
}

fn artifact() -> ModelArtifact {
    let records = records();
    let fitted = FeatureEngineer::fit(&records, geo(), FeatureConfig::default()).unwrap();
    let rows = fitted.training_set.rows();
    let targets = &fitted.training_set.targets;

    let mut anomaly = IsolationForest::new(IsolationForestConfig::default().with_trees(10));
    anomaly.fit(&rows).unwrap();

    let mut regressor = GradientBoostingRegressor::new(
        GradientBoostingConfig::new(20, 0.1).with_early_stopping(None),
    );
    regressor.fit(&rows, targets).unwrap();
    let predicted = regressor.predict(&rows).unwrap();

    let ranges = FeatureRanges::fit(&fitted.training_set.vectors, 0.01, 0.99);
    let summary = TrainingSummary {
        total_records: records.len(),
        training_records: fitted.training_set.len(),
        anomalies_flagged: 0,
        regressor_records: fitted.training_set.len(),
        exclusions: fitted.exclusions,
        trained_at: Utc.with_ymd_and_hms(2018, 9, 1, 12, 0, 0).unwrap(),
    };
    ModelArtifact::new(
        fitted.engineer,
        anomaly,
        regressor,
        ranges,
        evaluate(targets, &predicted, 3.0),
        summary,
    )
}

#[test]
fn test_save_then_load_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("delivery_model.json");
    let original = artifact();

    original.save(&path).unwrap();
    let loaded = ModelArtifact::load(&path).unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loaded.format_version, FORMAT_VERSION);
    assert!(!dir.path().join("models").join("delivery_model.json.partial").exists());
}

#[test]
fn test_failed_save_leaves_no_staging_file() {
    let dir = tempfile::tempdir().unwrap();
    // a directory at the target path makes the final rename fail
    let path = dir.path().join("model.json");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep.txt"), b"x").unwrap();

    let err = artifact().save(&path).unwrap_err();
    assert!(matches!(err, ArtifactSaveError::Io { .. }));
    assert!(!dir.path().join("model.json.partial").exists());
    assert!(path.join("keep.txt").exists());
}

#[test]
fn test_loaded_artifact_predicts_like_original() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let original = artifact();
    original.save(&path).unwrap();
    let loaded = ModelArtifact::load(&path).unwrap();

    let row = vec![350.0, 11.0, 4.0, 1.0, 1.0, 1.0, 1.0, 8.0, 80.0, 12.0, 500.0, 2000.0, 1.0];
    assert_eq!(
        original.regressor.predict_one(&row).unwrap(),
        loaded.regressor.predict_one(&row).unwrap()
    );
    assert_eq!(
        original.anomaly.score(&row).unwrap(),
        loaded.anomaly.score(&row).unwrap()
    );
}

#[test]
fn test_feature_importance_ranking() {
    let ranking = artifact().feature_importance().unwrap();
    assert_eq!(ranking.len(), 13);
    assert!(ranking.windows(2).all(|w| w[0].importance >= w[1].importance));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelArtifact::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ArtifactLoadError::Io { .. }));
}

#[test]
fn test_garbage_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, b"{\"format_version\": 1, \"schema\": ").unwrap();
    assert!(matches!(
        ModelArtifact::load(&path).unwrap_err(),
        ArtifactLoadError::Corrupt { .. }
    ));
}

#[test]
fn test_future_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut value = serde_json::to_value(artifact()).unwrap();
    value["format_version"] = serde_json::json!(FORMAT_VERSION + 1);
    fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

    match ModelArtifact::load(&path).unwrap_err() {
        ArtifactLoadError::IncompatibleVersion { found, expected } => {
            assert_eq!(found, FORMAT_VERSION + 1);
            assert_eq!(expected, FORMAT_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_schema_mismatch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut value = serde_json::to_value(artifact()).unwrap();
    value["schema"]["names"][0] = serde_json::json!("haversine_miles");
    fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

    assert!(matches!(
        ModelArtifact::load(&path).unwrap_err(),
        ArtifactLoadError::SchemaMismatch { .. }
    ));
}

#[test]
fn test_truncated_body_with_valid_header_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let mut value = serde_json::to_value(artifact()).unwrap();
    value.as_object_mut().unwrap().remove("regressor");
    fs::write(&path, serde_json::to_vec(&value).unwrap()).unwrap();

    assert!(matches!(
        ModelArtifact::load(&path).unwrap_err(),
        ArtifactLoadError::Corrupt { .. }
    ));
}
