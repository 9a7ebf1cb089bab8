//! 設定ファイルのテスト

use part_id::config::Config;
use part_id::error::PartIdError;
use part_id_common::PerceptionResult;
use tempfile::tempdir;

#[test]
fn test_load_missing_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.uncertain_threshold, 40.0);
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.uncertain_threshold = 55.0;
    config.calibration.max_confidence = 90.0;
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_config_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"calibration":{"fallbackConfidence":20}}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.uncertain_threshold, 40.0);
    assert_eq!(config.calibration.fallback_confidence, 20.0);
    assert_eq!(config.calibration.max_confidence, 95.0);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"calibration":{"maxConfidence":150}}"#).unwrap();

    assert!(matches!(Config::load_from(&path), Err(PartIdError::Config(_))));
}

/// 上限95を超える maxConfidence は読み込み時に拒否
#[test]
fn test_max_confidence_above_ceiling_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"calibration":{"maxConfidence":100}}"#).unwrap();

    assert!(matches!(Config::load_from(&path), Err(PartIdError::Config(_))));
}

#[test]
fn test_custom_categories_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let categories = dir.path().join("categories.json");
    std::fs::write(
        &categories,
        r#"[{"name":"bicycle","keywords":["saddle","chain","pedal"],"priceRange":"£5 - £90"}]"#,
    )
    .unwrap();

    let config = Config {
        categories_file: Some(categories),
        ..Default::default()
    };
    let classifier = config.build_classifier().expect("分類器の構築失敗");

    let perception: PerceptionResult =
        serde_json::from_str(r#"{"labels":[{"description":"saddle","score":0.7}]}"#).unwrap();
    let result = classifier.classify(&perception);
    assert_eq!(result.category, "Bicycle");
    assert_eq!(result.price_range, "£5 - £90");
}

#[test]
fn test_missing_categories_file() {
    let config = Config {
        categories_file: Some("/nonexistent/categories.json".into()),
        ..Default::default()
    };
    assert!(matches!(config.category_table(), Err(PartIdError::FileNotFound(_))));
}
