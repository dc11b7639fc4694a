//! Config tests: defaults, validation and JSON loading.

use dashboard_core::{config::DEFAULT_SEED, DashboardConfig, DashboardError};
use std::path::PathBuf;

fn write_tmp(name: &str, content: &str) -> PathBuf {
    let dir = PathBuf::from("target/test_out/config");
    std::fs::create_dir_all(&dir).expect("create tmp dir");
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write tmp config");
    path
}

#[test]
fn defaults_match_the_reference_dashboard() {
    let config = DashboardConfig::default();

    assert_eq!(config.seed, DEFAULT_SEED);
    assert_eq!(config.seed, 42);
    assert_eq!(config.synthesis.monthly_sales.mean, 10_000.0);
    assert_eq!(config.synthesis.monthly_sales.std_dev, 2_000.0);
    assert_eq!(config.synthesis.monthly_target, 10_000.0);
    assert_eq!(config.synthesis.product_sales.mean, 5_000.0);
    assert_eq!(config.synthesis.product_sales.std_dev, 1_000.0);
    assert_eq!((config.synthesis.cost_factor.low, config.synthesis.cost_factor.high), (0.4, 0.6));
    assert_eq!((config.synthesis.customers.low, config.synthesis.customers.high), (1_000, 3_000));
    assert_eq!((config.synthesis.satisfaction.low, config.synthesis.satisfaction.high), (7.0, 9.5));
    assert_eq!((config.render.width, config.render.height), (1000, 1200));
    assert!(config.validate().is_ok());
}

#[test]
fn non_positive_std_dev_is_rejected() {
    let mut config = DashboardConfig::default();
    config.synthesis.monthly_sales.std_dev = 0.0;

    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        DashboardError::InvalidConfig { field: "synthesis.monthly_sales", .. }
    ));
}

#[test]
fn empty_ranges_are_rejected() {
    let mut config = DashboardConfig::default();
    config.synthesis.satisfaction.low = 9.5;
    assert!(matches!(
        config.validate().unwrap_err(),
        DashboardError::InvalidConfig { field: "synthesis.satisfaction", .. }
    ));

    let mut config = DashboardConfig::default();
    config.synthesis.customers.high = config.synthesis.customers.low;
    assert!(matches!(
        config.validate().unwrap_err(),
        DashboardError::InvalidConfig { field: "synthesis.customers", .. }
    ));
}

#[test]
fn cost_factor_must_keep_cost_below_sales() {
    let mut config = DashboardConfig::default();
    config.synthesis.cost_factor.high = 1.5;

    assert!(matches!(
        config.validate().unwrap_err(),
        DashboardError::InvalidConfig { field: "synthesis.cost_factor", .. }
    ));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let mut config = DashboardConfig::default();
    config.render.width = 0;

    assert!(matches!(
        config.validate().unwrap_err(),
        DashboardError::InvalidConfig { field: "render", .. }
    ));
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let path = write_tmp(
        "partial.json",
        r#"{ "seed": 7, "render": { "title": "Relatório" } }"#,
    );
    let config = DashboardConfig::load(path.to_str().unwrap()).expect("load partial config");

    assert_eq!(config.seed, 7);
    assert_eq!(config.render.title, "Relatório");
    assert_eq!(config.render.width, 1000);
    assert_eq!(config.synthesis, DashboardConfig::default().synthesis);
}

#[test]
fn invalid_values_in_file_fail_to_load() {
    let path = write_tmp(
        "invalid.json",
        r#"{ "synthesis": { "product_sales": { "mean": 5000.0, "std_dev": -1.0 } } }"#,
    );
    let err = DashboardConfig::load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("synthesis.product_sales"), "{err}");
}

#[test]
fn missing_file_reports_path() {
    let err = DashboardConfig::load("target/test_out/config/does-not-exist.json").unwrap_err();
    assert!(err.to_string().contains("does-not-exist.json"), "{err}");
}

#[test]
fn config_round_trips_through_json() {
    let config = DashboardConfig::default_test();
    let json = serde_json::to_string(&config).unwrap();
    let back: DashboardConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
