use std::path::PathBuf;

use galleycheck_recon::engine::{load_plan_csv, load_scan_json};
use galleycheck_recon::{run, CartStatus, ReconConfig, ReconInput, ReconReport};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_and_run() -> ReconReport {
    let dir = fixtures_dir();

    let config_str = std::fs::read_to_string(dir.join("recon.toml")).unwrap();
    let config = ReconConfig::from_toml(&config_str).unwrap();

    let plan_csv = std::fs::read_to_string(dir.join("plan.csv")).unwrap();
    let plans = load_plan_csv(&plan_csv).unwrap();

    let scan_json = std::fs::read_to_string(dir.join("scans.json")).unwrap();
    let scans = load_scan_json(&scan_json).unwrap();

    run(&config, &ReconInput { plans, scans })
}

#[test]
fn fixture_batch_statuses() {
    let report = load_and_run();

    assert_eq!(report.carts.len(), 6);
    assert_eq!(report.meta.tare_per_box_g, 721.0);

    // CART-001: two boxes, gross 2742 nets to 1300, exactly the plan total.
    let c1 = &report.carts[0];
    assert_eq!(c1.cart_id, "CART-001");
    assert_eq!(c1.status, CartStatus::Ok);
    assert_eq!(c1.box_count, 2);
    assert_eq!(c1.tare_estimate_g, 1442.0);
    assert_eq!(c1.net_weight_g, 1300.0);

    // CART-002: nets to 2500 against 3000 ± 12, one 500g bottle short.
    let c2 = &report.carts[1];
    assert_eq!(c2.status, CartStatus::ErrorWeight);
    assert!(c2
        .findings
        .contains(&"suggestion: missing 1 water_500ml".to_string()));

    // CART-003: weight in range but an off-plan product was seen.
    let c3 = &report.carts[2];
    assert_eq!(c3.status, CartStatus::ErrorVisual);
    assert!(c3.findings[0].contains("coffee_pods"));

    // CART-999: scanned but absent from the plan.
    let c999 = &report.carts[3];
    assert_eq!(c999.status, CartStatus::Error);
    assert!(c999.findings.contains(&"cart not in plan".to_string()));

    // CART-004: record has no boxes field at all.
    let c4 = &report.carts[4];
    assert_eq!(c4.status, CartStatus::Error);
    assert!(c4.findings[0].starts_with("malformed scan record:"));
    assert!(c4.findings[0].contains("boxes"));

    // CART-005: empty boxes list.
    let c5 = &report.carts[5];
    assert_eq!(c5.status, CartStatus::Error);
    assert_eq!(c5.findings, vec!["no boxes scanned".to_string()]);

    assert_eq!(report.summary.total_carts, 6);
    assert_eq!(report.summary.ok, 1);
    assert_eq!(report.summary.warnings, 0);
    assert_eq!(report.summary.errors, 5);
}

#[test]
fn report_json_schema() {
    let report = load_and_run();
    let json = serde_json::to_value(&report).unwrap();

    let meta = &json["meta"];
    assert!(meta["engine_version"].is_string());
    assert!(meta["run_at"].is_string());
    assert!(meta["tare_per_box_g"].is_number());

    let summary = &json["summary"];
    for field in ["total_carts", "ok", "warnings", "errors"] {
        assert!(
            summary[field].is_number(),
            "summary.{} must be a number, got {:?}",
            field,
            summary[field]
        );
    }
    assert!(summary["status_counts"].is_object());

    for cart in json["carts"].as_array().unwrap() {
        assert!(cart["cart_id"].is_string());
        assert!(cart["status"].is_string());
        assert!(cart["box_count"].is_number());
        assert!(cart["gross_weight_g"].is_number());
        assert!(cart["tare_estimate_g"].is_number());
        assert!(cart["net_weight_g"].is_number());
        assert!(cart["findings"].is_array());
    }

    // Wire names are a display-layer contract.
    assert_eq!(json["carts"][1]["status"], "ERROR_PESO");
    assert_eq!(json["carts"][2]["status"], "ERROR_VISUAL");
    assert_eq!(json["summary"]["status_counts"]["ERROR"], 3);
}

#[test]
fn repeat_runs_are_stable() {
    let a = load_and_run();
    let b = load_and_run();

    for (left, right) in a.carts.iter().zip(&b.carts) {
        assert_eq!(left.status, right.status);
        assert_eq!(left.findings, right.findings);
    }
}
