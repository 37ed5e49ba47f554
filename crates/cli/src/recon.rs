//! `galleycheck run` / `galleycheck validate`: cart reconciliation from
//! a plan CSV and a scan-batch JSON file.

use std::path::{Path, PathBuf};

use galleycheck_recon::{ReconConfig, ReconInput, ReconReport};

use crate::exit_codes::{EXIT_RECON_INVALID_CONFIG, EXIT_RECON_MISMATCH, EXIT_RECON_RUNTIME};
use crate::CliError;

fn recon_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Load config (defaults when no file given), load inputs, run the engine.
pub fn build_report(
    plan_path: &Path,
    scans_path: &Path,
    config_path: Option<&Path>,
) -> Result<ReconReport, CliError> {
    let config = load_config(config_path)?;

    let plan_csv = std::fs::read_to_string(plan_path).map_err(|e| {
        recon_err(EXIT_RECON_RUNTIME, format!("cannot read {}: {e}", plan_path.display()))
    })?;
    let plans = galleycheck_recon::engine::load_plan_csv(&plan_csv)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.to_string()))?;

    let scan_json = std::fs::read_to_string(scans_path).map_err(|e| {
        recon_err(EXIT_RECON_RUNTIME, format!("cannot read {}: {e}", scans_path.display()))
    })?;
    let scans = galleycheck_recon::engine::load_scan_json(&scan_json)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, e.to_string()))?;

    Ok(galleycheck_recon::run(&config, &ReconInput { plans, scans }))
}

fn load_config(config_path: Option<&Path>) -> Result<ReconConfig, CliError> {
    match config_path {
        None => Ok(ReconConfig::default()),
        Some(path) => {
            let config_str = std::fs::read_to_string(path).map_err(|e| {
                recon_err(EXIT_RECON_RUNTIME, format!("cannot read {}: {e}", path.display()))
            })?;
            ReconConfig::from_toml(&config_str)
                .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))
        }
    }
}

pub fn cmd_run(
    plan_path: PathBuf,
    scans_path: PathBuf,
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let report = build_report(&plan_path, &scans_path, config_path.as_deref())?;

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| recon_err(EXIT_RECON_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "recon: {} carts: {} ok, {} warnings, {} errors (tare {} g/box)",
        s.total_carts, s.ok, s.warnings, s.errors, report.meta.tare_per_box_g,
    );

    if s.errors > 0 {
        return Err(recon_err(EXIT_RECON_MISMATCH, "cart errors found"));
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
        recon_err(EXIT_RECON_RUNTIME, format!("cannot read {}: {e}", config_path.display()))
    })?;

    let config = ReconConfig::from_toml(&config_str)
        .map_err(|e| recon_err(EXIT_RECON_INVALID_CONFIG, e.to_string()))?;

    eprintln!(
        "config ok: tare {} g/box, solver radii {:?}, match tolerance {} g",
        config.tare_per_box_g, config.solver.search_radii, config.solver.match_tolerance_g,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const PLAN_CSV: &str = "\
cart_id,cart_label,sku,unit_weight_g,required_quantity,weight_tolerance_g
c1,Front galley,juice,250.0,2,10.0
";

    #[test]
    fn build_report_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_file(&dir, "plan.csv", PLAN_CSV);
        let scans = write_file(
            &dir,
            "scans.json",
            r#"[{"cart_id": "c1", "boxes": [{"measured_weight_g": 500.0, "detected_skus": ["juice"]}]}]"#,
        );
        let config = write_file(&dir, "recon.toml", "tare_per_box_g = 0.0\n");

        let report = build_report(&plan, &scans, Some(&config)).unwrap();
        assert_eq!(report.summary.total_carts, 1);
        assert_eq!(report.summary.ok, 1);
    }

    #[test]
    fn build_report_missing_plan_file() {
        let dir = tempfile::tempdir().unwrap();
        let scans = write_file(&dir, "scans.json", "[]");
        let err = build_report(&dir.path().join("nope.csv"), &scans, None).unwrap_err();
        assert_eq!(err.code, EXIT_RECON_RUNTIME);
        assert!(err.message.contains("nope.csv"));
    }

    #[test]
    fn build_report_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_file(&dir, "plan.csv", PLAN_CSV);
        let scans = write_file(&dir, "scans.json", "[]");
        let config = write_file(&dir, "recon.toml", "tare_per_box_g = -5.0\n");
        let err = build_report(&plan, &scans, Some(&config)).unwrap_err();
        assert_eq!(err.code, EXIT_RECON_INVALID_CONFIG);
    }

    #[test]
    fn run_exits_mismatch_on_cart_errors() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_file(&dir, "plan.csv", PLAN_CSV);
        let scans = write_file(
            &dir,
            "scans.json",
            r#"[{"cart_id": "unplanned", "boxes": [{"measured_weight_g": 1.0}]}]"#,
        );
        let config = write_file(&dir, "recon.toml", "tare_per_box_g = 0.0\n");

        let err = cmd_run(plan, scans, Some(config), false, None).unwrap_err();
        assert_eq!(err.code, EXIT_RECON_MISMATCH);
    }

    #[test]
    fn run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let plan = write_file(&dir, "plan.csv", PLAN_CSV);
        let scans = write_file(
            &dir,
            "scans.json",
            r#"[{"cart_id": "c1", "boxes": [{"measured_weight_g": 500.0, "detected_skus": ["juice"]}]}]"#,
        );
        let config = write_file(&dir, "recon.toml", "tare_per_box_g = 0.0\n");
        let out = dir.path().join("report.json");

        cmd_run(plan, scans, Some(config), false, Some(out.clone())).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["carts"][0]["status"], "OK");
        assert_eq!(value["summary"]["total_carts"], 1);
    }

    #[test]
    fn validate_accepts_good_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(&dir, "recon.toml", "[solver]\nsearch_radii = [5, 10]\n");
        cmd_validate(config).unwrap();
    }

    #[test]
    fn validate_rejects_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_file(&dir, "recon.toml", "[solver]\nsearch_radii = []\n");
        let err = cmd_validate(config).unwrap_err();
        assert_eq!(err.code, EXIT_RECON_INVALID_CONFIG);
    }
}
