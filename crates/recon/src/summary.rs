use std::collections::HashMap;

use crate::model::{CartReport, CartStatus, ReconSummary};

/// Compute summary counts from the finished cart reports.
pub fn compute_summary(carts: &[CartReport]) -> ReconSummary {
    let mut status_counts: HashMap<String, usize> = HashMap::new();
    let mut ok = 0;
    let mut warnings = 0;
    let mut errors = 0;

    for c in carts {
        *status_counts.entry(c.status.to_string()).or_insert(0) += 1;

        match c.status {
            CartStatus::Ok => ok += 1,
            CartStatus::WarningVisual => warnings += 1,
            CartStatus::ErrorVisual | CartStatus::ErrorWeight | CartStatus::Error => errors += 1,
        }
    }

    ReconSummary {
        total_carts: carts.len(),
        ok,
        warnings,
        errors,
        status_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: CartStatus) -> CartReport {
        CartReport {
            cart_id: "c".into(),
            status,
            box_count: 1,
            gross_weight_g: 0.0,
            tare_estimate_g: 0.0,
            net_weight_g: 0.0,
            findings: vec![],
        }
    }

    #[test]
    fn summary_counts() {
        let carts = vec![
            report(CartStatus::Ok),
            report(CartStatus::Ok),
            report(CartStatus::WarningVisual),
            report(CartStatus::ErrorWeight),
            report(CartStatus::Error),
        ];
        let summary = compute_summary(&carts);
        assert_eq!(summary.total_carts, 5);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.status_counts["OK"], 2);
        assert_eq!(summary.status_counts["ERROR_PESO"], 1);
    }
}
