use crate::aggregate::{aggregate_plan, aggregate_scan};
use crate::config::ReconConfig;
use crate::model::{CartPlan, CartReport, CartStatus, ScannedCart};
use crate::netting::{net_weight, round2};
use crate::solver;

/// Run the escalating checks for one scanned cart against its plan.
///
/// Check order is part of the report contract: data-quality notes first,
/// then the visual comparison, then the weight comparison. Each check may
/// raise the status but never lowers it; when both a visual error and a
/// weight error apply, the status stays ERROR_VISUAL (the wrong-product
/// detection is the primary problem) and both findings are appended.
pub fn classify_cart(
    plan: Option<&CartPlan>,
    scan: &ScannedCart,
    config: &ReconConfig,
) -> CartReport {
    if scan.boxes.is_empty() {
        return CartReport::failed(&scan.cart_id, "no boxes scanned".into());
    }

    let totals = aggregate_scan(scan);
    let weight = net_weight(totals.gross_weight_g, totals.box_count, config.tare_per_box_g);

    let mut report = CartReport {
        cart_id: scan.cart_id.clone(),
        status: CartStatus::Ok,
        box_count: totals.box_count,
        gross_weight_g: round2(weight.gross_g),
        tare_estimate_g: round2(weight.tare_g),
        net_weight_g: round2(weight.net_g),
        findings: Vec::new(),
    };

    // Boxes without a scale reading are a data-quality note, not a status
    // escalation; they still contributed to box count and tare.
    for i in &totals.unweighed_boxes {
        report
            .findings
            .push(format!("box {} has no measured weight", i + 1));
    }

    let Some(plan) = plan else {
        report.status = CartStatus::Error;
        report.findings.push("cart not in plan".into());
        return report;
    };

    let plan_totals = aggregate_plan(plan);

    // Visual check: detected vs expected SKU sets. BTreeSet differences come
    // out sorted, which keeps the finding text deterministic.
    let unexpected: Vec<&str> = totals
        .detected_skus
        .difference(&plan_totals.expected_skus)
        .map(String::as_str)
        .collect();
    let not_seen: Vec<&str> = plan_totals
        .expected_skus
        .difference(&totals.detected_skus)
        .map(String::as_str)
        .collect();

    if !unexpected.is_empty() {
        report.status = CartStatus::ErrorVisual;
        report.findings.push(format!(
            "unexpected products detected: [{}]",
            unexpected.join(", ")
        ));
    }
    if !not_seen.is_empty() {
        if report.status == CartStatus::Ok {
            report.status = CartStatus::WarningVisual;
        }
        report.findings.push(format!(
            "expected products not seen: [{}]",
            not_seen.join(", ")
        ));
    }

    // Weight check against the plan's acceptable range.
    let min_expected = plan_totals.expected_weight_g - plan_totals.tolerance_g;
    let max_expected = plan_totals.expected_weight_g + plan_totals.tolerance_g;

    if report.net_weight_g < min_expected || report.net_weight_g > max_expected {
        // ERROR_VISUAL outranks ERROR_PESO; only OK/WARNING_VISUAL escalate.
        if matches!(report.status, CartStatus::Ok | CartStatus::WarningVisual) {
            report.status = CartStatus::ErrorWeight;
        }

        let gap = round2(plan_totals.expected_weight_g - report.net_weight_g);
        let direction = if gap > 0.0 { "missing" } else { "extra" };
        report.findings.push(format!(
            "net weight discrepancy: {direction} {:.2} g (expected {:.2} g, range {:.2} g to {:.2} g, measured net {:.2} g)",
            gap.abs(),
            plan_totals.expected_weight_g,
            min_expected,
            max_expected,
            report.net_weight_g,
        ));

        let suggestion = solver::solve(gap, &plan_totals.sku_weights, &config.solver);
        report.findings.push(suggestion.to_string());
    }

    if report.status == CartStatus::Ok {
        report.findings.push(format!(
            "cart validated: net weight {:.2} g (expected {:.2} g)",
            report.net_weight_g, plan_totals.expected_weight_g,
        ));
    }

    report
}
