use std::collections::{BTreeMap, BTreeSet};

use crate::model::{CartPlan, ScannedCart};
use crate::netting::round2;

/// Totals derived from a cart's plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTotals {
    pub expected_weight_g: f64,
    pub tolerance_g: f64,
    pub expected_skus: BTreeSet<String>,
    pub sku_weights: BTreeMap<String, f64>,
}

/// Sum the plan into expected net weight, aggregate tolerance, and the
/// per-SKU unit weights the discrepancy solver searches over.
///
/// An empty plan is degenerate but valid: zero weight, zero tolerance,
/// empty SKU set.
pub fn aggregate_plan(plan: &CartPlan) -> PlanTotals {
    let mut expected_weight_g = 0.0;
    let mut tolerance_g = 0.0;
    let mut expected_skus = BTreeSet::new();
    let mut sku_weights = BTreeMap::new();

    for item in &plan.items {
        expected_weight_g += item.unit_weight_g * f64::from(item.required_quantity);
        tolerance_g += item.weight_tolerance_g;
        expected_skus.insert(item.sku.clone());
        sku_weights.insert(item.sku.clone(), item.unit_weight_g);
    }

    PlanTotals {
        expected_weight_g: round2(expected_weight_g),
        tolerance_g: round2(tolerance_g),
        expected_skus,
        sku_weights,
    }
}

/// Totals derived from a cart's scanned boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanTotals {
    pub box_count: usize,
    pub gross_weight_g: f64,
    pub detected_skus: BTreeSet<String>,
    /// Zero-based indices of boxes that arrived without a scale reading.
    /// They still count toward `box_count` (and therefore tare).
    pub unweighed_boxes: Vec<usize>,
}

/// Sum box weights and union detected SKU sets across a cart's boxes.
pub fn aggregate_scan(scan: &ScannedCart) -> ScanTotals {
    let mut gross_weight_g = 0.0;
    let mut detected_skus = BTreeSet::new();
    let mut unweighed_boxes = Vec::new();

    for (i, b) in scan.boxes.iter().enumerate() {
        match b.measured_weight_g {
            Some(w) => gross_weight_g += w,
            None => unweighed_boxes.push(i),
        }
        detected_skus.extend(b.detected_skus.iter().cloned());
    }

    ScanTotals {
        box_count: scan.boxes.len(),
        gross_weight_g,
        detected_skus,
        unweighed_boxes,
    }
}
