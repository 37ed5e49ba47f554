use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One required line in a cart's packing plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanItem {
    pub sku: String,
    pub unit_weight_g: f64,
    pub required_quantity: u32,
    pub weight_tolerance_g: f64,
}

/// Expected contents of a single cart. SKUs are unique within a cart;
/// the plan loader enforces this.
#[derive(Debug, Clone, Deserialize)]
pub struct CartPlan {
    pub cart_id: String,
    pub cart_label: String,
    pub items: Vec<PlanItem>,
}

// ---------------------------------------------------------------------------
// Scan
// ---------------------------------------------------------------------------

/// One scanned box: the scale reading plus whatever the vision pass saw.
/// A box without a reading still counts toward the box count (and tare).
#[derive(Debug, Clone, Deserialize)]
pub struct ScannedBox {
    #[serde(default)]
    pub measured_weight_g: Option<f64>,
    #[serde(default)]
    pub detected_skus: BTreeSet<String>,
}

/// As-measured contents of a cart.
#[derive(Debug, Clone, Deserialize)]
pub struct ScannedCart {
    pub cart_id: String,
    pub boxes: Vec<ScannedBox>,
}

/// One entry in the scan batch. Records that fail to deserialize are kept
/// as `Malformed` so the run can still produce a report row for them.
#[derive(Debug, Clone)]
pub enum ScanRecord {
    Cart(ScannedCart),
    Malformed { cart_id: String, detail: String },
}

/// Pre-loaded inputs for a reconciliation run.
pub struct ReconInput {
    pub plans: HashMap<String, CartPlan>,
    pub scans: Vec<ScanRecord>,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Per-cart verdict. The wire names (`ERROR_PESO` included) are consumed by
/// downstream display layers and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CartStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "WARNING_VISUAL")]
    WarningVisual,
    #[serde(rename = "ERROR_VISUAL")]
    ErrorVisual,
    #[serde(rename = "ERROR_PESO")]
    ErrorWeight,
    #[serde(rename = "ERROR")]
    Error,
}

impl CartStatus {
    /// Severity rank for escalation: checks may raise but never lower it.
    /// ErrorVisual and ErrorWeight are siblings at the same rank.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::WarningVisual => 1,
            Self::ErrorVisual | Self::ErrorWeight => 2,
            Self::Error => 3,
        }
    }
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::WarningVisual => write!(f, "WARNING_VISUAL"),
            Self::ErrorVisual => write!(f, "ERROR_VISUAL"),
            Self::ErrorWeight => write!(f, "ERROR_PESO"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Result row for one scanned cart. Weights are rounded to 2 decimals at
/// construction; findings are append-only, ordered by generation.
#[derive(Debug, Clone, Serialize)]
pub struct CartReport {
    pub cart_id: String,
    pub status: CartStatus,
    pub box_count: usize,
    pub gross_weight_g: f64,
    pub tare_estimate_g: f64,
    pub net_weight_g: f64,
    pub findings: Vec<String>,
}

impl CartReport {
    /// A report row for a cart that failed before any weighing could happen
    /// (empty scan, malformed record).
    pub fn failed(cart_id: &str, finding: String) -> Self {
        Self {
            cart_id: cart_id.to_string(),
            status: CartStatus::Error,
            box_count: 0,
            gross_weight_g: 0.0,
            tare_estimate_g: 0.0,
            net_weight_g: 0.0,
            findings: vec![finding],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_carts: usize,
    pub ok: usize,
    pub warnings: usize,
    pub errors: usize,
    pub status_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    pub tare_per_box_g: f64,
}

/// Overall return value of a reconciliation run. Cart rows preserve scan
/// input order.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub carts: Vec<CartReport>,
}
