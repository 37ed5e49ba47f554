use std::collections::HashMap;

use crate::classify::classify_cart;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::model::{
    CartPlan, CartReport, PlanItem, ReconInput, ReconMeta, ReconReport, ScanRecord, ScannedCart,
};
use crate::summary::compute_summary;

/// Run reconciliation over a scan batch. Every scan record yields exactly
/// one cart report, in input order; per-cart failures become ERROR rows
/// rather than aborting the run.
pub fn run(config: &ReconConfig, input: &ReconInput) -> ReconReport {
    let run_at = chrono::Utc::now().to_rfc3339();

    let carts: Vec<CartReport> = input
        .scans
        .iter()
        .map(|record| match record {
            ScanRecord::Cart(scan) => {
                classify_cart(input.plans.get(&scan.cart_id), scan, config)
            }
            ScanRecord::Malformed { cart_id, detail } => {
                CartReport::failed(cart_id, format!("malformed scan record: {detail}"))
            }
        })
        .collect();

    let summary = compute_summary(&carts);

    ReconReport {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at,
            tare_per_box_g: config.tare_per_box_g,
        },
        summary,
        carts,
    }
}

/// Load a plan CSV into the cart_id → CartPlan mapping the engine consumes.
///
/// One row per plan item, header-addressed columns `cart_id, cart_label,
/// sku, unit_weight_g, required_quantity, weight_tolerance_g` (the shape
/// the upstream plan provider exports, one row per cart/SKU pair).
pub fn load_plan_csv(csv_data: &str) -> Result<HashMap<String, CartPlan>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, ReconError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReconError::MissingColumn { column: name.into() })
    };

    let cart_id_idx = idx("cart_id")?;
    let cart_label_idx = idx("cart_label")?;
    let sku_idx = idx("sku")?;
    let unit_weight_idx = idx("unit_weight_g")?;
    let quantity_idx = idx("required_quantity")?;
    let tolerance_idx = idx("weight_tolerance_g")?;

    let mut plans: HashMap<String, CartPlan> = HashMap::new();

    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;

        let cart_id = record.get(cart_id_idx).unwrap_or("").to_string();
        let cart_label = record.get(cart_label_idx).unwrap_or("").to_string();
        let sku = record.get(sku_idx).unwrap_or("").to_string();

        let parse_f64 = |i: usize, field: &str| -> Result<f64, ReconError> {
            let value = record.get(i).unwrap_or("");
            let parsed: f64 = value.parse().map_err(|_| ReconError::NumberParse {
                cart_id: cart_id.clone(),
                sku: sku.clone(),
                field: field.into(),
                value: value.into(),
            })?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(ReconError::NegativeValue {
                    cart_id: cart_id.clone(),
                    sku: sku.clone(),
                    field: field.into(),
                });
            }
            Ok(parsed)
        };

        let unit_weight_g = parse_f64(unit_weight_idx, "unit_weight_g")?;
        let weight_tolerance_g = parse_f64(tolerance_idx, "weight_tolerance_g")?;

        let quantity_str = record.get(quantity_idx).unwrap_or("");
        let required_quantity: u32 =
            quantity_str.parse().map_err(|_| ReconError::NumberParse {
                cart_id: cart_id.clone(),
                sku: sku.clone(),
                field: "required_quantity".into(),
                value: quantity_str.into(),
            })?;

        let plan = plans.entry(cart_id.clone()).or_insert_with(|| CartPlan {
            cart_id: cart_id.clone(),
            cart_label: cart_label.clone(),
            items: Vec::new(),
        });

        if plan.items.iter().any(|it| it.sku == sku) {
            return Err(ReconError::DuplicateSku { cart_id, sku });
        }

        plan.items.push(PlanItem {
            sku,
            unit_weight_g,
            required_quantity,
            weight_tolerance_g,
        });
    }

    Ok(plans)
}

/// Load a scan batch from a JSON array of scanned carts.
///
/// A top-level parse failure is a hard error; a record that fails to
/// deserialize becomes `ScanRecord::Malformed`, keeping the serde message
/// (which names the missing or ill-typed field) so the run can report it.
pub fn load_scan_json(json_data: &str) -> Result<Vec<ScanRecord>, ReconError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json_data).map_err(|e| ReconError::ScanParse(e.to_string()))?;

    let records = values
        .into_iter()
        .map(|value| {
            let cart_id = value
                .get("cart_id")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            match serde_json::from_value::<ScannedCart>(value) {
                Ok(cart) => ScanRecord::Cart(cart),
                Err(e) => ScanRecord::Malformed { cart_id, detail: e.to_string() },
            }
        })
        .collect();

    Ok(records)
}
