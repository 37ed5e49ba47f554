//! Bounded brute-force search for the cheapest per-SKU unit-count
//! adjustment that explains a weight gap.
//!
//! The enumeration is O((2r+1)^k) in the number of plan SKUs k, which is
//! only tractable for small k. That is deliberate: catering cart plans
//! hold a handful of SKUs. `SolverConfig::max_nodes` skips any radius
//! whose enumeration would exceed the budget.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::SolverConfig;

/// One suggested unit-count adjustment. Positive `delta` means units are
/// missing from the cart, negative means extra units are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuDelta {
    pub sku: String,
    pub delta: i64,
}

/// Outcome of a discrepancy search. `Display` renders the operator-facing
/// finding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    Adjustments(Vec<SkuDelta>),
    NoPlanItems,
    Unidentified,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adjustments(deltas) if deltas.is_empty() => {
                write!(f, "no simple cause found for the discrepancy")
            }
            Self::Adjustments(deltas) => {
                write!(f, "suggestion: ")?;
                for (i, d) in deltas.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if d.delta > 0 {
                        write!(f, "missing {} {}", d.delta, d.sku)?;
                    } else {
                        write!(f, "extra {} {}", -d.delta, d.sku)?;
                    }
                }
                Ok(())
            }
            Self::NoPlanItems => {
                write!(f, "weight discrepancy not identified (no items in plan)")
            }
            Self::Unidentified => write!(f, "complex weight discrepancy not identified"),
        }
    }
}

/// Search for the minimal-cost integer combination of per-SKU deltas whose
/// weighted sum reproduces `gap_g` within `match_tolerance_g`.
///
/// Radii escalate in configured order and the search stops at the first
/// radius with any qualifying vector, so a cheap radius-5 answer is never
/// displaced by something found at radius 10 or 25. Ties on cost keep the
/// first vector in enumeration order (SKUs sorted, last varying fastest);
/// that order is an artifact, not a preference.
pub fn solve(gap_g: f64, sku_weights: &BTreeMap<String, f64>, config: &SolverConfig) -> Suggestion {
    if sku_weights.is_empty() {
        return Suggestion::NoPlanItems;
    }

    let items: Vec<(&str, f64)> = sku_weights.iter().map(|(s, w)| (s.as_str(), *w)).collect();

    for &radius in &config.search_radii {
        if enumeration_size(radius, items.len()) > config.max_nodes {
            continue;
        }
        if let Some(coeffs) =
            search_radius(gap_g, &items, i64::from(radius), config.match_tolerance_g)
        {
            let deltas = items
                .iter()
                .zip(coeffs)
                .filter(|(_, delta)| *delta != 0)
                .map(|(&(sku, _), delta)| SkuDelta { sku: sku.to_string(), delta })
                .collect();
            return Suggestion::Adjustments(deltas);
        }
    }

    Suggestion::Unidentified
}

/// (2r+1)^k, saturating on overflow.
fn enumeration_size(radius: u32, k: usize) -> u64 {
    let span = u64::from(2 * radius + 1);
    let mut size: u64 = 1;
    for _ in 0..k {
        size = match size.checked_mul(span) {
            Some(n) => n,
            None => return u64::MAX,
        };
    }
    size
}

/// Exhaustive scan of all delta vectors with components in [-radius, radius],
/// excluding the all-zero vector. Returns the minimal-cost qualifying vector,
/// first-encountered on ties.
fn search_radius(
    gap_g: f64,
    items: &[(&str, f64)],
    radius: i64,
    tolerance_g: f64,
) -> Option<Vec<i64>> {
    let k = items.len();
    let mut coeffs = vec![-radius; k];
    let mut best: Option<(u64, Vec<i64>)> = None;

    loop {
        if coeffs.iter().any(|&c| c != 0) {
            let sum: f64 = coeffs
                .iter()
                .zip(items)
                .map(|(&c, &(_, weight))| c as f64 * weight)
                .sum();
            if (sum - gap_g).abs() < tolerance_g {
                let cost: u64 = coeffs.iter().map(|c| c.unsigned_abs()).sum();
                if best.as_ref().map_or(true, |(best_cost, _)| cost < *best_cost) {
                    best = Some((cost, coeffs.clone()));
                }
            }
        }

        // Odometer advance: last component fastest.
        let mut i = k;
        loop {
            if i == 0 {
                return best.map(|(_, v)| v);
            }
            i -= 1;
            if coeffs[i] < radius {
                coeffs[i] += 1;
                for c in &mut coeffs[i + 1..] {
                    *c = -radius;
                }
                break;
            }
        }
    }
}
