/// Gross measurement split into estimated packaging tare and net content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetWeight {
    pub gross_g: f64,
    pub tare_g: f64,
    pub net_g: f64,
}

/// Subtract the estimated box tare from a gross measurement.
///
/// Net weight is clamped at zero: a reading below the tare estimate means
/// the estimate is off, not that the cart holds negative content. A zero
/// `tare_per_box_g` disables netting and yields a gross-only comparison.
pub fn net_weight(gross_g: f64, box_count: usize, tare_per_box_g: f64) -> NetWeight {
    let tare_g = box_count as f64 * tare_per_box_g;
    NetWeight {
        gross_g,
        tare_g,
        net_g: (gross_g - tare_g).max(0.0),
    }
}

/// Round to 2 decimal places for report fields and finding text.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
