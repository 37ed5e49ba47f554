use serde::Deserialize;

use crate::error::ReconError;

/// Assumed empty-box weight, in grams. Calibrated against the standard
/// catering box; override per deployment. Zero disables tare netting and
/// compares gross weight directly against the plan.
pub const DEFAULT_TARE_PER_BOX_G: f64 = 721.0;

#[derive(Debug, Clone, Deserialize)]
pub struct ReconConfig {
    #[serde(default = "default_tare")]
    pub tare_per_box_g: f64,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            tare_per_box_g: DEFAULT_TARE_PER_BOX_G,
            solver: SolverConfig::default(),
        }
    }
}

/// Bounds for the discrepancy search.
///
/// `search_radii` are tried in order; the search stops at the first radius
/// that yields a qualifying combination. `max_nodes` caps the enumeration
/// size `(2r+1)^k` of a single radius; a radius over the cap is skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_match_tolerance")]
    pub match_tolerance_g: f64,
    #[serde(default = "default_radii")]
    pub search_radii: Vec<u32>,
    #[serde(default = "default_max_nodes")]
    pub max_nodes: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            match_tolerance_g: default_match_tolerance(),
            search_radii: default_radii(),
            max_nodes: default_max_nodes(),
        }
    }
}

fn default_tare() -> f64 {
    DEFAULT_TARE_PER_BOX_G
}

fn default_match_tolerance() -> f64 {
    1.0
}

fn default_radii() -> Vec<u32> {
    vec![5, 10, 25]
}

fn default_max_nodes() -> u64 {
    50_000_000
}

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if !self.tare_per_box_g.is_finite() || self.tare_per_box_g < 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "tare_per_box_g must be finite and >= 0, got {}",
                self.tare_per_box_g
            )));
        }

        let s = &self.solver;
        if !s.match_tolerance_g.is_finite() || s.match_tolerance_g <= 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "solver.match_tolerance_g must be > 0, got {}",
                s.match_tolerance_g
            )));
        }
        if s.search_radii.is_empty() {
            return Err(ReconError::ConfigValidation(
                "solver.search_radii must not be empty".into(),
            ));
        }
        if s.search_radii.iter().any(|&r| r == 0) {
            return Err(ReconError::ConfigValidation(
                "solver.search_radii entries must be >= 1".into(),
            ));
        }
        if s.search_radii.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ReconError::ConfigValidation(
                "solver.search_radii must be strictly increasing".into(),
            ));
        }
        if s.max_nodes == 0 {
            return Err(ReconError::ConfigValidation(
                "solver.max_nodes must be >= 1".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
