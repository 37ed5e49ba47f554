//! `galleycheck-recon`: catering cart plan-vs-scan reconciliation engine.
//!
//! Pure engine crate: receives a plan (expected cart contents) and a scan
//! batch (measured box weights + visually detected item types), returns a
//! per-cart report. No CLI dependencies; the only IO-adjacent surface is a
//! pair of string-based loaders for the plan CSV and the scan JSON.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod netting;
pub mod solver;
pub mod summary;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{CartPlan, CartReport, CartStatus, ReconInput, ReconReport, ScanRecord, ScannedCart};
