//! # PSI Engine
//!
//! Population Stability Index for monitoring feature drift.
//!
//! ## Theory
//!
//! PSI compares a baseline sample against a comparison sample of the
//! same feature. Both are binned over the same edges, turned into
//! fractional densities `p` and `q`, and reduced to
//!
//! ```text
//! PSI = Σ (p_i - q_i) · ln(p_i / q_i)
//! ```
//!
//! Empty bins are floored to `0.0001` so the logarithm stays finite.
//! Categorical samples get one bin per distinct category.
//!
//! Conventional reading (left to the caller):
//! - `< 0.1`: no significant change
//! - `0.1 - 0.2`: moderate change
//! - `> 0.2`: significant change
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `wasm`: WebAssembly bindings via wasm-bindgen
//!
//! ## Example
//!
//! ```rust
//! use psi_engine::{compute_psi, DriftLevel, PsiConfig};
//!
//! let baseline: Vec<f64> = (0..1000).map(|i| (i % 10) as f64).collect();
//! let shifted: Vec<f64> = (0..1000).map(|i| (i % 5) as f64).collect();
//!
//! let psi = compute_psi(baseline.clone(), shifted.clone(), 10).unwrap();
//! assert_eq!(DriftLevel::from_psi(psi), DriftLevel::Significant);
//!
//! // Full breakdown
//! let report = PsiConfig::default().compute(baseline, shifted).unwrap();
//! println!("PSI = {:.4} ({})", report.psi, report.drift_level());
//! ```
//!
//! Author: Ryan J Cardwell (Archer Phoenix)

pub mod encoding;
pub mod error;
pub mod histogram;
pub mod psi;
pub mod sample;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports
pub use encoding::*;
pub use error::*;
pub use histogram::*;
pub use psi::*;
pub use sample::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the engine (call once, especially important for WASM)
#[cfg(feature = "wasm")]
pub fn init() {
    console_error_panic_hook::set_once();
}
