//! WebAssembly bindings for the PSI engine.
//!
//! Samples are passed as JSON arrays so numbers and strings both work.
//!
//! ## Usage (JavaScript/TypeScript)
//!
//! ```javascript
//! import init, { computePsi, computePsiReport } from 'psi-engine';
//!
//! await init();
//!
//! const psi = computePsi('[1, 2, 3, 4]', '[2, 3, 4, 5]', 10);
//! console.log(`PSI = ${psi}`);
//!
//! const report = JSON.parse(computePsiReport('["a", "b"]', '["a", "a"]', '{}'));
//! console.log(report.warnings);
//! ```

use crate::psi::{compute_psi_report, DriftLevel, PsiConfig};
use crate::sample::Sample;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module (call once at startup)
#[wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
}

/// PSI between two JSON-encoded samples
#[wasm_bindgen(js_name = "computePsi")]
pub fn compute_psi(
    baseline_json: &str,
    comparison_json: &str,
    bin_count: usize,
) -> Result<f64, JsValue> {
    let baseline = Sample::parse_json(baseline_json)?;
    let comparison = Sample::parse_json(comparison_json)?;

    let report = compute_psi_report(baseline, comparison, &PsiConfig::with_bin_count(bin_count))?;
    Ok(report.psi)
}

/// Full PSI report as JSON, configured by a JSON `PsiConfig`
#[wasm_bindgen(js_name = "computePsiReport")]
pub fn compute_psi_report_json(
    baseline_json: &str,
    comparison_json: &str,
    config_json: &str,
) -> Result<String, JsValue> {
    let config = PsiConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
    let baseline = Sample::parse_json(baseline_json)?;
    let comparison = Sample::parse_json(comparison_json)?;

    let report = compute_psi_report(baseline, comparison, &config)?;
    Ok(report.to_json()?)
}

/// Conventional band name for a PSI value
#[wasm_bindgen(js_name = "driftLevel")]
pub fn drift_level(psi: f64) -> String {
    DriftLevel::from_psi(psi).as_str().to_string()
}

/// Get crate version
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    crate::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_compute_psi_json() {
        let psi = compute_psi("[1, 2, 3, 4]", "[1, 2, 3, 4]", 4).unwrap();
        assert_eq!(psi, 0.0);
    }

    #[wasm_bindgen_test]
    fn test_report_json_categorical() {
        let json = compute_psi_report_json(r#"["a", "b", "a", "c"]"#, r#"["a", "a", "b", "b"]"#, "{}")
            .unwrap();
        assert!(json.contains("BinCountOverridden"));
    }

    #[wasm_bindgen_test]
    fn test_drift_level() {
        assert_eq!(drift_level(0.5), "SIGNIFICANT");
    }
}
