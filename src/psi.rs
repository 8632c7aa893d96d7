//! Population Stability Index.
//!
//! ```text
//! PSI = Σ (p_i - q_i) · ln(p_i / q_i)
//! ```
//!
//! where `p` and `q` are the baseline and comparison densities over a
//! shared set of bins. Each term is non-negative and zero when the two
//! densities agree, so PSI = 0 for identical distributions and grows
//! with the shift between them.
//!
//! Pipeline for one call:
//!
//! ```text
//! coerce → (categorical? encode, bins = #categories) → union range
//!        → shared edges → histograms → densities → floor zeros → Σ
//! ```

use crate::encoding::CategoricalEncoding;
use crate::error::{PsiError, Result};
use crate::histogram::{BinEdges, ValueRange};
use crate::sample::{Sample, SampleKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bins used for numeric samples when the caller does not choose
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Substitute for empty-bin densities (keeps `ln(p/q)` finite)
pub const DENSITY_FLOOR: f64 = 0.0001;

/// Replace every density exactly equal to zero with `floor`
#[inline]
pub fn floor_densities(densities: &mut [f64], floor: f64) {
    for d in densities.iter_mut() {
        if *d == 0.0 {
            *d = floor;
        }
    }
}

/// Per-bin PSI terms `(p_i - q_i) · ln(p_i / q_i)`
///
/// Densities must already be strictly positive.
pub fn psi_contributions(p: &[f64], q: &[f64]) -> Result<Vec<f64>> {
    if p.len() != q.len() {
        return Err(PsiError::DimensionMismatch {
            expected: p.len(),
            got: q.len(),
        });
    }

    Ok(p.iter()
        .zip(q.iter())
        .map(|(&pi, &qi)| (pi - qi) * (pi / qi).ln())
        .collect())
}

/// PSI of two floored density vectors
#[inline]
pub fn psi_from_densities(p: &[f64], q: &[f64]) -> Result<f64> {
    Ok(psi_contributions(p, q)?.iter().sum())
}

/// Configuration for a PSI computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsiConfig {
    /// Number of equal-width bins for numeric samples
    pub bin_count: usize,

    /// Density substituted for empty bins
    pub density_floor: f64,
}

impl Default for PsiConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            density_floor: DENSITY_FLOOR,
        }
    }
}

impl PsiConfig {
    pub fn with_bin_count(bin_count: usize) -> Self {
        Self {
            bin_count,
            ..Self::default()
        }
    }

    pub fn density_floor(mut self, floor: f64) -> Self {
        self.density_floor = floor;
        self
    }

    /// Check values before any data is touched.
    ///
    /// `bin_count` is not checked here: categorical samples replace it,
    /// so a zero count only fails once it reaches the histogram.
    pub fn validate(&self) -> Result<()> {
        if !self.density_floor.is_finite() || self.density_floor <= 0.0 {
            return Err(PsiError::Config(format!(
                "density_floor must be finite and positive, got {}",
                self.density_floor
            )));
        }
        Ok(())
    }

    /// Compute a full PSI report with this configuration
    pub fn compute(
        &self,
        baseline: impl Into<Sample>,
        comparison: impl Into<Sample>,
    ) -> Result<PsiReport> {
        compute_psi_report(baseline, comparison, self)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PsiError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON, validating the result
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PsiError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Non-fatal conditions noticed during a computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsiWarning {
    /// Categorical data replaced the requested bin count
    BinCountOverridden { requested: usize, categories: usize },
}

impl fmt::Display for PsiWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsiWarning::BinCountOverridden {
                requested,
                categories,
            } => write!(
                f,
                "categorical features detected; ignoring bin count {} and using {} unique categories",
                requested, categories
            ),
        }
    }
}

/// Result of a PSI computation with its intermediate values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsiReport {
    /// The index itself
    pub psi: f64,

    /// Whether the baseline was treated as numeric or categorical
    pub kind: SampleKind,

    /// Bins actually used
    pub bin_count: usize,

    /// Union range of both samples (before any widening)
    pub range: ValueRange,

    /// Shared bin edges (`bin_count + 1` values)
    pub edges: Vec<f64>,

    /// Category label per bin, categorical samples only
    pub categories: Option<Vec<String>>,

    pub baseline_counts: Vec<u64>,
    pub comparison_counts: Vec<u64>,

    /// Floored densities
    pub baseline_density: Vec<f64>,
    pub comparison_density: Vec<f64>,

    /// Per-bin PSI terms; they sum to `psi`
    pub contributions: Vec<f64>,

    #[serde(default)]
    pub warnings: Vec<PsiWarning>,
}

impl PsiReport {
    /// Conventional interpretation band for this PSI
    pub fn drift_level(&self) -> DriftLevel {
        DriftLevel::from_psi(self.psi)
    }

    /// Bin with the largest contribution, if any
    pub fn dominant_bin(&self) -> Option<usize> {
        self.contributions
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PsiError::Serialization(e.to_string()))
    }
}

/// Conventional PSI interpretation bands.
///
/// These are rules of thumb for callers; `compute_psi` never applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftLevel {
    /// PSI < 0.1
    Stable,
    /// 0.1 <= PSI < 0.2
    Moderate,
    /// PSI >= 0.2
    Significant,
}

impl DriftLevel {
    pub fn from_psi(psi: f64) -> Self {
        if psi < 0.1 {
            DriftLevel::Stable
        } else if psi < 0.2 {
            DriftLevel::Moderate
        } else {
            DriftLevel::Significant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriftLevel::Stable => "STABLE",
            DriftLevel::Moderate => "MODERATE",
            DriftLevel::Significant => "SIGNIFICANT",
        }
    }
}

impl fmt::Display for DriftLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Population Stability Index between two samples.
///
/// `bin_count` applies to numeric samples only; categorical samples use
/// one bin per distinct category and emit a warning.
///
/// ```rust
/// use psi_engine::compute_psi;
///
/// let baseline = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let psi = compute_psi(baseline.clone(), baseline, 10).unwrap();
/// assert_eq!(psi, 0.0);
/// ```
pub fn compute_psi(
    baseline: impl Into<Sample>,
    comparison: impl Into<Sample>,
    bin_count: usize,
) -> Result<f64> {
    let report = compute_psi_report(baseline, comparison, &PsiConfig::with_bin_count(bin_count))?;
    Ok(report.psi)
}

/// Comparison values for a numeric baseline; text cannot be binned
fn numeric_comparison(comparison: Sample) -> Result<Vec<f64>> {
    comparison.into_numeric().ok_or(PsiError::TypeMismatch {
        baseline: SampleKind::Numeric.as_str(),
        comparison: SampleKind::Categorical.as_str(),
    })
}

/// Population Stability Index with all intermediate values
pub fn compute_psi_report(
    baseline: impl Into<Sample>,
    comparison: impl Into<Sample>,
    config: &PsiConfig,
) -> Result<PsiReport> {
    config.validate()?;

    let baseline: Sample = baseline.into();
    let comparison: Sample = comparison.into();

    if baseline.is_empty() {
        return Err(PsiError::EmptySample("baseline"));
    }
    if comparison.is_empty() {
        return Err(PsiError::EmptySample("comparison"));
    }

    let kind = baseline.kind();
    if kind == SampleKind::Numeric {
        baseline.ensure_finite("baseline")?;
        comparison.ensure_finite("comparison")?;
    }

    let mut warnings = Vec::new();

    let (base_values, comp_values, bin_count, categories) = match baseline {
        Sample::Categorical(b) => {
            let encoding = CategoricalEncoding::encode(&b, &comparison.into_labels());
            let warning = PsiWarning::BinCountOverridden {
                requested: config.bin_count,
                categories: encoding.n_categories(),
            };
            tracing::warn!(
                requested = config.bin_count,
                categories = encoding.n_categories(),
                "{}",
                warning
            );
            warnings.push(warning);

            let bins = encoding.n_categories();
            (
                encoding.baseline,
                encoding.comparison,
                bins,
                Some(encoding.categories),
            )
        }
        Sample::Numeric(b) => (b, numeric_comparison(comparison)?, config.bin_count, None),
        Sample::Integer(b) => (
            b.into_iter().map(|i| i as f64).collect(),
            numeric_comparison(comparison)?,
            config.bin_count,
            None,
        ),
    };

    let range = ValueRange::union(&base_values, &comp_values)
        .ok_or(PsiError::EmptySample("baseline"))?;
    let edges = BinEdges::uniform(range, bin_count)?;

    let base_hist = edges.histogram(&base_values);
    let comp_hist = edges.histogram(&comp_values);

    let mut baseline_density = base_hist.densities();
    let mut comparison_density = comp_hist.densities();
    floor_densities(&mut baseline_density, config.density_floor);
    floor_densities(&mut comparison_density, config.density_floor);

    let contributions = psi_contributions(&baseline_density, &comparison_density)?;
    let psi: f64 = contributions.iter().sum();

    tracing::debug!(psi, bins = bin_count, kind = %kind, "computed population stability index");

    Ok(PsiReport {
        psi,
        kind,
        bin_count,
        range,
        edges: edges.edges().to_vec(),
        categories,
        baseline_counts: base_hist.counts,
        comparison_counts: comp_hist.counts,
        baseline_density,
        comparison_density,
        contributions,
        warnings,
    })
}
