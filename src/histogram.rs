//! Shared-range histograms.
//!
//! Both samples must be binned over the same edges, otherwise the
//! per-bin comparison is meaningless. The edges are derived once from
//! the union range of the two samples and reused:
//!
//! ```text
//! baseline   [0, 1, 2, 3, 4]          union range [0, 14]
//! comparison [10, 11, 12, 13, 14]  →  edges 0, 2.8, 5.6, 8.4, 11.2, 14
//! ```
//!
//! Bins are half-open `[e_i, e_{i+1})` except the last, which also
//! includes its upper edge.

use crate::error::{PsiError, Result};
use serde::{Deserialize, Serialize};

/// Closed interval `[min, max]` covering the binned values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range of a single sample, `None` if it is empty
    pub fn of(values: &[f64]) -> Option<Self> {
        let mut iter = values.iter().copied();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
        Some(Self { min, max })
    }

    /// Union range spanning both samples
    pub fn union(a: &[f64], b: &[f64]) -> Option<Self> {
        match (Self::of(a), Self::of(b)) {
            (Some(ra), Some(rb)) => Some(Self {
                min: ra.min.min(rb.min),
                max: ra.max.max(rb.max),
            }),
            (Some(r), None) | (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Zero-width range (every value identical)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0
    }

    /// Widen a zero-width range to `[v - 0.5, v + 0.5]`
    pub fn widened(self) -> Self {
        if self.is_degenerate() {
            Self {
                min: self.min - 0.5,
                max: self.max + 0.5,
            }
        } else {
            self
        }
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    /// Relative position of `x`: `0.0` at `min`, `1.0` at `max`.
    ///
    /// Finite ranges wider than `f64::MAX` are measured on halved operands.
    pub fn fraction(&self, x: f64) -> f64 {
        let width = self.width();
        if width.is_finite() {
            (x - self.min) / width
        } else {
            (0.5 * x - 0.5 * self.min) / (0.5 * self.max - 0.5 * self.min)
        }
    }

    /// Point at relative position `t` (inverse of [`ValueRange::fraction`])
    pub fn lerp(&self, t: f64) -> f64 {
        let width = self.width();
        if width.is_finite() {
            self.min + t * width
        } else {
            self.min * (1.0 - t) + self.max * t
        }
    }
}

/// Equal-width bin edges (`n_bins + 1` monotone values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Split `range` into `n_bins` equal-width bins.
    ///
    /// A degenerate range is widened first, so a sample of one repeated
    /// value still gets well-defined edges.
    pub fn uniform(range: ValueRange, n_bins: usize) -> Result<Self> {
        if n_bins == 0 {
            return Err(PsiError::InvalidBinCount(n_bins));
        }

        let range = if range.is_degenerate() {
            tracing::debug!(
                value = range.min,
                "zero-width value range; widening by 0.5 on each side"
            );
            range.widened()
        } else {
            range
        };

        let mut edges: Vec<f64> = (0..n_bins)
            .map(|i| range.lerp(i as f64 / n_bins as f64))
            .collect();
        edges.push(range.max);

        Ok(Self { edges })
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    #[inline]
    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.edges[0], self.edges[self.n_bins()])
    }

    /// Bin holding `x`, `None` if outside the edges
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        let range = self.range();
        if !range.contains(x) {
            return None;
        }

        let n = self.n_bins();
        let scaled = range.fraction(x) * n as f64;
        let mut idx = (scaled.floor() as usize).min(n - 1);

        // Correct floating-point drift against the stored edges
        if idx > 0 && x < self.edges[idx] {
            idx -= 1;
        } else if idx + 1 < n && x >= self.edges[idx + 1] {
            idx += 1;
        }

        Some(idx)
    }

    /// Count `values` into these bins
    pub fn histogram(&self, values: &[f64]) -> Histogram {
        let mut counts = vec![0u64; self.n_bins()];
        for &x in values {
            if let Some(idx) = self.bin_index(x) {
                counts[idx] += 1;
            }
        }

        Histogram {
            counts,
            sample_len: values.len(),
        }
    }
}

/// Per-bin counts for one sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub counts: Vec<u64>,

    /// Length of the sample the counts came from
    pub sample_len: usize,
}

impl Histogram {
    /// Fractional density per bin: `count / sample_len`
    pub fn densities(&self) -> Vec<f64> {
        if self.sample_len == 0 {
            return vec![0.0; self.counts.len()];
        }

        let n = self.sample_len as f64;
        self.counts.iter().map(|&c| c as f64 / n).collect()
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_union_range() {
        let a = [0.0, 1.0, 2.0, 3.0, 4.0];
        let b = [10.0, 11.0, 12.0, 13.0, 14.0];
        let range = ValueRange::union(&a, &b).unwrap();
        assert_eq!(range, ValueRange::new(0.0, 14.0));
        assert!(ValueRange::union(&[], &[]).is_none());
    }

    #[test]
    fn test_uniform_edges() {
        let edges = BinEdges::uniform(ValueRange::new(0.0, 14.0), 5).unwrap();
        assert_eq!(edges.n_bins(), 5);

        let expected = [0.0, 2.8, 5.6, 8.4, 11.2, 14.0];
        for (e, x) in edges.edges().iter().zip(expected.iter()) {
            assert!(approx_eq(*e, *x, 1e-12));
        }
    }

    #[test]
    fn test_zero_bins_rejected() {
        let err = BinEdges::uniform(ValueRange::new(0.0, 1.0), 0).unwrap_err();
        assert_eq!(err, PsiError::InvalidBinCount(0));
    }

    #[test]
    fn test_upper_edge_in_last_bin() {
        let edges = BinEdges::uniform(ValueRange::new(0.0, 10.0), 10).unwrap();
        assert_eq!(edges.bin_index(10.0), Some(9));
        assert_eq!(edges.bin_index(0.0), Some(0));
        assert_eq!(edges.bin_index(1.0), Some(1));
        assert_eq!(edges.bin_index(9.999), Some(9));
        assert_eq!(edges.bin_index(10.5), None);
    }

    #[test]
    fn test_degenerate_range_widened() {
        let edges = BinEdges::uniform(ValueRange::new(3.0, 3.0), 4).unwrap();
        assert_eq!(edges.range(), ValueRange::new(2.5, 3.5));
        // 3.0 sits on the middle edge
        assert_eq!(edges.bin_index(3.0), Some(2));
    }

    #[test]
    fn test_range_wider_than_f64_max() {
        let range = ValueRange::new(-1e308, 1e308);
        assert!(range.width().is_infinite());
        assert_eq!(range.fraction(-1e308), 0.0);
        assert_eq!(range.fraction(1e308), 1.0);
        assert!(approx_eq(range.fraction(0.0), 0.5, 1e-12));

        let edges = BinEdges::uniform(range, 10).unwrap();
        assert!(edges.edges().iter().all(|e| e.is_finite()));
        assert!(edges.edges().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(edges.range(), range);

        let hist = edges.histogram(&[-1e308, 0.0, 1e308]);
        assert_eq!(hist.counts, vec![1, 0, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_densities() {
        let edges = BinEdges::uniform(ValueRange::new(0.0, 4.0), 2).unwrap();
        let hist = edges.histogram(&[0.0, 1.0, 2.0, 3.0, 4.0]);

        assert_eq!(hist.counts, vec![2, 3]);
        assert_eq!(hist.total(), 5);

        let d = hist.densities();
        assert!(approx_eq(d[0], 0.4, 1e-12));
        assert!(approx_eq(d[1], 0.6, 1e-12));
        assert!(approx_eq(d.iter().sum::<f64>(), 1.0, 1e-12));
    }
}
