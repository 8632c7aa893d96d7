//! Categorical encoding.
//!
//! Categories from both samples are pooled, sorted lexically and
//! assigned dense integer codes `0..k`. Each sample is then replaced by
//! its codes, so categorical data can go through the same histogram
//! path as numeric data with one bin per category.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Both samples encoded against the pooled category set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    /// Sorted distinct categories; index = code
    pub categories: Vec<String>,

    /// Baseline codes, in original order
    pub baseline: Vec<f64>,

    /// Comparison codes, in original order
    pub comparison: Vec<f64>,
}

impl CategoricalEncoding {
    /// Encode two label sequences against their combined categories
    pub fn encode(baseline: &[String], comparison: &[String]) -> Self {
        let codes: BTreeMap<&String, usize> = baseline
            .iter()
            .chain(comparison.iter())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(code, label)| (label, code))
            .collect();

        let categories = codes.keys().map(|label| (*label).clone()).collect();
        let baseline = baseline.iter().map(|label| codes[label] as f64).collect();
        let comparison = comparison.iter().map(|label| codes[label] as f64).collect();

        Self {
            categories,
            baseline,
            comparison,
        }
    }

    /// Number of distinct categories (= bins used)
    #[inline]
    pub fn n_categories(&self) -> usize {
        self.categories.len()
    }
}
