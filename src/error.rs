//! Error types for the PSI engine.

use thiserror::Error;

/// Main error type for PSI computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsiError {
    /// Input is not a flat, uniform sequence of scalars
    #[error("Coercion error: {0}")]
    Coercion(String),

    /// Baseline is numeric but the comparison sample is not
    #[error("Type mismatch: baseline is {baseline}, comparison is {comparison}")]
    TypeMismatch {
        baseline: &'static str,
        comparison: &'static str,
    },

    /// One of the samples has no values
    #[error("Empty sample: {0}")]
    EmptySample(&'static str),

    /// NaN or infinite value in a numeric sample
    #[error("Non-finite value in {0} sample")]
    NonFinite(&'static str),

    /// Density vectors of different lengths
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Histogram requested with zero bins
    #[error("Invalid bin count: {0} (must be positive)")]
    InvalidBinCount(usize),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for PSI operations.
pub type Result<T> = std::result::Result<T, PsiError>;

impl PsiError {
    /// Check if the error was caused by the caller's input data
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PsiError::Coercion(_)
                | PsiError::TypeMismatch { .. }
                | PsiError::EmptySample(_)
                | PsiError::NonFinite(_)
        )
    }
}

#[cfg(feature = "wasm")]
impl From<PsiError> for wasm_bindgen::JsValue {
    fn from(err: PsiError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(PsiError::EmptySample("baseline").is_input_error());
        assert!(PsiError::Coercion("nested".into()).is_input_error());
        assert!(!PsiError::InvalidBinCount(0).is_input_error());
        assert!(!PsiError::Config("bad".into()).is_input_error());
    }

    #[test]
    fn test_display() {
        let err = PsiError::TypeMismatch {
            baseline: "numeric",
            comparison: "categorical",
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: baseline is numeric, comparison is categorical"
        );
    }
}
