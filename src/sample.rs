//! Sample coercion - turning array-like input into a homogeneous sample.
//!
//! A sample is either numeric (binned directly) or categorical (encoded
//! to dense integer codes before binning). The element kinds present in
//! the input decide which one it becomes:
//!
//! ```text
//! ints, optionally with bools             → Integer
//! any float present (no text)             → Numeric
//! any text present                        → Categorical (all rendered to strings)
//! bools only                              → Categorical ("True" / "False")
//! ```
//!
//! Integer and float samples stay apart so that, pooled with categorical
//! labels, `1` renders as `"1"` and `1.0` as `"1.0"`.

use crate::error::{PsiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::Float(_) | Value::Text(_) => None,
        }
    }

    /// Convert a JSON scalar. Arrays, objects and null are rejected.
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        match json {
            serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| PsiError::Coercion(format!("unrepresentable number {}", n))),
            },
            serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
            serde_json::Value::Null => Err(PsiError::Coercion("null element".into())),
            serde_json::Value::Array(_) => {
                Err(PsiError::Coercion("nested array element".into()))
            }
            serde_json::Value::Object(_) => Err(PsiError::Coercion("object element".into())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Which branch of the pipeline a sample takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleKind {
    Numeric,
    Categorical,
}

impl SampleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleKind::Numeric => "numeric",
            SampleKind::Categorical => "categorical",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A coerced, homogeneous sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    /// Floating-point values
    Numeric(Vec<f64>),
    /// Integer values; binned as numbers, labelled without a fraction
    Integer(Vec<i64>),
    Categorical(Vec<String>),
}

impl Sample {
    /// Coerce a sequence of mixed scalars
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let values: Vec<Value> = values.into_iter().collect();

        let has_text = values.iter().any(|v| matches!(v, Value::Text(_)));
        let all_bool = !values.is_empty() && values.iter().all(|v| matches!(v, Value::Bool(_)));

        if has_text || all_bool {
            return Sample::Categorical(values.iter().map(|v| v.to_string()).collect());
        }

        if values.iter().any(|v| matches!(v, Value::Float(_))) {
            return Sample::Numeric(values.iter().filter_map(Value::as_number).collect());
        }

        if values.is_empty() {
            return Sample::Numeric(Vec::new());
        }

        Sample::Integer(values.iter().filter_map(Value::as_integer).collect())
    }

    /// Coerce a JSON array of scalars
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let items = json
            .as_array()
            .ok_or_else(|| PsiError::Coercion("expected a JSON array".into()))?;

        let values = items
            .iter()
            .map(Value::from_json)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_values(values))
    }

    /// Parse and coerce a JSON array string
    pub fn parse_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| PsiError::Serialization(e.to_string()))?;
        Self::from_json(&value)
    }

    #[inline]
    pub fn kind(&self) -> SampleKind {
        match self {
            Sample::Numeric(_) | Sample::Integer(_) => SampleKind::Numeric,
            Sample::Categorical(_) => SampleKind::Categorical,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Sample::Numeric(v) => v.len(),
            Sample::Integer(v) => v.len(),
            Sample::Categorical(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render every element as a category label
    pub fn into_labels(self) -> Vec<String> {
        match self {
            Sample::Numeric(v) => v.into_iter().map(|x| format!("{:?}", x)).collect(),
            Sample::Integer(v) => v.into_iter().map(|i| i.to_string()).collect(),
            Sample::Categorical(v) => v,
        }
    }

    /// Values to bin, `None` for categorical samples
    pub fn into_numeric(self) -> Option<Vec<f64>> {
        match self {
            Sample::Numeric(v) => Some(v),
            Sample::Integer(v) => Some(v.into_iter().map(|i| i as f64).collect()),
            Sample::Categorical(_) => None,
        }
    }

    /// Reject NaN and infinities in numeric samples
    pub(crate) fn ensure_finite(&self, side: &'static str) -> Result<()> {
        if let Sample::Numeric(v) = self {
            if v.iter().any(|x| !x.is_finite()) {
                return Err(PsiError::NonFinite(side));
            }
        }
        Ok(())
    }
}

impl FromIterator<Value> for Sample {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl From<Vec<Value>> for Sample {
    fn from(values: Vec<Value>) -> Self {
        Self::from_values(values)
    }
}

macro_rules! impl_numeric_sample {
    ($($t:ty),*) => {
        $(
            impl From<Vec<$t>> for Sample {
                fn from(v: Vec<$t>) -> Self {
                    Sample::Numeric(v.into_iter().map(|x| x as f64).collect())
                }
            }

            impl From<&[$t]> for Sample {
                fn from(v: &[$t]) -> Self {
                    Sample::Numeric(v.iter().map(|&x| x as f64).collect())
                }
            }

            impl From<&Vec<$t>> for Sample {
                fn from(v: &Vec<$t>) -> Self {
                    Sample::from(v.as_slice())
                }
            }
        )*
    };
}

impl_numeric_sample!(f64, f32);

macro_rules! impl_integer_sample {
    ($($t:ty),*) => {
        $(
            impl From<Vec<$t>> for Sample {
                fn from(v: Vec<$t>) -> Self {
                    Sample::Integer(v.into_iter().map(i64::from).collect())
                }
            }

            impl From<&[$t]> for Sample {
                fn from(v: &[$t]) -> Self {
                    Sample::Integer(v.iter().map(|&x| i64::from(x)).collect())
                }
            }

            impl From<&Vec<$t>> for Sample {
                fn from(v: &Vec<$t>) -> Self {
                    Sample::from(v.as_slice())
                }
            }
        )*
    };
}

impl_integer_sample!(i64, i32, u32);

impl From<Vec<bool>> for Sample {
    fn from(v: Vec<bool>) -> Self {
        Self::from_values(v.into_iter().map(Value::Bool))
    }
}

impl From<Vec<&str>> for Sample {
    fn from(v: Vec<&str>) -> Self {
        Sample::Categorical(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Sample {
    fn from(v: &[&str]) -> Self {
        Sample::Categorical(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for Sample {
    fn from(v: Vec<String>) -> Self {
        Sample::Categorical(v)
    }
}
