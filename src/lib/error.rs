use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where the mode of a Beta(a, b) density sits when it is not interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Density is maximised at 0
    Zero,
    /// Density is maximised at 1
    One,
    /// Flat density, every point is a mode
    Uniform,
    /// U-shaped density with modes at both 0 and 1
    Bimodal,
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryMode::Zero => write!(f, "mode at 0"),
            BoundaryMode::One => write!(f, "mode at 1"),
            BoundaryMode::Uniform => write!(f, "no unique interior mode (uniform)"),
            BoundaryMode::Bimodal => write!(f, "no unique interior mode (bimodal)"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReparamError {
    /// A numeric argument lies outside the domain of the function
    #[error("Domain error: {param} = {value} violates {constraint}")]
    Domain {
        param: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// Empty or malformed trial sequence, or data the model cannot use
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Beta mode is not an interior point
    #[error("Beta({a}, {b}) has no interior mode: {at}")]
    BoundaryMode { a: f64, b: f64, at: BoundaryMode },
}

pub type Result<T> = std::result::Result<T, ReparamError>;

/// Reject NaN and infinities before any arithmetic touches `value`.
pub(crate) fn ensure_finite(param: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ReparamError::Domain {
            param,
            value,
            constraint: "must be finite",
        })
    }
}

pub(crate) fn ensure_positive(param: &'static str, value: f64) -> Result<f64> {
    ensure_finite(param, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ReparamError::Domain {
            param,
            value,
            constraint: "must be > 0",
        })
    }
}

pub(crate) fn ensure_open_unit(param: &'static str, value: f64) -> Result<f64> {
    ensure_finite(param, value)?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(ReparamError::Domain {
            param,
            value,
            constraint: "must lie in (0, 1)",
        })
    }
}
