use serde::{Deserialize, Serialize};

use crate::error::TessellaScaleError;

/// An ascending sequence of class boundaries.
///
/// `m` boundaries define `m - 1` classes: class `i` spans
/// `[breaks[i], breaks[i + 1])`, and the last class additionally includes the
/// maximum boundary itself so the largest sample value is always classifiable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Breaks(Vec<f64>);

impl Breaks {
    /// Validates a caller-supplied boundary sequence.
    pub fn try_new(values: Vec<f64>) -> Result<Self, TessellaScaleError> {
        if !values.windows(2).all(|w| w[0] <= w[1]) {
            return Err(TessellaScaleError::BreaksNotAscending(values));
        }
        Ok(Self(values))
    }

    /// Solver-side constructor; the input is already sorted.
    pub(crate) fn from_sorted(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of classes the boundaries define.
    pub fn class_count(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Returns the class index for `value`, or `None` if the value is
    /// non-finite, below the minimum boundary, or the sequence defines no
    /// classes.
    ///
    /// Classes are scanned in order and the first lower-inclusive interval
    /// wins; a value the scan misses still lands in the last class when it is
    /// at or above the second-to-last boundary, so the maximum classifies.
    pub fn class_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || self.0.len() < 2 {
            return None;
        }
        let breaks = &self.0;
        let last = breaks.len() - 1;
        for i in 0..last {
            if breaks[i] <= value && value < breaks[i + 1] {
                return Some(i);
            }
        }
        if value >= breaks[last - 1] {
            Some(last - 1)
        } else {
            None
        }
    }

    /// The `[lower, upper)` bounds of a class (last class closed at `upper`).
    pub fn class_span(&self, class: usize) -> Option<(f64, f64)> {
        if class + 1 < self.0.len() {
            Some((self.0[class], self.0[class + 1]))
        } else {
            None
        }
    }
}
