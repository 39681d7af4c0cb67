/// A prepared sample population: the finite values of a raw data column,
/// sorted ascending with duplicates kept.
///
/// Uploaded tabular data routinely has missing or non-numeric cells, which
/// reach this layer as NaN (or `None` through the iterator constructors).
/// Preparation drops them silently rather than erroring.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample(Vec<f64>);

impl Sample {
    /// Builds a sample from raw values, excluding non-finite entries.
    pub fn from_raw(values: &[f64]) -> Self {
        values.iter().copied().collect()
    }

    /// Returns the prepared values, ascending.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Number of distinct values in the sample.
    pub fn unique_count(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            1 + self.0.windows(2).filter(|w| w[0] != w[1]).count()
        }
    }
}

impl FromIterator<f64> for Sample {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut values: Vec<f64> = iter.into_iter().filter(|v| v.is_finite()).collect();
        // Finite-only, so partial_cmp cannot fail
        values.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
        Self(values)
    }
}

impl FromIterator<Option<f64>> for Sample {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        iter.into_iter().flatten().collect()
    }
}
