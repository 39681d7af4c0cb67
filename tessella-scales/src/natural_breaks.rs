use serde::Serialize;
use std::fmt::Debug;

use tessella_common::types::Rgb;
use tessella_common::value::{ScalarOrArray, ScalarOrArrayRef};

use crate::breaks::Breaks;
use crate::color::{class_ramp, UNCLASSED};
use crate::error::TessellaScaleError;
use crate::sample::Sample;

/// Computes optimal natural (Jenks/Fisher) class boundaries for a sample.
///
/// Partitions the sorted sample into `num_classes` contiguous groups
/// minimizing the total within-group sum of squared deviations, via the exact
/// Fisher dynamic program. `O(n² · k)` time and `O(n · k)` space: exact
/// rather than scalable, which is fine for the few-thousand-row datasets this
/// serves.
///
/// Degenerate inputs yield degenerate output instead of errors: an empty
/// sample gives empty breaks, and a sample with at most `num_classes` unique
/// values gives exactly those values as boundaries.
pub fn natural_breaks(sample: &Sample, num_classes: usize) -> Breaks {
    let values = sample.values();
    if values.is_empty() {
        return Breaks::default();
    }
    let k = num_classes.max(1);

    // Low-cardinality samples partition trivially, one class per unique value
    if sample.unique_count() <= k {
        let mut unique = values.to_vec();
        unique.dedup();
        return Breaks::from_sorted(unique);
    }

    let n = values.len();

    // Prefix sums of x and x², shifted by a central sample value to keep the
    // sum-of-squares subtraction well conditioned
    let shift = values[n / 2];
    let mut sum = vec![0.0f64; n + 1];
    let mut sum_sq = vec![0.0f64; n + 1];
    for (i, &v) in values.iter().enumerate() {
        let x = v - shift;
        sum[i + 1] = sum[i] + x;
        sum_sq[i + 1] = sum_sq[i] + x * x;
    }

    // Within-group sum of squared deviations for elements [lo, hi); a
    // negative rounding residue clamps to zero
    let ssd = |lo: usize, hi: usize| -> f64 {
        if hi - lo < 2 {
            return 0.0;
        }
        let count = (hi - lo) as f64;
        let s = sum[hi] - sum[lo];
        let sq = sum_sq[hi] - sum_sq[lo];
        (sq - s * s / count).max(0.0)
    };

    // Flat (n+1) × (k+1) cost and split arenas, row-major by prefix length.
    // cost[j][i] is the minimal total deviation for the first j elements in
    // i classes; split[j][i] the 1-based element where class i then begins.
    let width = k + 1;
    let at = |j: usize, i: usize| j * width + i;
    let mut cost = vec![0.0f64; (n + 1) * width];
    let mut split = vec![0usize; (n + 1) * width];

    for j in 1..=n {
        cost[at(j, 1)] = ssd(0, j);
        split[at(j, 1)] = 1;
    }
    for i in 2..=k {
        for j in i..=n {
            let mut best = f64::INFINITY;
            let mut best_split = i;
            // Splits scan in increasing order under strict `<`, so the
            // smallest split index wins exact ties. Determinism depends on
            // this; `<=` would pick a different, non-reproducible partition.
            for s in i..=j {
                let candidate = cost[at(s - 1, i - 1)] + ssd(s - 1, j);
                if candidate < best {
                    best = candidate;
                    best_split = s;
                }
            }
            cost[at(j, i)] = best;
            split[at(j, i)] = best_split;
        }
    }

    // Backtrack to the 0-based element index where each class begins
    let mut starts = vec![0usize; k];
    let mut j = n;
    for i in (1..=k).rev() {
        let s = split[at(j, i)];
        starts[i - 1] = s - 1;
        j = s - 1;
    }

    // Boundary values: the minimum, each later class's first value, the
    // maximum. The optimum can collapse classes at repeated values, so
    // adjacent duplicates are removed.
    let mut boundaries = Vec::with_capacity(k + 1);
    boundaries.push(values[0]);
    for &start in &starts[1..] {
        boundaries.push(values[start]);
    }
    boundaries.push(values[n - 1]);
    boundaries.dedup();
    Breaks::from_sorted(boundaries)
}

/// A scale mapping continuous values to discrete range values through natural
/// breaks classification.
///
/// The domain is a sample population; boundaries are solved once at
/// construction for `range.len()` classes and values are classified against
/// them. Unclassifiable values (non-finite, below the minimum) map to the
/// default.
#[derive(Debug, Clone)]
pub struct NaturalBreaksScale<R>
where
    R: Clone + Debug + Sync + 'static,
{
    domain: Sample,
    breaks: Breaks,
    range: Vec<R>,
    default: R,
}

impl<R> NaturalBreaksScale<R>
where
    R: Clone + Debug + Sync + 'static,
{
    pub fn try_new(domain: Sample, range: Vec<R>, default: R) -> Result<Self, TessellaScaleError> {
        if range.is_empty() {
            return Err(TessellaScaleError::EmptyRange);
        }
        let breaks = natural_breaks(&domain, range.len());
        Ok(Self {
            domain,
            breaks,
            range,
            default,
        })
    }

    /// Sets the domain from a new sample population and re-solves the breaks
    pub fn with_domain(mut self, domain: Sample) -> Self {
        self.breaks = natural_breaks(&domain, self.range.len());
        self.domain = domain;
        self
    }

    /// Sets the output range and re-solves the breaks for its length
    pub fn with_range(mut self, range: Vec<R>) -> Result<Self, TessellaScaleError> {
        if range.is_empty() {
            return Err(TessellaScaleError::EmptyRange);
        }
        self.range = range;
        self.breaks = natural_breaks(&self.domain, self.range.len());
        Ok(self)
    }

    /// Returns the sample population domain
    pub fn get_domain(&self) -> &Sample {
        &self.domain
    }

    /// Returns a reference to the output range
    pub fn get_range(&self) -> &Vec<R> {
        &self.range
    }

    /// Returns the solved class boundaries
    pub fn breaks(&self) -> &Breaks {
        &self.breaks
    }

    /// Returns the default value for unclassifiable input
    pub fn default_value(&self) -> &R {
        &self.default
    }

    pub fn scale<'a>(&self, values: impl Into<ScalarOrArrayRef<'a, f64>>) -> ScalarOrArray<R> {
        values.into().map(|x| {
            match self.breaks.class_of(*x) {
                // Degenerate domains can solve to fewer classes than the
                // range holds, never more
                Some(class) if class < self.range.len() => self.range[class].clone(),
                _ => self.default.clone(),
            }
        })
    }
}

/// One legend row: the class bounds and the swatch color drawn beside them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: f64,
    pub swatch: Rgb,
}

impl NaturalBreaksScale<Rgb> {
    /// Builds the full choropleth pipeline: solve breaks for `num_classes`,
    /// generate the green→yellow→red ramp for the classes actually produced,
    /// and fall back to the unclassed gray.
    pub fn ramped(domain: Sample, num_classes: usize) -> Self {
        let breaks = natural_breaks(&domain, num_classes);
        let range = class_ramp(breaks.class_count());
        Self {
            domain,
            breaks,
            range,
            default: UNCLASSED,
        }
    }

    /// The rows a legend renders: one `lower – upper` label and swatch per
    /// class, in class order.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        (0..self.breaks.class_count())
            .filter_map(|class| {
                let (lower, upper) = self.breaks.class_span(class)?;
                let swatch = *self.range.get(class)?;
                Some(LegendEntry {
                    lower,
                    upper,
                    swatch,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_equal_groups() {
        // The canonical worked example: ten consecutive values split into
        // three groups of minimal variance
        let sample = Sample::from_raw(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let breaks = natural_breaks(&sample, 3);
        assert_eq!(breaks.as_slice(), &[1.0, 4.0, 7.0, 10.0]);

        assert_eq!(breaks.class_of(4.0), Some(1));
        assert_eq!(breaks.class_of(10.0), Some(2));
        assert_eq!(breaks.class_of(0.0), None);
    }

    #[test]
    fn test_clustered_data() {
        // Two tight clusters and a pair of outliers should split at the gaps
        let sample = Sample::from_raw(&[1.0, 1.1, 1.2, 5.0, 5.1, 5.2, 99.0, 100.0]);
        let breaks = natural_breaks(&sample, 3);
        assert_eq!(breaks.len(), 4);
        assert_approx_eq!(f64, breaks.as_slice()[0], 1.0);
        assert_approx_eq!(f64, breaks.as_slice()[1], 5.0);
        assert_approx_eq!(f64, breaks.as_slice()[2], 99.0);
        assert_approx_eq!(f64, breaks.as_slice()[3], 100.0);
    }

    #[test]
    fn test_breaks_shape_properties() {
        let sample = Sample::from_raw(&[
            12.0, 10.8, 11.0, 10.4, 10.8, 10.1, 9.7, 9.6, 8.3, 8.8, 7.7, 8.0, 8.4, 7.2, 7.6, 7.5,
            7.0, 6.4, 6.1, 5.8,
        ]);
        for k in 1..=7 {
            let breaks = natural_breaks(&sample, k);
            assert!(breaks.len() <= k + 1);
            assert!(breaks.as_slice().windows(2).all(|w| w[0] <= w[1]));
            assert_approx_eq!(f64, breaks.as_slice()[0], sample.min().unwrap());
            assert_approx_eq!(f64, *breaks.as_slice().last().unwrap(), sample.max().unwrap());
        }
    }

    #[test]
    fn test_deterministic() {
        let sample = Sample::from_raw(&[3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0, 5.0]);
        let first = natural_breaks(&sample, 4);
        let second = natural_breaks(&sample, 4);
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_unique_value() {
        let sample = Sample::from_raw(&[5.0, 5.0, 5.0]);
        let breaks = natural_breaks(&sample, 3);
        assert_eq!(breaks.as_slice(), &[5.0]);
        assert_eq!(breaks.class_count(), 0);
    }

    #[test]
    fn test_empty_sample() {
        let breaks = natural_breaks(&Sample::default(), 5);
        assert!(breaks.is_empty());
    }

    #[test]
    fn test_low_cardinality_returns_unique_values() {
        let sample = Sample::from_raw(&[2.0, 1.0, 2.0, 3.0, 1.0]);
        let breaks = natural_breaks(&sample, 5);
        assert_eq!(breaks.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_repeated_values_collapse_duplicate_boundaries() {
        // Heavy repetition forces the optimum to start classes on equal
        // values; the boundary list must still be duplicate-free
        let sample = Sample::from_raw(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 10.0]);
        let breaks = natural_breaks(&sample, 4);
        assert!(breaks.as_slice().windows(2).all(|w| w[0] < w[1]));
        assert_approx_eq!(f64, breaks.as_slice()[0], 1.0);
        assert_approx_eq!(f64, *breaks.as_slice().last().unwrap(), 10.0);
    }

    #[test]
    fn test_zero_classes_treated_as_one() {
        let sample = Sample::from_raw(&[1.0, 2.0, 3.0, 4.0]);
        let breaks = natural_breaks(&sample, 0);
        assert_eq!(breaks.as_slice(), &[1.0, 4.0]);
    }

    #[test]
    fn test_scale_basic() -> Result<(), TessellaScaleError> {
        let domain = Sample::from_raw(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let scale = NaturalBreaksScale::try_new(domain, vec!["low", "mid", "high"], "none")?;

        assert_eq!(scale.breaks().as_slice(), &[1.0, 4.0, 7.0, 10.0]);

        let values = vec![1.0, 3.9, 4.0, 7.0, 10.0, 0.5, f64::NAN];
        let result = scale.scale(&values).as_vec(values.len());
        assert_eq!(
            result,
            vec!["low", "low", "mid", "high", "high", "none", "none"]
        );
        Ok(())
    }

    #[test]
    fn test_scale_rejects_empty_range() {
        let domain = Sample::from_raw(&[1.0, 2.0, 3.0]);
        let err = NaturalBreaksScale::<&str>::try_new(domain, vec![], "none").unwrap_err();
        assert_eq!(err, TessellaScaleError::EmptyRange);
    }

    #[test]
    fn test_with_domain_and_range_resolve() -> Result<(), TessellaScaleError> {
        let domain = Sample::from_raw(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let scale = NaturalBreaksScale::try_new(domain, vec![0u8, 1, 2], 255)?;

        let rescaled = scale
            .clone()
            .with_domain(Sample::from_raw(&[10.0, 20.0, 30.0, 40.0]));
        assert_eq!(rescaled.breaks().as_slice(), &[10.0, 20.0, 30.0, 40.0]);

        let widened = scale.with_range(vec![0u8, 1])?;
        assert_eq!(widened.breaks().class_count(), 2);
        Ok(())
    }

    #[test]
    fn test_ramped_pipeline() {
        let domain = Sample::from_raw(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let scale = NaturalBreaksScale::ramped(domain, 3);

        let values = vec![1.0, 5.0, 10.0, f64::NAN];
        let colors = scale.scale(&values).as_vec(values.len());
        assert_eq!(colors[0], Rgb::new(0, 200, 0));
        assert_eq!(colors[1], Rgb::new(204, 200, 0));
        assert_eq!(colors[2], Rgb::new(255, 0, 0));
        assert_eq!(colors[3], UNCLASSED);
    }

    #[test]
    fn test_ramped_degenerate_domain_maps_to_default() {
        let scale = NaturalBreaksScale::ramped(Sample::default(), 5);
        assert!(scale.get_range().is_empty());
        let colors = scale.scale(&vec![1.0, 2.0]).as_vec(2);
        assert_eq!(colors, vec![UNCLASSED, UNCLASSED]);
    }

    #[test]
    fn test_legend_entries() {
        let domain = Sample::from_raw(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let scale = NaturalBreaksScale::ramped(domain, 3);

        let entries = scale.legend_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].lower, 1.0);
        assert_eq!(entries[0].upper, 4.0);
        assert_eq!(entries[0].swatch, Rgb::new(0, 200, 0));
        assert_eq!(entries[2].lower, 7.0);
        assert_eq!(entries[2].upper, 10.0);
        assert_eq!(entries[2].swatch, Rgb::new(255, 0, 0));
    }
}
