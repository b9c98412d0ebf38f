use statrs::statistics::Statistics;

use crate::error::{DomainError, EsdError};

/// The point farthest from the mean of a set, in standard deviations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub value: f64,
    pub statistic: f64,
    /// Position within the slice that was scanned
    pub position: usize,
}

/// Find the most extreme value of `values`
///
/// Uses the sample standard deviation (divisor n - 1). When several values
/// are equally far from the mean the first one wins.
pub fn find_extremum(values: &[f64]) -> Result<Extremum, EsdError> {
    let size = values.len();
    if size < 2 {
        return Err(DomainError::InsufficientData { size }.into());
    }

    // Running mean is exact for a constant sample, so its deviations are all zero
    let mean = values.mean();

    let mut position = 0;
    let mut max_distance = (values[0] - mean).abs();

    for (i, &v) in values.iter().enumerate().skip(1) {
        let distance = (v - mean).abs();
        if distance > max_distance {
            max_distance = distance;
            position = i;
        }
    }

    if !max_distance.is_finite() {
        return Err(DomainError::NonFiniteMoments { size }.into());
    }
    if max_distance <= 0.0 {
        return Err(DomainError::ZeroStandardDeviation { size }.into());
    }

    // Deviations scaled by the largest one stay in [0, 1], so squaring cannot overflow
    let scaled_variance = values
        .iter()
        .map(|v| ((v - mean) / max_distance).powi(2))
        .sum::<f64>()
        / (size - 1) as f64;

    Ok(Extremum {
        value: values[position],
        statistic: 1.0 / scaled_variance.sqrt(),
        position,
    })
}
