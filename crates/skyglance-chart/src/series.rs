use crate::error::{ChartError, ChartResult};

/// Smallest series the renderer can lay out.
pub const MIN_SAMPLES: usize = 2;

/// Ordered hourly temperatures, sample 0 being the current hour.
///
/// Always holds at least [`MIN_SAMPLES`] finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSeries {
    samples: Vec<f64>,
}

impl TemperatureSeries {
    pub fn new(samples: Vec<f64>) -> ChartResult<Self> {
        if samples.len() < MIN_SAMPLES {
            return Err(ChartError::TooFewSamples {
                required: MIN_SAMPLES,
                actual: samples.len(),
            });
        }
        if let Some(index) = samples.iter().position(|t| !t.is_finite()) {
            return Err(ChartError::NonFiniteSample { index });
        }
        Ok(Self { samples })
    }

    /// Build from an hourly feed that may have gaps.
    ///
    /// Samples are placed by index, so a missing hour rejects the whole series
    /// rather than shifting the later hours left.
    pub fn from_hourly(hourly: &[Option<f64>]) -> ChartResult<Self> {
        let samples = hourly
            .iter()
            .enumerate()
            .map(|(index, t)| t.ok_or(ChartError::MissingSample { index }))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(samples)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.samples.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl TryFrom<Vec<f64>> for TemperatureSeries {
    type Error = ChartError;

    fn try_from(samples: Vec<f64>) -> ChartResult<Self> {
        Self::new(samples)
    }
}
