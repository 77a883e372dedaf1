use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("a chart needs at least {required} samples, got {actual}")]
    TooFewSamples { required: usize, actual: usize },

    #[error("sample {index} is not a finite number")]
    NonFiniteSample { index: usize },

    #[error("sample {index} is missing")]
    MissingSample { index: usize },

    #[error("SVG backend error: {0}")]
    Backend(String),
}
