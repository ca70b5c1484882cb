use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An operation that needs a bound container ran before `bind`.
    #[error("chart is not initialized: `{operation}` requires a bound container")]
    NotInitialized { operation: &'static str },

    #[error("duplicate series name `{0}`")]
    DuplicateSeries(String),

    #[error("container `{0}` could not be resolved")]
    UnresolvedContainer(String),

    #[error("data submission failed: {0}")]
    Submit(String),
}
