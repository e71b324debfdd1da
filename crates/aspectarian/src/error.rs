use thiserror::Error;

/// Errors raised when a caller hands the engine malformed chart data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AspectError {
    #[error("Chart object at position {index} has no identifier; every object needs an id to take part in aspect calculations")]
    MissingIdentity { index: usize },
    #[error("Chart object {id} has a non-finite longitude ({value})")]
    NonFiniteLongitude { id: String, value: f64 },
}
