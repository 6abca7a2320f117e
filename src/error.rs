use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeurustError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("Incompatible shapes for operation: {0:?} and {1:?}")]
    IncompatibleShapes(Vec<usize>, Vec<usize>),
    #[error("Invalid axis: {0} for tensor of dimension {1}")]
    InvalidAxis(usize, usize),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Uninitialized running state: {0}")]
    UninitializedState(&'static str),
}

pub type Result<T> = std::result::Result<T, NeurustError>;
