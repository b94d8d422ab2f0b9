use thiserror::Error;

use crate::parser::ParseError;
use crate::stats::InvalidResultError;

/// Top-level error for callers that drive both core transforms.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    InvalidResult(#[from] InvalidResultError),
}
