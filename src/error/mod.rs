//! Error types, grouped by the stage that produces them.
//!
//! User mistakes never surface as errors here; those are diagnostics,
//! rendered against the source text and counted. `EmberError` covers what is
//! left: runtime faults a correct program can still hit, and internal
//! invariant violations.

pub mod evaluator;

use thiserror::Error;

use crate::error::evaluator::{EvaluatorError, RuntimeError};

/// The error type the driver hands to callers.
#[derive(Debug, Error)]
pub enum EmberError {
	#[error("InternalError: {0}")]
	Internal(#[from] anyhow::Error),
	/// The unit produced diagnostics and was not evaluated. The diagnostics
	/// themselves were already rendered to the caller's error stream.
	#[error("generated {0} diagnostics")]
	Diagnostics(usize),
	#[error("runtime error: {0}")]
	Runtime(#[from] RuntimeError),
}

impl From<EvaluatorError> for EmberError {
	fn from(error: EvaluatorError) -> Self {
		match error {
			EvaluatorError::Internal(error) => EmberError::Internal(error),
			EvaluatorError::Runtime(error) => EmberError::Runtime(error),
		}
	}
}
