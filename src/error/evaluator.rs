//! Errors the evaluator can produce.

use thiserror::Error;

/// A recoverable fault raised by a well-typed program at runtime. The
/// session survives these; only the failing unit is abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
	#[error("division by zero")]
	DivisionByZero,
	/// Reading a variable whose declaration bound but never executed, e.g.
	/// because its initializer faulted or its enclosing loop body never ran.
	#[error("variable '{0}' was never initialized")]
	UninitializedVariable(String),
}

#[derive(Debug, Error)]
pub enum EvaluatorError {
	/// An invariant the binder and lowerer were supposed to uphold did not
	/// hold. Always a bug, never a user error.
	#[error("InternalError: {0}")]
	Internal(#[from] anyhow::Error),
	#[error(transparent)]
	Runtime(#[from] RuntimeError),
}
