//! Runtime values.

use anyhow::bail;

use crate::binding::symbol::Type;

/// A runtime value. Everything the language computes is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
	Int(i64),
	Bool(bool),
}

impl Value {
	pub fn ty(self) -> Type {
		match self {
			Value::Int(_) => Type::Int,
			Value::Bool(_) => Type::Bool,
		}
	}

	/// The binder guarantees operand types match the operator tables; a
	/// mismatch here is an evaluator bug, not a user error.
	pub(crate) fn expect_int(self) -> anyhow::Result<i64> {
		match self {
			Value::Int(value) => Ok(value),
			Value::Bool(_) => bail!("expected an int value, found {self}"),
		}
	}

	pub(crate) fn expect_bool(self) -> anyhow::Result<bool> {
		match self {
			Value::Bool(value) => Ok(value),
			Value::Int(_) => bail!("expected a bool value, found {self}"),
		}
	}
}

impl std::fmt::Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Int(value) => write!(f, "{value}"),
			Value::Bool(value) => write!(f, "{value}"),
		}
	}
}
