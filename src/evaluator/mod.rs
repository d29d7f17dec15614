//! The evaluator executes a lowered, flattened unit.
//!
//! Control flow is gone by the time a program reaches this module: the unit
//! is one flat block of straight-line statements, labels and jumps. Execution
//! is a cursor over that sequence plus a label-to-index map built up front.
//!
//! The unit's result is the value of the last expression or initializer that
//! was executed, which is what an interactive session prints.

pub mod store;
pub mod value;

use std::{collections::HashMap, rc::Rc};

use anyhow::{anyhow, bail};

use crate::{
	binding::{
		operators::{BoundBinaryOperatorKind, BoundUnaryOperatorKind},
		symbol::LabelSymbol,
		tree::{BoundExpression, BoundStatement},
	},
	error::evaluator::{EvaluatorError, RuntimeError},
	evaluator::{store::VariableStore, value::Value},
};

pub struct Evaluator<'a> {
	store: &'a mut VariableStore,
	last:  Value,
}

impl<'a> Evaluator<'a> {
	/// Execute one lowered unit against the session's variable store.
	pub fn evaluate(unit: &Rc<BoundStatement>, store: &'a mut VariableStore) -> Result<Value, EvaluatorError> {
		let BoundStatement::Block(statements) = unit.as_ref() else {
			return Err(anyhow!("evaluator expects a flattened block, found {unit:?}").into());
		};

		let mut labels: HashMap<&LabelSymbol, usize> = HashMap::new();
		for (index, statement) in statements.iter().enumerate() {
			if let BoundStatement::Label(label) = statement.as_ref() {
				labels.insert(label, index);
			}
		}
		let jump_target = |label: &LabelSymbol| -> anyhow::Result<usize> {
			labels.get(label).copied().ok_or_else(|| anyhow!("jump to unknown label {label}"))
		};

		let mut evaluator = Evaluator { store, last: Value::Int(0) };
		let mut cursor = 0;
		while cursor < statements.len() {
			match statements[cursor].as_ref() {
				BoundStatement::VariableDeclaration { variable, initializer } => {
					let value = evaluator.evaluate_expression(initializer)?;
					evaluator.store.set(variable, value);
					evaluator.last = value;
					cursor += 1;
				}
				BoundStatement::Expression(expression) => {
					evaluator.last = evaluator.evaluate_expression(expression)?;
					cursor += 1;
				}
				BoundStatement::Label(_) => cursor += 1,
				BoundStatement::Goto(label) => cursor = jump_target(label)?,
				BoundStatement::GotoIfFalse { label, condition } => {
					let condition = evaluator.evaluate_expression(condition)?.expect_bool()?;
					cursor = if condition { cursor + 1 } else { jump_target(label)? };
				}
				other => return Err(anyhow!("unlowered statement reached the evaluator: {other:?}").into()),
			}
		}
		Ok(evaluator.last)
	}

	fn evaluate_expression(&mut self, expression: &BoundExpression) -> Result<Value, EvaluatorError> {
		match expression {
			BoundExpression::Literal(value) => Ok(*value),
			BoundExpression::Variable(variable) => self
				.store
				.get(variable)
				.ok_or_else(|| RuntimeError::UninitializedVariable(variable.name.clone()).into()),
			BoundExpression::Assignment { variable, value } => {
				let value = self.evaluate_expression(value)?;
				self.store.set(variable, value);
				Ok(value)
			}
			BoundExpression::Unary { operator, operand } => {
				let operand = self.evaluate_expression(operand)?;
				Ok(Self::evaluate_unary(operator.kind, operand)?)
			}
			BoundExpression::Binary { operator, left, right } => {
				let left = self.evaluate_expression(left)?;
				let right = self.evaluate_expression(right)?;
				Self::evaluate_binary(operator.kind, left, right)
			}
			BoundExpression::Call { function, .. } => {
				// The binder rejects units containing calls before they reach
				// evaluation.
				Err(anyhow!("call to {} is not executable", function.name).into())
			}
		}
	}

	fn evaluate_unary(kind: BoundUnaryOperatorKind, operand: Value) -> anyhow::Result<Value> {
		use BoundUnaryOperatorKind::*;
		Ok(match kind {
			Identity => Value::Int(operand.expect_int()?),
			Negation => Value::Int(operand.expect_int()?.wrapping_neg()),
			LogicalNot => Value::Bool(!operand.expect_bool()?),
			BitwiseNot => Value::Int(!operand.expect_int()?),
		})
	}

	fn evaluate_binary(kind: BoundBinaryOperatorKind, left: Value, right: Value) -> Result<Value, EvaluatorError> {
		use BoundBinaryOperatorKind::*;
		// Arithmetic wraps on overflow.
		Ok(match kind {
			Addition => Value::Int(left.expect_int()?.wrapping_add(right.expect_int()?)),
			Subtraction => Value::Int(left.expect_int()?.wrapping_sub(right.expect_int()?)),
			Multiplication => Value::Int(left.expect_int()?.wrapping_mul(right.expect_int()?)),
			Division | Remainder => {
				let (left, right) = (left.expect_int()?, right.expect_int()?);
				if right == 0 {
					return Err(RuntimeError::DivisionByZero.into());
				}
				match kind {
					Division => Value::Int(left.wrapping_div(right)),
					_ => Value::Int(left.wrapping_rem(right)),
				}
			}
			BitwiseAnd => Self::bitwise(left, right, |l, r| l & r, |l, r| l & r)?,
			BitwiseOr => Self::bitwise(left, right, |l, r| l | r, |l, r| l | r)?,
			BitwiseXor => Self::bitwise(left, right, |l, r| l ^ r, |l, r| l ^ r)?,
			ShiftLeft => Value::Int(left.expect_int()?.wrapping_shl(right.expect_int()? as u32)),
			ShiftRight => Value::Int(left.expect_int()?.wrapping_shr(right.expect_int()? as u32)),
			LogicalAnd => Value::Bool(left.expect_bool()? && right.expect_bool()?),
			LogicalOr => Value::Bool(left.expect_bool()? || right.expect_bool()?),
			Equals => Value::Bool(left == right),
			NotEquals => Value::Bool(left != right),
			Less => Value::Bool(left.expect_int()? < right.expect_int()?),
			LessOrEqual => Value::Bool(left.expect_int()? <= right.expect_int()?),
			Greater => Value::Bool(left.expect_int()? > right.expect_int()?),
			GreaterOrEqual => Value::Bool(left.expect_int()? >= right.expect_int()?),
		})
	}

	/// Apply a bitwise operator to an int pair or a bool pair.
	fn bitwise(
		left: Value,
		right: Value,
		ints: impl Fn(i64, i64) -> i64,
		bools: impl Fn(bool, bool) -> bool,
	) -> anyhow::Result<Value> {
		match (left, right) {
			(Value::Int(l), Value::Int(r)) => Ok(Value::Int(ints(l, r))),
			(Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(bools(l, r))),
			_ => bail!("mismatched bitwise operands {left} and {right}"),
		}
	}
}
