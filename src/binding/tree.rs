//! The typed bound tree.
//!
//! Nodes are held behind `Rc` so that rewriting passes can share unchanged
//! subtrees with the input instead of cloning them.

use std::rc::Rc;

use crate::{
	binding::{
		operators::{BoundBinaryOperator, BoundUnaryOperator},
		symbol::{FunctionSymbol, LabelSymbol, Type, VariableSymbol},
	},
	evaluator::value::Value,
};

/// A typed expression. Every node knows its result type. Cloning is
/// shallow; children stay shared.
#[derive(Debug, Clone)]
pub enum BoundExpression {
	Literal(Value),
	Variable(Rc<VariableSymbol>),
	Assignment { variable: Rc<VariableSymbol>, value: Rc<BoundExpression> },
	Unary { operator: &'static BoundUnaryOperator, operand: Rc<BoundExpression> },
	Binary { operator: &'static BoundBinaryOperator, left: Rc<BoundExpression>, right: Rc<BoundExpression> },
	Call { function: Rc<FunctionSymbol>, arguments: Vec<Rc<BoundExpression>> },
}

impl BoundExpression {
	pub fn ty(&self) -> Type {
		match self {
			BoundExpression::Literal(value) => value.ty(),
			BoundExpression::Variable(variable) => variable.ty,
			BoundExpression::Assignment { value, .. } => value.ty(),
			BoundExpression::Unary { operator, .. } => operator.result,
			BoundExpression::Binary { operator, .. } => operator.result,
			BoundExpression::Call { function, .. } => function.return_type,
		}
	}
}

/// A typed statement. `Label`, `Goto` and `GotoIfFalse` only exist after
/// lowering; `If`, `While` and `For` only before.
#[derive(Debug)]
pub enum BoundStatement {
	Block(Vec<Rc<BoundStatement>>),
	VariableDeclaration { variable: Rc<VariableSymbol>, initializer: Rc<BoundExpression> },
	Expression(Rc<BoundExpression>),
	If { condition: Rc<BoundExpression>, then_branch: Rc<BoundStatement>, else_branch: Option<Rc<BoundStatement>> },
	While { condition: Rc<BoundExpression>, body: Rc<BoundStatement> },
	For {
		initializer: Rc<BoundStatement>,
		condition:   Rc<BoundExpression>,
		increment:   Rc<BoundExpression>,
		body:        Rc<BoundStatement>,
	},
	Label(LabelSymbol),
	Goto(LabelSymbol),
	GotoIfFalse { label: LabelSymbol, condition: Rc<BoundExpression> },
	Return(Option<Rc<BoundExpression>>),
}
