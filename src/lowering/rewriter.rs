//! A generic bottom-up rewriter over the bound tree.
//!
//! The default methods rebuild a node only when one of its children actually
//! changed, which `Rc::ptr_eq` detects cheaply. A pass that leaves a subtree
//! alone therefore returns the input `Rc` itself, and unchanged subtrees stay
//! shared between the input and output trees.

use std::rc::Rc;

use crate::binding::{
	symbol::{LabelSymbol, VariableSymbol},
	tree::{BoundExpression, BoundStatement},
};

pub trait BoundTreeRewriter {
	fn rewrite_statement(&mut self, statement: &Rc<BoundStatement>) -> Rc<BoundStatement> {
		match statement.as_ref() {
			BoundStatement::Block(statements) => self.rewrite_block(statement, statements),
			BoundStatement::VariableDeclaration { variable, initializer } => {
				self.rewrite_variable_declaration(statement, variable, initializer)
			}
			BoundStatement::Expression(expression) => self.rewrite_expression_statement(statement, expression),
			BoundStatement::If { condition, then_branch, else_branch } => {
				self.rewrite_if(statement, condition, then_branch, else_branch.as_ref())
			}
			BoundStatement::While { condition, body } => self.rewrite_while(statement, condition, body),
			BoundStatement::For { initializer, condition, increment, body } => {
				self.rewrite_for(statement, initializer, condition, increment, body)
			}
			BoundStatement::Label(_) | BoundStatement::Goto(_) => Rc::clone(statement),
			BoundStatement::GotoIfFalse { label, condition } => self.rewrite_goto_if_false(statement, label, condition),
			BoundStatement::Return(expression) => self.rewrite_return(statement, expression.as_ref()),
		}
	}

	fn rewrite_block(&mut self, statement: &Rc<BoundStatement>, statements: &[Rc<BoundStatement>]) -> Rc<BoundStatement> {
		let rewritten: Vec<_> = statements.iter().map(|s| self.rewrite_statement(s)).collect();
		if rewritten.iter().zip(statements).all(|(a, b)| Rc::ptr_eq(a, b)) {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::Block(rewritten))
	}

	fn rewrite_variable_declaration(
		&mut self,
		statement: &Rc<BoundStatement>,
		variable: &Rc<VariableSymbol>,
		initializer: &Rc<BoundExpression>,
	) -> Rc<BoundStatement> {
		let rewritten = self.rewrite_expression(initializer);
		if Rc::ptr_eq(&rewritten, initializer) {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::VariableDeclaration { variable: Rc::clone(variable), initializer: rewritten })
	}

	fn rewrite_expression_statement(
		&mut self,
		statement: &Rc<BoundStatement>,
		expression: &Rc<BoundExpression>,
	) -> Rc<BoundStatement> {
		let rewritten = self.rewrite_expression(expression);
		if Rc::ptr_eq(&rewritten, expression) {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::Expression(rewritten))
	}

	fn rewrite_if(
		&mut self,
		statement: &Rc<BoundStatement>,
		condition: &Rc<BoundExpression>,
		then_branch: &Rc<BoundStatement>,
		else_branch: Option<&Rc<BoundStatement>>,
	) -> Rc<BoundStatement> {
		let condition_rw = self.rewrite_expression(condition);
		let then_rw = self.rewrite_statement(then_branch);
		let else_rw = else_branch.map(|branch| self.rewrite_statement(branch));
		let unchanged = Rc::ptr_eq(&condition_rw, condition)
			&& Rc::ptr_eq(&then_rw, then_branch)
			&& match (&else_rw, else_branch) {
				(Some(a), Some(b)) => Rc::ptr_eq(a, b),
				(None, None) => true,
				_ => false,
			};
		if unchanged {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::If { condition: condition_rw, then_branch: then_rw, else_branch: else_rw })
	}

	fn rewrite_while(
		&mut self,
		statement: &Rc<BoundStatement>,
		condition: &Rc<BoundExpression>,
		body: &Rc<BoundStatement>,
	) -> Rc<BoundStatement> {
		let condition_rw = self.rewrite_expression(condition);
		let body_rw = self.rewrite_statement(body);
		if Rc::ptr_eq(&condition_rw, condition) && Rc::ptr_eq(&body_rw, body) {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::While { condition: condition_rw, body: body_rw })
	}

	fn rewrite_for(
		&mut self,
		statement: &Rc<BoundStatement>,
		initializer: &Rc<BoundStatement>,
		condition: &Rc<BoundExpression>,
		increment: &Rc<BoundExpression>,
		body: &Rc<BoundStatement>,
	) -> Rc<BoundStatement> {
		let initializer_rw = self.rewrite_statement(initializer);
		let condition_rw = self.rewrite_expression(condition);
		let increment_rw = self.rewrite_expression(increment);
		let body_rw = self.rewrite_statement(body);
		if Rc::ptr_eq(&initializer_rw, initializer)
			&& Rc::ptr_eq(&condition_rw, condition)
			&& Rc::ptr_eq(&increment_rw, increment)
			&& Rc::ptr_eq(&body_rw, body)
		{
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::For {
			initializer: initializer_rw,
			condition:   condition_rw,
			increment:   increment_rw,
			body:        body_rw,
		})
	}

	fn rewrite_goto_if_false(
		&mut self,
		statement: &Rc<BoundStatement>,
		label: &LabelSymbol,
		condition: &Rc<BoundExpression>,
	) -> Rc<BoundStatement> {
		let rewritten = self.rewrite_expression(condition);
		if Rc::ptr_eq(&rewritten, condition) {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::GotoIfFalse { label: label.clone(), condition: rewritten })
	}

	fn rewrite_return(
		&mut self,
		statement: &Rc<BoundStatement>,
		expression: Option<&Rc<BoundExpression>>,
	) -> Rc<BoundStatement> {
		let rewritten = expression.map(|e| self.rewrite_expression(e));
		let unchanged = match (&rewritten, expression) {
			(Some(a), Some(b)) => Rc::ptr_eq(a, b),
			(None, None) => true,
			_ => false,
		};
		if unchanged {
			return Rc::clone(statement);
		}
		Rc::new(BoundStatement::Return(rewritten))
	}

	fn rewrite_expression(&mut self, expression: &Rc<BoundExpression>) -> Rc<BoundExpression> {
		match expression.as_ref() {
			BoundExpression::Literal(_) | BoundExpression::Variable(_) => Rc::clone(expression),
			BoundExpression::Assignment { variable, value } => {
				let rewritten = self.rewrite_expression(value);
				if Rc::ptr_eq(&rewritten, value) {
					return Rc::clone(expression);
				}
				Rc::new(BoundExpression::Assignment { variable: Rc::clone(variable), value: rewritten })
			}
			BoundExpression::Unary { operator, operand } => {
				let rewritten = self.rewrite_expression(operand);
				if Rc::ptr_eq(&rewritten, operand) {
					return Rc::clone(expression);
				}
				Rc::new(BoundExpression::Unary { operator, operand: rewritten })
			}
			BoundExpression::Binary { operator, left, right } => {
				let left_rw = self.rewrite_expression(left);
				let right_rw = self.rewrite_expression(right);
				if Rc::ptr_eq(&left_rw, left) && Rc::ptr_eq(&right_rw, right) {
					return Rc::clone(expression);
				}
				Rc::new(BoundExpression::Binary { operator, left: left_rw, right: right_rw })
			}
			BoundExpression::Call { function, arguments } => {
				let rewritten: Vec<_> = arguments.iter().map(|a| self.rewrite_expression(a)).collect();
				if rewritten.iter().zip(arguments).all(|(a, b)| Rc::ptr_eq(a, b)) {
					return Rc::clone(expression);
				}
				Rc::new(BoundExpression::Call { function: Rc::clone(function), arguments: rewritten })
			}
		}
	}
}
