//! The binder turns the untyped syntax tree into a typed bound tree.
//!
//! Binding resolves names against the scope chain, types every expression
//! and checks operator applicability against the static tables. It never
//! fails: ill-typed constructs report a diagnostic and bind to a fallback
//! node (usually the offending operand) so binding can continue and report
//! every problem in one pass. Callers must check the diagnostic bag before
//! evaluating the result.
//!
//! Interactive sessions thread a [`ScopeSnapshot`] chain through successive
//! calls to [`Binder::bind_unit`] so that variables declared in earlier
//! turns stay visible.

pub mod operators;
pub mod scope;
pub mod symbol;
pub mod tree;

use std::{mem, rc::Rc};

use crate::{
	binding::{
		operators::{BoundBinaryOperator, BoundUnaryOperator},
		scope::{Scope, ScopeSnapshot},
		symbol::{FunctionSymbol, Type, VariableSymbol},
		tree::{BoundExpression, BoundStatement},
	},
	diagnostics::{DiagnosticBag, DiagnosticKind},
	evaluator::value::Value,
	source::TextSpan,
	syntax::{
		expression::{Expression, LiteralValue},
		statement::Statement,
		token::{Token, TokenKind},
		SyntaxTree,
	},
};

pub struct Binder {
	scope:            Scope,
	diagnostics:      DiagnosticBag,
	next_variable_id: usize,
	function_depth:   usize,
}

impl Binder {
	/// Bind one compilation unit against the state left behind by `previous`
	/// units. Returns the bound root, the snapshot to thread into the next
	/// unit, and every diagnostic binding produced.
	pub fn bind_unit(
		previous: Option<Rc<ScopeSnapshot>>,
		tree: &SyntaxTree<'_>,
	) -> (Rc<BoundStatement>, Rc<ScopeSnapshot>, DiagnosticBag) {
		let next_variable_id = previous.as_ref().map_or(0, |snapshot| snapshot.variable_count());
		let scope = Self::rebuild_scope(previous.as_ref());
		let mut binder = Binder { scope, diagnostics: DiagnosticBag::new(), next_variable_id, function_depth: 0 };

		let root = Rc::new(binder.bind_statement(&tree.root));
		let snapshot =
			Rc::new(ScopeSnapshot { variables: binder.scope.declared_variables(), previous: previous.clone() });
		(root, snapshot, binder.diagnostics)
	}

	/// Replay the snapshot chain oldest-first, declaring each turn's
	/// variables into its own scope so later turns shadow earlier ones.
	fn rebuild_scope(previous: Option<&Rc<ScopeSnapshot>>) -> Scope {
		let mut chain = Vec::new();
		let mut snapshot = previous.map(Rc::as_ref);
		while let Some(current) = snapshot {
			chain.push(current);
			snapshot = current.previous.as_deref();
		}

		let mut scope = Scope::new();
		for snapshot in chain.into_iter().rev() {
			scope = Scope::child(scope);
			for variable in &snapshot.variables {
				scope.try_declare(Rc::clone(variable));
			}
		}
		// The unit's own declarations live above the replayed chain.
		Scope::child(scope)
	}

	fn bind_statement(&mut self, statement: &Statement<'_>) -> BoundStatement {
		match statement {
			Statement::Block(statements) => self.bind_block_statement(statements),
			Statement::VariableDeclaration { keyword, name, initializer } => {
				self.bind_variable_declaration(keyword, name, initializer)
			}
			Statement::If { condition, then_branch, else_branch } => {
				let condition = self.bind_condition(condition);
				let then_branch = Rc::new(self.bind_statement(then_branch));
				let else_branch = else_branch.as_ref().map(|branch| Rc::new(self.bind_statement(branch)));
				BoundStatement::If { condition, then_branch, else_branch }
			}
			Statement::While { condition, body } => {
				let condition = self.bind_condition(condition);
				let body = Rc::new(self.bind_statement(body));
				BoundStatement::While { condition, body }
			}
			Statement::For { initializer, condition, increment, body } => {
				// The whole loop, loop variable included, lives in one scope.
				self.push_scope();
				let initializer = Rc::new(self.bind_statement(initializer));
				let condition = self.bind_condition(condition);
				let increment = Rc::new(self.bind_expression(increment));
				let body = Rc::new(self.bind_statement(body));
				self.pop_scope();
				BoundStatement::For { initializer, condition, increment, body }
			}
			Statement::FunctionDeclaration { name, parameters, body } => {
				self.bind_function_declaration(name, parameters, body)
			}
			Statement::Return { keyword, expression } => {
				if self.function_depth == 0 {
					self.diagnostics.report(keyword.span, DiagnosticKind::ReturnOutsideFunction);
				}
				let expression = expression.as_ref().map(|e| Rc::new(self.bind_expression(e)));
				BoundStatement::Return(expression)
			}
			Statement::Expression(expression) => BoundStatement::Expression(Rc::new(self.bind_expression(expression))),
		}
	}

	fn bind_block_statement(&mut self, statements: &[Statement<'_>]) -> BoundStatement {
		self.push_scope();
		let statements = statements.iter().map(|s| Rc::new(self.bind_statement(s))).collect();
		self.pop_scope();
		BoundStatement::Block(statements)
	}

	fn bind_variable_declaration(
		&mut self,
		keyword: &Token<'_>,
		name: &Token<'_>,
		initializer: &Expression<'_>,
	) -> BoundStatement {
		let initializer = Rc::new(self.bind_expression(initializer));
		let mutable = keyword.kind.same_kind(TokenKind::Mut);
		let variable = self.declare_variable(name, mutable, initializer.ty());
		BoundStatement::VariableDeclaration { variable, initializer }
	}

	fn bind_function_declaration(
		&mut self,
		name: &Token<'_>,
		parameters: &[Token<'_>],
		body: &Statement<'_>,
	) -> BoundStatement {
		// Parameter and return types default to int; there is no annotation
		// syntax yet.
		let parameter_symbols: Vec<_> = parameters
			.iter()
			.map(|parameter| VariableSymbol::parameter(self.next_variable_id(), parameter.lexeme, Type::Int))
			.collect();
		let function =
			Rc::new(FunctionSymbol { name: name.lexeme.to_string(), parameters: parameter_symbols, return_type: Type::Int });
		if !self.scope.try_declare_function(Rc::clone(&function)) {
			self.diagnostics.report(name.span, DiagnosticKind::AlreadyDeclared(name.lexeme.to_string()));
		}

		// Bind the body for its diagnostics only. Function bodies are checked
		// but not yet executable, so the bound form is discarded.
		self.push_scope();
		for parameter in &function.parameters {
			if !self.scope.try_declare(Rc::new(parameter.clone())) {
				self.diagnostics.report(name.span, DiagnosticKind::AlreadyDeclared(parameter.name.clone()));
			}
		}
		self.function_depth += 1;
		self.bind_statement(body);
		self.function_depth -= 1;
		self.pop_scope();

		BoundStatement::Block(vec![])
	}

	/// Bind a loop or branch condition, requiring it to be boolean.
	fn bind_condition(&mut self, expression: &Expression<'_>) -> Rc<BoundExpression> {
		let bound = self.bind_expression(expression);
		if bound.ty() != Type::Bool {
			self.diagnostics
				.report(expression.span(), DiagnosticKind::CannotConvert { from: bound.ty(), to: Type::Bool });
		}
		Rc::new(bound)
	}

	fn bind_expression(&mut self, expression: &Expression<'_>) -> BoundExpression {
		match expression {
			Expression::Literal { value, .. } => BoundExpression::Literal(match *value {
				LiteralValue::Int(value) => Value::Int(value),
				LiteralValue::Bool(value) => Value::Bool(value),
			}),
			Expression::Name(token) => self.bind_name_expression(token),
			Expression::Parenthesized { expression, .. } => self.bind_expression(expression),
			Expression::Assignment { name, value } => self.bind_assignment_expression(name, value),
			Expression::Unary { operator, operand } => self.bind_unary_expression(operator, operand),
			Expression::Binary { left, operator, right } => self.bind_binary_expression(left, operator, right),
			Expression::Call { name, arguments, close } => self.bind_call_expression(name, arguments, close),
		}
	}

	fn bind_name_expression(&mut self, token: &Token<'_>) -> BoundExpression {
		// A placeholder synthesized during error recovery; the parser already
		// reported it.
		if token.lexeme.is_empty() {
			return BoundExpression::Literal(Value::Int(0));
		}
		match self.scope.lookup(token.lexeme) {
			Some(variable) => BoundExpression::Variable(variable),
			None => {
				self.diagnostics.report(token.span, DiagnosticKind::UndefinedName(token.lexeme.to_string()));
				BoundExpression::Literal(Value::Int(0))
			}
		}
	}

	fn bind_assignment_expression(&mut self, name: &Token<'_>, value: &Expression<'_>) -> BoundExpression {
		let value_span = value.span();
		let value = Rc::new(self.bind_expression(value));
		if name.lexeme.is_empty() {
			return BoundExpression::Literal(Value::Int(0));
		}

		let variable = match self.scope.lookup(name.lexeme) {
			Some(variable) => variable,
			// Assigning an undeclared name declares it, mutable, typed by the
			// right-hand side.
			None => {
				let variable = Rc::new(VariableSymbol::new(self.next_variable_id(), name.lexeme, true, value.ty()));
				self.scope.try_declare(Rc::clone(&variable));
				variable
			}
		};

		if !variable.mutable {
			self.diagnostics.report(name.span, DiagnosticKind::CannotAssign(name.lexeme.to_string()));
			return Rc::unwrap_or_clone(value);
		}
		if value.ty() != variable.ty {
			self.diagnostics.report(value_span, DiagnosticKind::CannotConvert { from: value.ty(), to: variable.ty });
			return Rc::unwrap_or_clone(value);
		}
		BoundExpression::Assignment { variable, value }
	}

	fn bind_unary_expression(&mut self, operator: &Token<'_>, operand: &Expression<'_>) -> BoundExpression {
		let operand = Rc::new(self.bind_expression(operand));
		match BoundUnaryOperator::bind(operator.kind, operand.ty()) {
			Some(bound_operator) => BoundExpression::Unary { operator: bound_operator, operand },
			None => {
				self.diagnostics.report(
					operator.span,
					DiagnosticKind::UndefinedUnaryOperator {
						operator: operator.lexeme.to_string(),
						operand:  operand.ty(),
					},
				);
				Rc::unwrap_or_clone(operand)
			}
		}
	}

	fn bind_binary_expression(
		&mut self,
		left: &Expression<'_>,
		operator: &Token<'_>,
		right: &Expression<'_>,
	) -> BoundExpression {
		let left = Rc::new(self.bind_expression(left));
		let right = Rc::new(self.bind_expression(right));
		match BoundBinaryOperator::bind(operator.kind, left.ty(), right.ty()) {
			Some(bound_operator) => BoundExpression::Binary { operator: bound_operator, left, right },
			None => {
				self.diagnostics.report(
					operator.span,
					DiagnosticKind::UndefinedBinaryOperator {
						operator: operator.lexeme.to_string(),
						left:     left.ty(),
						right:    right.ty(),
					},
				);
				Rc::unwrap_or_clone(left)
			}
		}
	}

	fn bind_call_expression(
		&mut self,
		name: &Token<'_>,
		arguments: &[Expression<'_>],
		close: &Token<'_>,
	) -> BoundExpression {
		let argument_spans: Vec<_> = arguments.iter().map(|a| a.span()).collect();
		let arguments: Vec<_> = arguments.iter().map(|a| Rc::new(self.bind_expression(a))).collect();
		let Some(function) = self.scope.lookup_function(name.lexeme) else {
			self.diagnostics.report(name.span, DiagnosticKind::UndefinedFunction(name.lexeme.to_string()));
			return BoundExpression::Literal(Value::Int(0));
		};

		if arguments.len() != function.parameters.len() {
			let span = TextSpan::from_bounds(name.span.start, close.span.end());
			self.diagnostics.report(
				span,
				DiagnosticKind::WrongArgumentCount {
					name:     function.name.clone(),
					expected: function.parameters.len(),
					found:    arguments.len(),
				},
			);
		} else {
			for ((argument, span), parameter) in arguments.iter().zip(&argument_spans).zip(&function.parameters) {
				if argument.ty() != parameter.ty {
					self.diagnostics
						.report(*span, DiagnosticKind::CannotConvert { from: argument.ty(), to: parameter.ty });
				}
			}
		}

		// Declarations are checked but bodies are not executable yet, so any
		// unit that calls a function is rejected before evaluation.
		self.diagnostics.report(name.span, DiagnosticKind::UnsupportedCall(function.name.clone()));
		BoundExpression::Call { function, arguments }
	}

	fn declare_variable(&mut self, name: &Token<'_>, mutable: bool, ty: Type) -> Rc<VariableSymbol> {
		let variable = Rc::new(VariableSymbol::new(self.next_variable_id(), name.lexeme, mutable, ty));
		if !name.lexeme.is_empty() && !self.scope.try_declare(Rc::clone(&variable)) {
			self.diagnostics.report(name.span, DiagnosticKind::AlreadyDeclared(name.lexeme.to_string()));
		}
		variable
	}

	fn next_variable_id(&mut self) -> usize {
		let id = self.next_variable_id;
		self.next_variable_id += 1;
		id
	}

	fn push_scope(&mut self) {
		let parent = mem::take(&mut self.scope);
		self.scope = Scope::child(parent);
	}

	fn pop_scope(&mut self) { self.scope = self.scope.take_parent(); }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::SourceText;

	fn bind(input: &str) -> (Rc<BoundStatement>, DiagnosticBag) {
		let source = SourceText::new(input);
		let tree = SyntaxTree::parse(&source);
		assert!(tree.diagnostics.is_empty(), "parse diagnostics for {input:?}: {:?}", tree.diagnostics);
		let (root, _, diagnostics) = Binder::bind_unit(None, &tree);
		(root, diagnostics)
	}

	fn bind_single_diagnostic(input: &str) -> DiagnosticKind {
		let (_, diagnostics) = bind(input);
		let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind.clone()).collect();
		assert_eq!(kinds.len(), 1, "expected one diagnostic for {input:?}, got {kinds:?}");
		kinds.into_iter().next().unwrap()
	}

	#[test]
	fn binds_clean_programs_without_diagnostics() {
		for input in [
			"1 + 2 * 3",
			"{ mut x = 10 x = x + 1 }",
			"{ imut x = 10 x + 1 }",
			"{ mut x = true x = false }",
			"{ mut a = 1 { mut a = 2 a } a }",
			"if 1 < 2 { } else { }",
			"while false { }",
			"for mut i = 0 i < 5 i = i + 1 { }",
			"x = 10",
			"fun twice(a) { a * 2 }",
		] {
			let (_, diagnostics) = bind(input);
			assert!(diagnostics.is_empty(), "unexpected diagnostics for {input:?}: {diagnostics:?}");
		}
	}

	#[test]
	fn undefined_names_fall_back_to_literals() {
		assert_eq!(bind_single_diagnostic("missing + 1"), DiagnosticKind::UndefinedName("missing".to_string()));
	}

	#[test]
	fn variables_go_out_of_scope_with_their_block() {
		assert_eq!(bind_single_diagnostic("{ { mut x = 10 } x }"), DiagnosticKind::UndefinedName("x".to_string()));
	}

	#[test]
	fn assignment_type_mismatch_is_reported() {
		let kind = bind_single_diagnostic("{ mut x = 10 x = true }");
		assert_eq!(kind, DiagnosticKind::CannotConvert { from: Type::Bool, to: Type::Int });
	}

	#[test]
	fn immutable_variables_cannot_be_assigned() {
		assert_eq!(bind_single_diagnostic("{ imut x = 10 x = 20 }"), DiagnosticKind::CannotAssign("x".to_string()));
	}

	#[test]
	fn redeclaration_in_the_same_scope_is_reported() {
		assert_eq!(bind_single_diagnostic("{ mut x = 1 mut x = 2 }"), DiagnosticKind::AlreadyDeclared("x".to_string()));
	}

	#[test]
	fn conditions_must_be_boolean() {
		assert_eq!(
			bind_single_diagnostic("if 1 { }"),
			DiagnosticKind::CannotConvert { from: Type::Int, to: Type::Bool }
		);
		assert_eq!(
			bind_single_diagnostic("while 0 { }"),
			DiagnosticKind::CannotConvert { from: Type::Int, to: Type::Bool }
		);
	}

	#[test]
	fn operator_misses_keep_the_operand_type() {
		let kind = bind_single_diagnostic("true + false");
		assert_eq!(
			kind,
			DiagnosticKind::UndefinedBinaryOperator { operator: "+".to_string(), left: Type::Bool, right: Type::Bool }
		);

		let kind = bind_single_diagnostic("-true");
		assert_eq!(kind, DiagnosticKind::UndefinedUnaryOperator { operator: "-".to_string(), operand: Type::Bool });
	}

	#[test]
	fn return_is_only_allowed_inside_functions() {
		assert_eq!(bind_single_diagnostic("return 1"), DiagnosticKind::ReturnOutsideFunction);
		let (_, diagnostics) = bind("fun f() { return 1 }");
		assert!(diagnostics.is_empty(), "{diagnostics:?}");
	}

	#[test]
	fn function_bodies_are_type_checked() {
		// Parameters are ints, so a boolean operator on one must fail.
		let kind = bind_single_diagnostic("fun f(a) { !a }");
		assert_eq!(kind, DiagnosticKind::UndefinedUnaryOperator { operator: "!".to_string(), operand: Type::Int });
	}

	#[test]
	fn calls_bind_but_are_reported_as_unsupported() {
		let (_, diagnostics) = bind("{ fun f(a) { a } f(1) }");
		let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind.clone()).collect();
		assert_eq!(kinds, vec![DiagnosticKind::UnsupportedCall("f".to_string())]);
	}

	#[test]
	fn call_arity_is_checked() {
		let (_, diagnostics) = bind("{ fun f(a) { a } f(1, 2) }");
		let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind.clone()).collect();
		assert!(kinds.contains(&DiagnosticKind::WrongArgumentCount {
			name:     "f".to_string(),
			expected: 1,
			found:    2,
		}));
	}

	#[test]
	fn call_argument_types_are_checked() {
		let (_, diagnostics) = bind("{ fun f(a) { a } f(true) }");
		let kinds: Vec<_> = diagnostics.iter().map(|d| d.kind.clone()).collect();
		assert!(kinds.contains(&DiagnosticKind::CannotConvert { from: Type::Bool, to: Type::Int }));
	}

	#[test]
	fn undefined_functions_are_reported() {
		assert_eq!(bind_single_diagnostic("g()"), DiagnosticKind::UndefinedFunction("g".to_string()));
	}

	#[test]
	fn snapshots_carry_variables_across_units() {
		let source = SourceText::new("mut x = 5");
		let tree = SyntaxTree::parse(&source);
		let (_, snapshot, diagnostics) = Binder::bind_unit(None, &tree);
		assert!(diagnostics.is_empty());
		assert_eq!(snapshot.variable_count(), 1);

		let source = SourceText::new("x + 1");
		let tree = SyntaxTree::parse(&source);
		let (_, snapshot, diagnostics) = Binder::bind_unit(Some(snapshot), &tree);
		assert!(diagnostics.is_empty(), "{diagnostics:?}");
		assert_eq!(snapshot.variable_count(), 1);
	}

	#[test]
	fn later_units_shadow_earlier_declarations() {
		let source = SourceText::new("mut x = 5");
		let tree = SyntaxTree::parse(&source);
		let (_, snapshot, _) = Binder::bind_unit(None, &tree);

		let source = SourceText::new("mut x = true");
		let tree = SyntaxTree::parse(&source);
		let (_, snapshot, diagnostics) = Binder::bind_unit(Some(snapshot), &tree);
		assert!(diagnostics.is_empty(), "{diagnostics:?}");
		assert_eq!(snapshot.variable_count(), 2);

		// The latest declaration wins, so `!x` type checks.
		let source = SourceText::new("!x");
		let tree = SyntaxTree::parse(&source);
		let (_, _, diagnostics) = Binder::bind_unit(Some(snapshot), &tree);
		assert!(diagnostics.is_empty(), "{diagnostics:?}");
	}

	#[test]
	fn assignment_to_undeclared_name_declares_it() {
		let (root, diagnostics) = bind("a = 10");
		assert!(diagnostics.is_empty(), "{diagnostics:?}");
		let BoundStatement::Expression(expression) = root.as_ref() else { panic!("expected an expression") };
		let BoundExpression::Assignment { variable, .. } = expression.as_ref() else { panic!("expected assignment") };
		assert!(variable.mutable);
		assert_eq!(variable.ty, Type::Int);
	}
}
