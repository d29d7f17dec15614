//! Lowering desugars structured control flow into labels and jumps.
//!
//! `if`, `while` and `for` become sequences of `Label`, `Goto` and
//! `GotoIfFalse` statements, and the result is flattened into a single
//! top-level block the evaluator can step through with a plain cursor.
//!
//! `for` lowers in two steps: first into an equivalent `while`, which the
//! rewriter then lowers again into jumps.

pub mod rewriter;

use std::rc::Rc;

use crate::{
	binding::{
		symbol::LabelSymbol,
		tree::{BoundExpression, BoundStatement},
	},
	lowering::rewriter::BoundTreeRewriter,
};

#[derive(Default)]
pub struct Lowerer {
	label_count: usize,
}

impl Lowerer {
	/// Lower a bound unit into a flat, jump-based block.
	pub fn lower(root: &Rc<BoundStatement>) -> Rc<BoundStatement> {
		let mut lowerer = Lowerer::default();
		let lowered = lowerer.rewrite_statement(root);
		Rc::new(BoundStatement::Block(flatten(&lowered)))
	}

	fn generate_label(&mut self) -> LabelSymbol {
		self.label_count += 1;
		LabelSymbol::new(format!("label{}", self.label_count))
	}
}

impl BoundTreeRewriter for Lowerer {
	fn rewrite_if(
		&mut self,
		_statement: &Rc<BoundStatement>,
		condition: &Rc<BoundExpression>,
		then_branch: &Rc<BoundStatement>,
		else_branch: Option<&Rc<BoundStatement>>,
	) -> Rc<BoundStatement> {
		let lowered = match else_branch {
			// if <c> <then>
			//
			//   gotoIfFalse <c> end
			//   <then>
			// end:
			None => {
				let end_label = self.generate_label();
				Rc::new(BoundStatement::Block(vec![
					Rc::new(BoundStatement::GotoIfFalse { label: end_label.clone(), condition: Rc::clone(condition) }),
					Rc::clone(then_branch),
					Rc::new(BoundStatement::Label(end_label)),
				]))
			}
			// if <c> <then> else <else>
			//
			//   gotoIfFalse <c> else
			//   <then>
			//   goto end
			// else:
			//   <else>
			// end:
			Some(else_branch) => {
				let else_label = self.generate_label();
				let end_label = self.generate_label();
				Rc::new(BoundStatement::Block(vec![
					Rc::new(BoundStatement::GotoIfFalse { label: else_label.clone(), condition: Rc::clone(condition) }),
					Rc::clone(then_branch),
					Rc::new(BoundStatement::Goto(end_label.clone())),
					Rc::new(BoundStatement::Label(else_label)),
					Rc::clone(else_branch),
					Rc::new(BoundStatement::Label(end_label)),
				]))
			}
		};
		self.rewrite_statement(&lowered)
	}

	fn rewrite_while(
		&mut self,
		_statement: &Rc<BoundStatement>,
		condition: &Rc<BoundExpression>,
		body: &Rc<BoundStatement>,
	) -> Rc<BoundStatement> {
		// while <c> <body>
		//
		// start:
		//   gotoIfFalse <c> end
		//   <body>
		//   goto start
		// end:
		let start_label = self.generate_label();
		let end_label = self.generate_label();
		let lowered = Rc::new(BoundStatement::Block(vec![
			Rc::new(BoundStatement::Label(start_label.clone())),
			Rc::new(BoundStatement::GotoIfFalse { label: end_label.clone(), condition: Rc::clone(condition) }),
			Rc::clone(body),
			Rc::new(BoundStatement::Goto(start_label)),
			Rc::new(BoundStatement::Label(end_label)),
		]));
		self.rewrite_statement(&lowered)
	}

	fn rewrite_for(
		&mut self,
		_statement: &Rc<BoundStatement>,
		initializer: &Rc<BoundStatement>,
		condition: &Rc<BoundExpression>,
		increment: &Rc<BoundExpression>,
		body: &Rc<BoundStatement>,
	) -> Rc<BoundStatement> {
		// for <init> <c> <inc> <body>
		//
		// <init>
		// while <c> {
		//   <body>
		//   <inc>
		// }
		let while_body = Rc::new(BoundStatement::Block(vec![
			Rc::clone(body),
			Rc::new(BoundStatement::Expression(Rc::clone(increment))),
		]));
		let lowered = Rc::new(BoundStatement::Block(vec![
			Rc::clone(initializer),
			Rc::new(BoundStatement::While { condition: Rc::clone(condition), body: while_body }),
		]));
		self.rewrite_statement(&lowered)
	}
}

/// Hoist every nested block's statements into one flat sequence.
fn flatten(root: &Rc<BoundStatement>) -> Vec<Rc<BoundStatement>> {
	let mut flat = Vec::new();
	let mut stack = vec![Rc::clone(root)];
	while let Some(statement) = stack.pop() {
		match statement.as_ref() {
			BoundStatement::Block(statements) => stack.extend(statements.iter().rev().map(Rc::clone)),
			_ => flat.push(statement),
		}
	}
	flat
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{binding::Binder, source::SourceText, syntax::SyntaxTree};

	fn lower(input: &str) -> Vec<Rc<BoundStatement>> {
		let source = SourceText::new(input);
		let tree = SyntaxTree::parse(&source);
		assert!(tree.diagnostics.is_empty(), "parse diagnostics for {input:?}");
		let (root, _, diagnostics) = Binder::bind_unit(None, &tree);
		assert!(diagnostics.is_empty(), "bind diagnostics for {input:?}: {diagnostics:?}");
		let lowered = Lowerer::lower(&root);
		let BoundStatement::Block(statements) = lowered.as_ref() else { panic!("lowering must produce a block") };
		statements.clone()
	}

	fn assert_flat_and_structured_free(statements: &[Rc<BoundStatement>]) {
		for statement in statements {
			assert!(
				!matches!(
					statement.as_ref(),
					BoundStatement::Block(_)
						| BoundStatement::If { .. } | BoundStatement::While { .. }
						| BoundStatement::For { .. }
				),
				"structured statement survived lowering: {statement:?}"
			);
		}
	}

	fn labels(statements: &[Rc<BoundStatement>]) -> Vec<String> {
		statements
			.iter()
			.filter_map(|s| match s.as_ref() {
				BoundStatement::Label(label) => Some(label.name.clone()),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn lowers_if_to_conditional_jump() {
		let statements = lower("if 1 < 2 { mut x = 1 x }");
		assert_flat_and_structured_free(&statements);
		assert!(matches!(statements[0].as_ref(), BoundStatement::GotoIfFalse { .. }));
		assert!(matches!(statements.last().unwrap().as_ref(), BoundStatement::Label(_)));
	}

	#[test]
	fn lowers_if_else_to_two_labels() {
		let statements = lower("if 1 < 2 { 1 } else { 2 }");
		assert_flat_and_structured_free(&statements);
		assert_eq!(labels(&statements).len(), 2);
	}

	#[test]
	fn lowers_while_to_loop_of_jumps() {
		let statements = lower("{ mut i = 0 while i < 3 i = i + 1 }");
		assert_flat_and_structured_free(&statements);
		assert!(statements.iter().any(|s| matches!(s.as_ref(), BoundStatement::Goto(_))));
	}

	#[test]
	fn lowers_for_through_while() {
		let statements = lower("for mut i = 0 i < 5 i = i + 1 { i }");
		assert_flat_and_structured_free(&statements);
		// initializer, start label, conditional jump, body, increment,
		// back jump, end label
		assert!(matches!(statements[0].as_ref(), BoundStatement::VariableDeclaration { .. }));
		assert_eq!(labels(&statements).len(), 2);
	}

	#[test]
	fn labels_are_unique_across_nested_constructs() {
		let statements = lower("{ mut i = 0 while i < 3 { if i == 1 { i = 5 } else { i = i + 1 } } }");
		assert_flat_and_structured_free(&statements);
		let mut names = labels(&statements);
		let total = names.len();
		names.sort();
		names.dedup();
		assert_eq!(names.len(), total, "duplicate labels after lowering");
	}

	#[test]
	fn control_flow_free_trees_are_shared_not_copied() {
		struct Identity;
		impl BoundTreeRewriter for Identity {}

		let source = SourceText::new("{ mut x = 1 x = x + 1 }");
		let tree = SyntaxTree::parse(&source);
		let (root, _, _) = Binder::bind_unit(None, &tree);
		let rewritten = Identity.rewrite_statement(&root);
		assert!(Rc::ptr_eq(&rewritten, &root));
	}
}
