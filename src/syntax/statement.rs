//! Statement nodes of the untyped syntax tree.
//!
//! Statements are whitespace-separated; there are no semicolons and no
//! newline sensitivity anywhere in the grammar.

use crate::syntax::{expression::Expression, token::Token};

/// A statement in the language.
#[derive(Debug)]
pub enum Statement<'a> {
	/// A brace-delimited sequence of statements with its own scope.
	Block(Vec<Statement<'a>>),
	/// `mut name = initializer` or `imut name = initializer`.
	VariableDeclaration { keyword: Token<'a>, name: Token<'a>, initializer: Expression<'a> },
	If {
		condition:   Expression<'a>,
		then_branch: Box<Statement<'a>>,
		else_branch: Option<Box<Statement<'a>>>,
	},
	While {
		condition: Expression<'a>,
		body:      Box<Statement<'a>>,
	},
	/// `for <init> <condition> <increment> <body>`; the initializer is either
	/// a variable declaration or an expression statement.
	For {
		initializer: Box<Statement<'a>>,
		condition:   Expression<'a>,
		increment:   Expression<'a>,
		body:        Box<Statement<'a>>,
	},
	/// `fun name(params) body`. Grammar-complete; bodies are not executed.
	FunctionDeclaration {
		name:       Token<'a>,
		parameters: Vec<Token<'a>>,
		body:       Box<Statement<'a>>,
	},
	Return {
		keyword:    Token<'a>,
		expression: Option<Expression<'a>>,
	},
	/// An expression used as a statement.
	Expression(Expression<'a>),
}
