//! Expression nodes of the untyped syntax tree.
//!
//! An `Expression` mirrors the source grammar exactly; names and operators
//! are still unresolved. The `Display` impl prints the parenthesized prefix
//! form the parser tests assert on, e.g. `1 + 2 * 3` as `(+ 1 (* 2 3))`.

use Expression::*;

use crate::{source::TextSpan, syntax::token::Token};

/// A literal recognized at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralValue {
	Int(i64),
	Bool(bool),
}

/// Expression syntax nodes. Immutable once parsed.
#[derive(Debug)]
pub enum Expression<'a> {
	Literal { token: Token<'a>, value: LiteralValue },
	Name(Token<'a>),
	Unary { operator: Token<'a>, operand: Box<Expression<'a>> },
	Binary { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	Parenthesized { open: Token<'a>, expression: Box<Expression<'a>>, close: Token<'a> },
	Assignment { name: Token<'a>, value: Box<Expression<'a>> },
	Call { name: Token<'a>, arguments: Vec<Expression<'a>>, close: Token<'a> },
}

impl Expression<'_> {
	/// The source range this expression covers, for diagnostics.
	pub fn span(&self) -> TextSpan {
		match self {
			Literal { token, .. } => token.span,
			Name(token) => token.span,
			Unary { operator, operand } => TextSpan::from_bounds(operator.span.start, operand.span().end()),
			Binary { left, right, .. } => TextSpan::from_bounds(left.span().start, right.span().end()),
			Parenthesized { open, close, .. } => TextSpan::from_bounds(open.span.start, close.span.end()),
			Assignment { name, value } => TextSpan::from_bounds(name.span.start, value.span().end()),
			Call { name, close, .. } => TextSpan::from_bounds(name.span.start, close.span.end()),
		}
	}
}

impl std::fmt::Display for Expression<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal { token, .. } => write!(f, "{}", token.lexeme),
			Name(token) => write!(f, "{}", token.lexeme),
			Unary { operator, operand } => write!(f, "({} {operand})", operator.lexeme),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Parenthesized { expression, .. } => write!(f, "(group {expression})"),
			Assignment { name, value } => write!(f, "(= {} {value})", name.lexeme),
			Call { name, arguments, .. } => write!(
				f,
				"(call {} {})",
				name.lexeme,
				arguments.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(" ")
			),
		}
	}
}
