//! The closed set of typed operators.
//!
//! Binding an operator means finding the table row whose token and operand
//! types match. No row, no operator: the binder reports a diagnostic and the
//! expression falls back to its operand. The tables are the single source of
//! truth for which operator/type combinations exist.

use crate::{
	binding::symbol::Type,
	syntax::token::TokenKind::{self, *},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundUnaryOperatorKind {
	Identity,
	Negation,
	LogicalNot,
	BitwiseNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundBinaryOperatorKind {
	Addition,
	Subtraction,
	Multiplication,
	Division,
	Remainder,
	BitwiseAnd,
	BitwiseOr,
	BitwiseXor,
	ShiftLeft,
	ShiftRight,
	LogicalAnd,
	LogicalOr,
	Equals,
	NotEquals,
	Less,
	LessOrEqual,
	Greater,
	GreaterOrEqual,
}

#[derive(Debug, Clone, Copy)]
pub struct BoundUnaryOperator {
	pub token:   TokenKind<'static>,
	pub kind:    BoundUnaryOperatorKind,
	pub operand: Type,
	pub result:  Type,
}

impl BoundUnaryOperator {
	const fn new(token: TokenKind<'static>, kind: BoundUnaryOperatorKind, operand: Type, result: Type) -> Self {
		Self { token, kind, operand, result }
	}

	pub fn bind(token: TokenKind<'_>, operand: Type) -> Option<&'static BoundUnaryOperator> {
		UNARY_OPERATORS.iter().find(|op| op.token.same_kind(token) && op.operand == operand)
	}
}

#[derive(Debug, Clone, Copy)]
pub struct BoundBinaryOperator {
	pub token:  TokenKind<'static>,
	pub kind:   BoundBinaryOperatorKind,
	pub left:   Type,
	pub right:  Type,
	pub result: Type,
}

impl BoundBinaryOperator {
	const fn new(token: TokenKind<'static>, kind: BoundBinaryOperatorKind, left: Type, right: Type, result: Type) -> Self {
		Self { token, kind, left, right, result }
	}

	const fn arithmetic(token: TokenKind<'static>, kind: BoundBinaryOperatorKind) -> Self {
		Self::new(token, kind, Type::Int, Type::Int, Type::Int)
	}

	const fn comparison(token: TokenKind<'static>, kind: BoundBinaryOperatorKind) -> Self {
		Self::new(token, kind, Type::Int, Type::Int, Type::Bool)
	}

	const fn logical(token: TokenKind<'static>, kind: BoundBinaryOperatorKind) -> Self {
		Self::new(token, kind, Type::Bool, Type::Bool, Type::Bool)
	}

	pub fn bind(token: TokenKind<'_>, left: Type, right: Type) -> Option<&'static BoundBinaryOperator> {
		BINARY_OPERATORS.iter().find(|op| op.token.same_kind(token) && op.left == left && op.right == right)
	}
}

use BoundBinaryOperatorKind as B;
use BoundUnaryOperatorKind as U;

static UNARY_OPERATORS: &[BoundUnaryOperator] = &[
	BoundUnaryOperator::new(Plus, U::Identity, Type::Int, Type::Int),
	BoundUnaryOperator::new(Minus, U::Negation, Type::Int, Type::Int),
	BoundUnaryOperator::new(Bang, U::LogicalNot, Type::Bool, Type::Bool),
	BoundUnaryOperator::new(Tilde, U::BitwiseNot, Type::Int, Type::Int),
];

static BINARY_OPERATORS: &[BoundBinaryOperator] = &[
	BoundBinaryOperator::arithmetic(Plus, B::Addition),
	BoundBinaryOperator::arithmetic(Minus, B::Subtraction),
	BoundBinaryOperator::arithmetic(Star, B::Multiplication),
	BoundBinaryOperator::arithmetic(Slash, B::Division),
	BoundBinaryOperator::arithmetic(Percent, B::Remainder),
	BoundBinaryOperator::arithmetic(Amp, B::BitwiseAnd),
	BoundBinaryOperator::arithmetic(Pipe, B::BitwiseOr),
	BoundBinaryOperator::arithmetic(Caret, B::BitwiseXor),
	BoundBinaryOperator::arithmetic(LessLess, B::ShiftLeft),
	BoundBinaryOperator::arithmetic(GreaterGreater, B::ShiftRight),
	BoundBinaryOperator::comparison(EqualEqual, B::Equals),
	BoundBinaryOperator::comparison(BangEqual, B::NotEquals),
	BoundBinaryOperator::comparison(Less, B::Less),
	BoundBinaryOperator::comparison(LessEqual, B::LessOrEqual),
	BoundBinaryOperator::comparison(Greater, B::Greater),
	BoundBinaryOperator::comparison(GreaterEqual, B::GreaterOrEqual),
	BoundBinaryOperator::logical(AmpAmp, B::LogicalAnd),
	BoundBinaryOperator::logical(PipePipe, B::LogicalOr),
	BoundBinaryOperator::logical(Amp, B::BitwiseAnd),
	BoundBinaryOperator::logical(Pipe, B::BitwiseOr),
	BoundBinaryOperator::logical(Caret, B::BitwiseXor),
	BoundBinaryOperator::logical(EqualEqual, B::Equals),
	BoundBinaryOperator::logical(BangEqual, B::NotEquals),
];
