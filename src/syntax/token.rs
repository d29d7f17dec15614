//! Token kinds and the operator precedence tables the parser climbs over.

use std::mem;

use TokenKind::*;

use crate::source::TextSpan;

/// The different kinds of tokens, literal payloads included. Copying is
/// lightweight: payloads are either `i64` or a borrowed slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind<'a> {
	/// Integer literal, e.g. `123`.
	Int(i64),
	/// Identifier, e.g. a variable or function name.
	Identifier(&'a str),
	/// Boolean literal `true`.
	True,
	/// Boolean literal `false`.
	False,
	/// Mutable variable declaration keyword.
	Mut,
	/// Immutable variable declaration keyword.
	Imut,
	If,
	Else,
	While,
	For,
	/// Function declaration keyword.
	Fun,
	Return,
	Plus,
	Minus,
	Star,
	Slash,
	Percent,
	Bang,
	Tilde,
	/// Bitwise AND `&`.
	Amp,
	/// Logical AND `&&`.
	AmpAmp,
	/// Bitwise OR `|`.
	Pipe,
	/// Logical OR `||`.
	PipePipe,
	/// Bitwise XOR `^`.
	Caret,
	/// Left shift `<<`.
	LessLess,
	/// Right shift `>>`.
	GreaterGreater,
	Equal,
	EqualEqual,
	BangEqual,
	Less,
	LessEqual,
	Greater,
	GreaterEqual,
	OpenParen,
	CloseParen,
	OpenBrace,
	CloseBrace,
	Comma,
	/// End of input.
	Eof,
}

/// Every fixed-lexeme operator kind, for table-driven tests.
pub const OPERATOR_KINDS: &[TokenKind<'static>] = &[
	Plus, Minus, Star, Slash, Percent, Bang, Tilde, Amp, AmpAmp, Pipe, PipePipe, Caret, LessLess, GreaterGreater,
	Equal, EqualEqual, BangEqual, Less, LessEqual, Greater, GreaterEqual,
];

impl<'a> TokenKind<'a> {
	/// Kind equality, ignoring literal payloads.
	pub fn same_kind(self, other: TokenKind<'a>) -> bool { mem::discriminant(&self) == mem::discriminant(&other) }

	/// Prefix operator priority; 0 means not a unary operator.
	pub fn unary_priority(self) -> usize {
		match self {
			Plus | Minus | Bang | Tilde => 6,
			_ => 0,
		}
	}

	/// Infix operator priority; 0 terminates precedence climbing.
	///
	/// `&&` shares a tier with `&`, `<<`, `>>`, and `||` with `|`, `^`. That
	/// grouping is unusual but part of the language definition.
	pub fn binary_priority(self) -> usize {
		match self {
			Star | Slash | Percent => 5,
			Plus | Minus => 4,
			EqualEqual | BangEqual | Less | LessEqual | Greater | GreaterEqual => 3,
			AmpAmp | Amp | LessLess | GreaterGreater => 2,
			PipePipe | Pipe | Caret => 1,
			_ => 0,
		}
	}

	/// The fixed lexeme of this kind, if it has one.
	pub fn text(self) -> Option<&'static str> {
		Some(match self {
			True => "true",
			False => "false",
			Mut => "mut",
			Imut => "imut",
			If => "if",
			Else => "else",
			While => "while",
			For => "for",
			Fun => "fun",
			Return => "return",
			Plus => "+",
			Minus => "-",
			Star => "*",
			Slash => "/",
			Percent => "%",
			Bang => "!",
			Tilde => "~",
			Amp => "&",
			AmpAmp => "&&",
			Pipe => "|",
			PipePipe => "||",
			Caret => "^",
			LessLess => "<<",
			GreaterGreater => ">>",
			Equal => "=",
			EqualEqual => "==",
			BangEqual => "!=",
			Less => "<",
			LessEqual => "<=",
			Greater => ">",
			GreaterEqual => ">=",
			OpenParen => "(",
			CloseParen => ")",
			OpenBrace => "{",
			CloseBrace => "}",
			Comma => ",",
			Int(_) | Identifier(_) | Eof => return None,
		})
	}
}

impl std::fmt::Display for TokenKind<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Int(_) => write!(f, "integer"),
			Identifier(_) => write!(f, "identifier"),
			Eof => write!(f, "end of input"),
			other => write!(f, "{}", other.text().unwrap_or("?")),
		}
	}
}

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
	pub kind:   TokenKind<'a>,
	/// The raw source slice; empty for synthesized placeholder tokens.
	pub lexeme: &'a str,
	pub span:   TextSpan,
}
