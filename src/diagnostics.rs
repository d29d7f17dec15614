//! User-facing diagnostics.
//!
//! Lexing, parsing and binding never fail with an error for bad user input;
//! they append `Diagnostic` records to a `DiagnosticBag` and keep going, so a
//! single run reports as much as possible. A unit that produced diagnostics is
//! not evaluated. Internal faults and runtime faults are a different animal
//! and live in the `error` module.

use crate::{
	binding::symbol::Type,
	source::{SourceText, TextSpan},
};

/// The kinds of user errors the pipeline can report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
	/// A character the lexer does not recognize.
	BadCharacter(char),
	/// An integer literal that does not fit the value type.
	InvalidInteger(String),
	/// The parser found something other than what the grammar requires.
	UnexpectedToken { expected: String, found: String },
	/// A name that is not declared in any enclosing scope.
	UndefinedName(String),
	/// A call target that is not a declared function.
	UndefinedFunction(String),
	/// A second declaration of the same name in the same scope.
	AlreadyDeclared(String),
	/// Assignment to an `imut` variable.
	CannotAssign(String),
	/// A value of one type where another is required. No coercions exist.
	CannotConvert { from: Type, to: Type },
	UndefinedUnaryOperator { operator: String, operand: Type },
	UndefinedBinaryOperator { operator: String, left: Type, right: Type },
	WrongArgumentCount { name: String, expected: usize, found: usize },
	/// Calls parse and bind, but function bodies are not executed yet.
	UnsupportedCall(String),
	ReturnOutsideFunction,
}

impl std::fmt::Display for DiagnosticKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use DiagnosticKind::*;
		match self {
			BadCharacter(c) => write!(f, "bad character '{c}' in input"),
			InvalidInteger(text) => write!(f, "the number {text} is not a valid integer"),
			UnexpectedToken { expected, found } => write!(f, "unexpected token <{found}>, expected <{expected}>"),
			UndefinedName(name) => write!(f, "undefined name '{name}'"),
			UndefinedFunction(name) => write!(f, "undefined function '{name}'"),
			AlreadyDeclared(name) => write!(f, "'{name}' is already declared in this scope"),
			CannotAssign(name) => write!(f, "variable '{name}' is read-only and cannot be assigned to"),
			CannotConvert { from, to } => write!(f, "cannot convert type {from} to {to}"),
			UndefinedUnaryOperator { operator, operand } => {
				write!(f, "unary operator '{operator}' is not defined for type {operand}")
			}
			UndefinedBinaryOperator { operator, left, right } => {
				write!(f, "binary operator '{operator}' is not defined for types {left} and {right}")
			}
			WrongArgumentCount { name, expected, found } => {
				write!(f, "function '{name}' expects {expected} argument(s), got {found}")
			}
			UnsupportedCall(name) => write!(f, "function '{name}' cannot be called yet"),
			ReturnOutsideFunction => write!(f, "'return' is only allowed inside a function body"),
		}
	}
}

/// A single reportable user error with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub span: TextSpan,
	pub kind: DiagnosticKind,
}

impl Diagnostic {
	/// The canonical `(line, col): message` presentation with the offending
	/// source line and a caret underline. Columns count characters, not
	/// bytes, so carets line up after multi-byte input.
	pub fn render(&self, source: &SourceText) -> String {
		let line = source.line_index(self.span.start);
		let text = source.line_text(line);
		let column = source.text()[source.line_start(line)..self.span.start].chars().count() + 1;
		let width = source.text()[self.span.start..self.span.end()].chars().count().max(1);
		let underline = "^".repeat(width);
		format!("({}, {column}): {}\n    {text}\n    {}{underline}", line + 1, self.kind, " ".repeat(column - 1))
	}
}

impl std::fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.kind) }
}

/// An ordered, appendable collection of diagnostics.
///
/// Created empty per compilation unit, populated during lexing, parsing and
/// binding, then read by the caller for reporting. Never thrown.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
	diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
	pub fn new() -> Self { Self::default() }

	pub fn report(&mut self, span: TextSpan, kind: DiagnosticKind) {
		self.diagnostics.push(Diagnostic { span, kind });
	}

	/// Append another bag, preserving order across pipeline stages.
	pub fn extend(&mut self, other: DiagnosticBag) { self.diagnostics.extend(other.diagnostics) }

	pub fn is_empty(&self) -> bool { self.diagnostics.is_empty() }

	pub fn len(&self) -> usize { self.diagnostics.len() }

	pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> { self.diagnostics.iter() }
}

impl IntoIterator for DiagnosticBag {
	type IntoIter = std::vec::IntoIter<Diagnostic>;
	type Item = Diagnostic;

	fn into_iter(self) -> Self::IntoIter { self.diagnostics.into_iter() }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_points_at_the_offending_slice() {
		let source = SourceText::new("mut x = 10\nx = true");
		let diagnostic = Diagnostic {
			span: TextSpan::from_bounds(15, 19),
			kind: DiagnosticKind::CannotConvert { from: Type::Bool, to: Type::Int },
		};
		let rendered = diagnostic.render(&source);
		assert_eq!(rendered, "(2, 5): cannot convert type bool to int\n    x = true\n        ^^^^");
	}

	#[test]
	fn render_columns_count_characters_not_bytes() {
		// 'é' is two bytes; the caret must still sit under `true`.
		let source = SourceText::new("aé = true");
		let diagnostic = Diagnostic {
			span: TextSpan::from_bounds(6, 10),
			kind: DiagnosticKind::CannotConvert { from: Type::Bool, to: Type::Int },
		};
		let rendered = diagnostic.render(&source);
		assert_eq!(rendered, "(1, 6): cannot convert type bool to int\n    aé = true\n         ^^^^");
	}

	#[test]
	fn bags_concatenate_in_order() {
		let mut first = DiagnosticBag::new();
		first.report(TextSpan::new(0, 1), DiagnosticKind::BadCharacter('$'));
		let mut second = DiagnosticBag::new();
		second.report(TextSpan::new(2, 1), DiagnosticKind::UndefinedName("x".into()));
		first.extend(second);
		assert_eq!(first.len(), 2);
		let kinds: Vec<_> = first.iter().map(|d| d.kind.clone()).collect();
		assert_eq!(kinds[0], DiagnosticKind::BadCharacter('$'));
		assert_eq!(kinds[1], DiagnosticKind::UndefinedName("x".into()));
	}
}
