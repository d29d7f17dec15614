//! The parser turns tokens into an untyped syntax tree.
//!
//! Statement grammar:
//!
//! ``` BNF
//! unit        → statement EOF ;
//! statement   → block | varDecl | ifStmt | whileStmt | forStmt | funDecl | returnStmt | exprStmt ;
//! block       → "{" statement* "}" ;
//! varDecl     → ( "mut" | "imut" ) IDENTIFIER "=" expression ;
//! ifStmt      → "if" expression statement ( "else" statement )? ;
//! whileStmt   → "while" expression statement ;
//! forStmt     → "for" ( varDecl | expression ) expression expression statement ;
//! funDecl     → "fun" IDENTIFIER "(" ( IDENTIFIER ( "," IDENTIFIER )* )? ")" statement ;
//! returnStmt  → "return" expression? ;
//! ```
//!
//! Expression parsing is precedence climbing over integer priorities. Ties
//! bind left. Assignment is recognized up front with two tokens of lookahead
//! (`IDENTIFIER "="`), a call with `IDENTIFIER "("`.
//!
//! |Priority|Operators|
//! --|--
//! 6 (unary)|`+ - ! ~`
//! 5|`* / %`
//! 4|`+ -`
//! 3|`== != < <= > >=`
//! 2|`&& & << >>`
//! 1|`\|\| \| ^`
//!
//! Error recovery: `match_token` reports an unexpected token and synthesizes
//! a zero-width placeholder *without consuming input*; loops that parse
//! statement lists watch for zero progress and force-advance one token so
//! parsing always terminates. Diagnostics never abort a parse.

pub mod expression;
pub mod statement;
pub mod token;

use TokenKind::*;

use crate::{
	diagnostics::{DiagnosticBag, DiagnosticKind},
	lexer::Lexer,
	source::{SourceText, TextSpan},
	syntax::{
		expression::{Expression, LiteralValue},
		statement::Statement,
		token::{Token, TokenKind},
	},
};

/// The parsed form of one compilation unit: a single top-level statement.
pub struct SyntaxTree<'a> {
	pub root:        Statement<'a>,
	/// Lexer and parser diagnostics, in source order.
	pub diagnostics: DiagnosticBag,
}

impl<'a> SyntaxTree<'a> {
	pub fn parse(source: &SourceText<'a>) -> SyntaxTree<'a> {
		let (tokens, diagnostics) = Lexer::lex(source);
		let mut parser = Parser { tokens, position: 0, diagnostics };
		let root = parser.parse_statement();
		parser.match_token(Eof);
		SyntaxTree { root, diagnostics: parser.diagnostics }
	}
}

struct Parser<'a> {
	tokens:      Vec<Token<'a>>,
	position:    usize,
	diagnostics: DiagnosticBag,
}

impl<'a> Parser<'a> {
	fn parse_statement(&mut self) -> Statement<'a> {
		match self.current().kind {
			OpenBrace => self.parse_block_statement(),
			Mut | Imut => self.parse_variable_declaration(),
			If => self.parse_if_statement(),
			While => self.parse_while_statement(),
			For => self.parse_for_statement(),
			Fun => self.parse_function_declaration(),
			Return => self.parse_return_statement(),
			_ => Statement::Expression(self.parse_expression()),
		}
	}

	fn parse_block_statement(&mut self) -> Statement<'a> {
		self.match_token(OpenBrace);
		let mut statements = Vec::new();
		while !matches!(self.current().kind, CloseBrace | Eof) {
			let start = self.position;
			statements.push(self.parse_statement());
			// A failed statement parse may not have consumed anything; skip a
			// token so the loop is guaranteed to terminate. The diagnostic was
			// already reported.
			if self.position == start {
				self.advance();
			}
		}
		self.match_token(CloseBrace);
		Statement::Block(statements)
	}

	fn parse_variable_declaration(&mut self) -> Statement<'a> {
		let keyword = self.advance();
		let name = self.match_token(Identifier(""));
		self.match_token(Equal);
		let initializer = self.parse_expression();
		Statement::VariableDeclaration { keyword, name, initializer }
	}

	fn parse_if_statement(&mut self) -> Statement<'a> {
		self.advance();
		let condition = self.parse_expression();
		let then_branch = Box::new(self.parse_statement());
		let else_branch = if self.current().kind.same_kind(Else) {
			self.advance();
			Some(Box::new(self.parse_statement()))
		} else {
			None
		};
		Statement::If { condition, then_branch, else_branch }
	}

	fn parse_while_statement(&mut self) -> Statement<'a> {
		self.advance();
		let condition = self.parse_expression();
		let body = Box::new(self.parse_statement());
		Statement::While { condition, body }
	}

	fn parse_for_statement(&mut self) -> Statement<'a> {
		self.advance();
		let initializer = Box::new(match self.current().kind {
			Mut | Imut => self.parse_variable_declaration(),
			_ => Statement::Expression(self.parse_expression()),
		});
		let condition = self.parse_expression();
		let increment = self.parse_expression();
		let body = Box::new(self.parse_statement());
		Statement::For { initializer, condition, increment, body }
	}

	fn parse_function_declaration(&mut self) -> Statement<'a> {
		self.advance();
		let name = self.match_token(Identifier(""));
		self.match_token(OpenParen);
		let mut parameters = Vec::new();
		if !self.current().kind.same_kind(CloseParen) {
			loop {
				parameters.push(self.match_token(Identifier("")));
				if self.current().kind.same_kind(Comma) {
					self.advance();
				} else {
					break;
				}
			}
		}
		self.match_token(CloseParen);
		let body = Box::new(self.parse_statement());
		Statement::FunctionDeclaration { name, parameters, body }
	}

	fn parse_return_statement(&mut self) -> Statement<'a> {
		let keyword = self.advance();
		let expression = match self.current().kind {
			CloseBrace | Eof => None,
			_ => Some(self.parse_expression()),
		};
		Statement::Return { keyword, expression }
	}

	fn parse_expression(&mut self) -> Expression<'a> { self.parse_assignment_expression() }

	/// `IDENTIFIER "="` starts an assignment; everything else is binary.
	/// Assignment associates right through recursion.
	fn parse_assignment_expression(&mut self) -> Expression<'a> {
		if self.current().kind.same_kind(Identifier("")) && self.peek(1).kind.same_kind(Equal) {
			let name = self.advance();
			self.advance();
			let value = Box::new(self.parse_assignment_expression());
			return Expression::Assignment { name, value };
		}
		self.parse_binary_expression(0)
	}

	/// Precedence climbing: while the current token binds tighter than the
	/// parent, consume it and recurse with its priority as the new floor.
	fn parse_binary_expression(&mut self, parent_priority: usize) -> Expression<'a> {
		let unary_priority = self.current().kind.unary_priority();
		let mut left = if unary_priority != 0 && unary_priority >= parent_priority {
			let operator = self.advance();
			let operand = Box::new(self.parse_binary_expression(unary_priority));
			Expression::Unary { operator, operand }
		} else {
			self.parse_primary_expression()
		};

		loop {
			let priority = self.current().kind.binary_priority();
			if priority == 0 || priority <= parent_priority {
				break;
			}
			let operator = self.advance();
			let right = Box::new(self.parse_binary_expression(priority));
			left = Expression::Binary { left: Box::new(left), operator, right };
		}
		left
	}

	fn parse_primary_expression(&mut self) -> Expression<'a> {
		match self.current().kind {
			OpenParen => {
				let open = self.advance();
				let expression = Box::new(self.parse_expression());
				let close = self.match_token(CloseParen);
				Expression::Parenthesized { open, expression, close }
			}
			True => Expression::Literal { token: self.advance(), value: LiteralValue::Bool(true) },
			False => Expression::Literal { token: self.advance(), value: LiteralValue::Bool(false) },
			Int(value) => Expression::Literal { token: self.advance(), value: LiteralValue::Int(value) },
			Identifier(_) if self.peek(1).kind.same_kind(OpenParen) => self.parse_call_expression(),
			_ => Expression::Name(self.match_token(Identifier(""))),
		}
	}

	fn parse_call_expression(&mut self) -> Expression<'a> {
		let name = self.advance();
		self.advance(); // consume '('
		let mut arguments = Vec::new();
		if !self.current().kind.same_kind(CloseParen) {
			loop {
				arguments.push(self.parse_expression());
				if self.current().kind.same_kind(Comma) {
					self.advance();
				} else {
					break;
				}
			}
		}
		let close = self.match_token(CloseParen);
		Expression::Call { name, arguments, close }
	}

	/// Consume the current token if its kind matches; otherwise report and
	/// synthesize a zero-width placeholder without consuming input.
	fn match_token(&mut self, expected: TokenKind<'a>) -> Token<'a> {
		let current = self.current();
		if current.kind.same_kind(expected) {
			return self.advance();
		}
		self.diagnostics.report(
			current.span,
			DiagnosticKind::UnexpectedToken { expected: expected.to_string(), found: current.kind.to_string() },
		);
		Token { kind: expected, lexeme: "", span: TextSpan::new(current.span.start, 0) }
	}

	fn current(&self) -> Token<'a> { self.peek(0) }

	/// Look ahead without consuming; clamped to the trailing `Eof`.
	fn peek(&self, offset: usize) -> Token<'a> {
		let index = (self.position + offset).min(self.tokens.len() - 1);
		self.tokens[index]
	}

	/// Advance to the next token, returning the current one. Never moves past
	/// the trailing `Eof`.
	fn advance(&mut self) -> Token<'a> {
		let current = self.current();
		if self.position < self.tokens.len() - 1 {
			self.position += 1;
		}
		current
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::token::OPERATOR_KINDS;

	fn parse(input: &str, expected: &str) {
		let source = SourceText::new(input);
		let tree = SyntaxTree::parse(&source);
		assert!(tree.diagnostics.is_empty(), "unexpected diagnostics for {input:?}: {:?}", tree.diagnostics);
		let Statement::Expression(expression) = tree.root else {
			panic!("expected an expression statement for {input:?}, got {:?}", tree.root);
		};
		assert_eq!(expression.to_string(), expected, "for input {input:?}");
	}

	#[test]
	fn parse_expressions() {
		parse("3 + 4 * (2 - 1)", "(+ 3 (* 4 (group (- 2 1))))");
		parse("1 + 2 * 3 / 4 - 5", "(- (+ 1 (/ (* 2 3) 4)) 5)");
		parse("8 % 3 + 2", "(+ (% 8 3) 2)");
	}

	#[test]
	fn parse_unary() {
		parse("-123", "(- 123)");
		parse("!true", "(! true)");
		parse("~0", "(~ 0)");
		parse("-1 + 2", "(+ (- 1) 2)");
		parse("!!false", "(! (! false))");
	}

	#[test]
	fn parse_comparison_associates_left() {
		parse("1 < 2", "(< 1 2)");
		parse("1 < 2 < 3", "(< (< 1 2) 3)");
		parse("1 == 2 == 3", "(== (== 1 2) 3)");
	}

	#[test]
	fn parse_logical_and_bitwise_tiers() {
		// `&&` and `&` share a tier; `||`, `|` and `^` share the one below.
		parse("a && b & c", "(& (&& a b) c)");
		parse("a || b | c ^ d", "(^ (| (|| a b) c) d)");
		parse("a & b | c", "(| (& a b) c)");
		parse("a == b && c", "(&& (== a b) c)");
	}

	#[test]
	fn parse_assignment_associates_right() {
		parse("a = 1", "(= a 1)");
		parse("a = b = 3", "(= a (= b 3))");
		parse("a = b + 1", "(= a (+ b 1))");
	}

	#[test]
	fn parse_calls() {
		parse("f()", "(call f )");
		parse("f(1)", "(call f 1)");
		parse("f(1, a + 2)", "(call f 1 (+ a 2))");
		parse("f(g(x))", "(call f (call g x))");
	}

	#[test]
	fn binary_operator_pairs_associate_by_priority() {
		for &op1 in OPERATOR_KINDS {
			if op1.binary_priority() == 0 {
				continue;
			}
			for &op2 in OPERATOR_KINDS {
				if op2.binary_priority() == 0 {
					continue;
				}
				let t1 = op1.text().unwrap();
				let t2 = op2.text().unwrap();
				let input = format!("a {t1} b {t2} c");
				let expected = if op1.binary_priority() >= op2.binary_priority() {
					format!("({t2} ({t1} a b) c)")
				} else {
					format!("({t1} a ({t2} b c))")
				};
				parse(&input, &expected);
			}
		}
	}

	fn parse_statement(input: &str) -> Statement<'_> {
		// Leaks the source so the tree can be returned; fine in tests.
		let source = SourceText::new(String::leak(input.to_string()));
		let tree = SyntaxTree::parse(&source);
		assert!(tree.diagnostics.is_empty(), "unexpected diagnostics for {input:?}: {:?}", tree.diagnostics);
		tree.root
	}

	#[test]
	fn parse_variable_declarations() {
		let Statement::VariableDeclaration { keyword, name, initializer } = parse_statement("mut x = 1 + 2") else {
			panic!("expected a variable declaration")
		};
		assert!(keyword.kind.same_kind(Mut));
		assert_eq!(name.lexeme, "x");
		assert_eq!(initializer.to_string(), "(+ 1 2)");

		let Statement::VariableDeclaration { keyword, .. } = parse_statement("imut y = true") else {
			panic!("expected a variable declaration")
		};
		assert!(keyword.kind.same_kind(Imut));
	}

	#[test]
	fn parse_blocks_and_control_flow() {
		assert!(matches!(parse_statement("{ mut x = 1 x }"), Statement::Block(statements) if statements.len() == 2));
		assert!(matches!(parse_statement("if a < 1 { } else { }"), Statement::If { else_branch: Some(_), .. }));
		assert!(matches!(parse_statement("if a < 1 { }"), Statement::If { else_branch: None, .. }));
		assert!(matches!(parse_statement("while a < 10 a = a + 1"), Statement::While { .. }));
		let Statement::For { initializer, condition, increment, .. } =
			parse_statement("for mut i = 0 i < 5 i = i + 1 { }")
		else {
			panic!("expected a for statement")
		};
		assert!(matches!(*initializer, Statement::VariableDeclaration { .. }));
		assert_eq!(condition.to_string(), "(< i 5)");
		assert_eq!(increment.to_string(), "(= i (+ i 1))");
	}

	#[test]
	fn parse_function_declarations() {
		let Statement::FunctionDeclaration { name, parameters, body } = parse_statement("fun add(a, b) { a + b }")
		else {
			panic!("expected a function declaration")
		};
		assert_eq!(name.lexeme, "add");
		assert_eq!(parameters.len(), 2);
		assert!(matches!(*body, Statement::Block(_)));

		assert!(matches!(parse_statement("fun zero() { return 0 }"), Statement::FunctionDeclaration { .. }));
	}

	#[test]
	fn match_token_reports_without_consuming() {
		let source = SourceText::new("mut = 5");
		let tree = SyntaxTree::parse(&source);
		assert!(!tree.diagnostics.is_empty());
		// The declaration still came back with a placeholder name.
		let Statement::VariableDeclaration { name, initializer, .. } = tree.root else {
			panic!("expected a variable declaration")
		};
		assert_eq!(name.lexeme, "");
		assert_eq!(initializer.to_string(), "5");
	}

	#[test]
	fn block_parsing_terminates_on_garbage() {
		let source = SourceText::new("{ ) ) }");
		let tree = SyntaxTree::parse(&source);
		assert!(!tree.diagnostics.is_empty());
		assert!(matches!(tree.root, Statement::Block(_)));
	}

	#[test]
	fn unterminated_block_stops_at_end_of_input() {
		let source = SourceText::new("{ mut x = 1");
		let tree = SyntaxTree::parse(&source);
		assert_eq!(tree.diagnostics.len(), 1);
		assert!(matches!(tree.root, Statement::Block(statements) if statements.len() == 1));
	}
}
