//! The lexer turns characters into tokens.
//!
//! Pure classification: single characters (`+`, `(`), two-character operators
//! (`&&`, `<<`), integer literals, identifiers and keywords. Whitespace is
//! skipped. The lexer never fails; unexpected input becomes a diagnostic and
//! scanning continues with the next character, so the parser always receives
//! a token stream ending in `Eof`.

use std::{collections::HashMap, iter::Peekable, str::CharIndices};

use TokenKind::*;

use crate::{
	diagnostics::{DiagnosticBag, DiagnosticKind},
	source::{SourceText, TextSpan},
	syntax::token::{Token, TokenKind},
};

/// A lexer for ember source code.
pub struct Lexer<'a> {
	/// User input source code.
	source:      &'a str,
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme.
	start:       usize,
	/// Points past the character currently being considered.
	cursor:      usize,
	tokens:      Vec<Token<'a>>,
	diagnostics: DiagnosticBag,
	/// Reserved keywords.
	keywords:    HashMap<&'static str, TokenKind<'static>>,
}

impl<'a> Lexer<'a> {
	/// Lex the whole input into a token sequence ending in `Eof`, plus the
	/// diagnostics produced along the way.
	pub fn lex(source: &SourceText<'a>) -> (Vec<Token<'a>>, DiagnosticBag) {
		let mut lexer = Lexer::new(source.text());
		while let Some(&(index, _)) = lexer.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			lexer.start = index;
			lexer.cursor = index;
			lexer.scan_token();
		}
		let end = lexer.source.len();
		lexer.tokens.push(Token { kind: Eof, lexeme: "", span: TextSpan::new(end, 0) });
		(lexer.tokens, lexer.diagnostics)
	}

	fn new(source: &'a str) -> Self {
		let keywords = HashMap::from([
			("true", True),
			("false", False),
			("mut", Mut),
			("imut", Imut),
			("if", If),
			("else", Else),
			("while", While),
			("for", For),
			("fun", Fun),
			("return", Return),
		]);
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, tokens: vec![], diagnostics: DiagnosticBag::new(), keywords }
	}

	/// Scan a single token from the source code.
	fn scan_token(&mut self) {
		let Some(next_char) = self.advance() else { return };
		let kind = match next_char {
			'+' => Plus,
			'-' => Minus,
			'*' => Star,
			'/' => Slash,
			'%' => Percent,
			'~' => Tilde,
			'^' => Caret,
			'(' => OpenParen,
			')' => CloseParen,
			'{' => OpenBrace,
			'}' => CloseBrace,
			',' => Comma,
			'&' => if self.match_next('&') { AmpAmp } else { Amp },
			'|' => if self.match_next('|') { PipePipe } else { Pipe },
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => {
				if self.match_next('=') {
					LessEqual
				} else if self.match_next('<') {
					LessLess
				} else {
					Less
				}
			}
			'>' => {
				if self.match_next('=') {
					GreaterEqual
				} else if self.match_next('>') {
					GreaterGreater
				} else {
					Greater
				}
			}
			' ' | '\r' | '\t' | '\n' => return,
			c if c.is_ascii_digit() => self.number(),
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			c => {
				self.diagnostics.report(self.span(), DiagnosticKind::BadCharacter(c));
				return;
			}
		};

		let lexeme = &self.source[self.start..self.cursor];
		self.tokens.push(Token { kind, lexeme, span: self.span() });
	}

	/// Scan an integer literal.
	fn number(&mut self) -> TokenKind<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		match text.parse() {
			Ok(value) => Int(value),
			Err(_) => {
				self.diagnostics.report(self.span(), DiagnosticKind::InvalidInteger(text.to_string()));
				Int(0)
			}
		}
	}

	/// Scan an identifier or keyword.
	fn identifier(&mut self) -> TokenKind<'a> {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let text = &self.source[self.start..self.cursor];
		self.keywords.get(text).copied().unwrap_or(Identifier(text))
	}

	/// Match the next character if it is the expected one.
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character.
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character.
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	fn span(&self) -> TextSpan { TextSpan::from_bounds(self.start, self.cursor) }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::syntax::token::OPERATOR_KINDS;

	fn lex_one(input: &str) -> (TokenKind<'_>, String) {
		let source = SourceText::new(input);
		let (tokens, diagnostics) = Lexer::lex(&source);
		assert!(diagnostics.is_empty(), "unexpected diagnostics for {input:?}");
		// The fixture plus the trailing Eof.
		assert_eq!(tokens.len(), 2, "expected a single token for {input:?}, got {tokens:?}");
		(tokens[0].kind, tokens[0].lexeme.to_string())
	}

	#[test]
	fn lexes_single_token_fixtures() {
		assert_eq!(lex_one("123"), (Int(123), "123".to_string()));
		assert_eq!(lex_one("0"), (Int(0), "0".to_string()));
		assert_eq!(lex_one("abc"), (Identifier("abc"), "abc".to_string()));
		assert_eq!(lex_one("_tmp1"), (Identifier("_tmp1"), "_tmp1".to_string()));
		assert_eq!(lex_one("true"), (True, "true".to_string()));
		assert_eq!(lex_one("false"), (False, "false".to_string()));
		assert_eq!(lex_one("mut"), (Mut, "mut".to_string()));
		assert_eq!(lex_one("imut"), (Imut, "imut".to_string()));
		assert_eq!(lex_one("for"), (For, "for".to_string()));
		assert_eq!(lex_one("fun"), (Fun, "fun".to_string()));
	}

	#[test]
	fn operator_texts_round_trip() {
		for &kind in OPERATOR_KINDS {
			let text = kind.text().expect("operators have fixed lexemes");
			let (lexed, lexeme) = lex_one(text);
			assert_eq!(lexed, kind, "lexing {text:?}");
			assert_eq!(lexeme, text);
		}
	}

	#[test]
	fn spans_cover_lexemes() {
		let source = SourceText::new("mut abc = 42");
		let (tokens, diagnostics) = Lexer::lex(&source);
		assert!(diagnostics.is_empty());
		let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
		assert_eq!(kinds, vec![Mut, Identifier("abc"), Equal, Int(42), Eof]);
		assert_eq!(tokens[1].span, TextSpan::new(4, 3));
		assert_eq!(tokens[3].span, TextSpan::new(10, 2));
	}

	#[test]
	fn bad_characters_are_reported_and_skipped() {
		let source = SourceText::new("1 $ 2");
		let (tokens, diagnostics) = Lexer::lex(&source);
		assert_eq!(diagnostics.len(), 1);
		assert_eq!(diagnostics.iter().next().unwrap().kind, DiagnosticKind::BadCharacter('$'));
		let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
		assert_eq!(kinds, vec![Int(1), Int(2), Eof]);
	}

	#[test]
	fn oversized_integers_are_reported() {
		let source = SourceText::new("99999999999999999999");
		let (_, diagnostics) = Lexer::lex(&source);
		assert_eq!(diagnostics.len(), 1);
		assert!(matches!(diagnostics.iter().next().unwrap().kind, DiagnosticKind::InvalidInteger(_)));
	}

	#[test]
	fn two_character_operators_bind_greedily() {
		let source = SourceText::new("a<<b>=c&&d");
		let (tokens, diagnostics) = Lexer::lex(&source);
		assert!(diagnostics.is_empty());
		let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
		assert_eq!(
			kinds,
			vec![Identifier("a"), LessLess, Identifier("b"), GreaterEqual, Identifier("c"), AmpAmp, Identifier("d"), Eof]
		);
	}
}
