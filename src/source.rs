//! Source-text abstraction: the raw input plus a precomputed line-start table.
//!
//! The pipeline itself only ever works with byte offsets (`TextSpan`); the
//! line/column view exists purely so diagnostics can be rendered as
//! `(line, col): message` with a caret-underlined snippet.

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
	/// Byte offset of the first character.
	pub start:  usize,
	/// Length in bytes.
	pub length: usize,
}

impl TextSpan {
	pub fn new(start: usize, length: usize) -> Self { Self { start, length } }

	pub fn from_bounds(start: usize, end: usize) -> Self { Self { start, length: end - start } }

	pub fn end(&self) -> usize { self.start + self.length }
}

/// Borrowed source code with line-indexed span lookup.
pub struct SourceText<'a> {
	text:        &'a str,
	/// Byte offset of the first character of every line.
	line_starts: Vec<usize>,
}

impl<'a> SourceText<'a> {
	pub fn new(text: &'a str) -> Self {
		let mut line_starts = vec![0];
		for (index, byte) in text.bytes().enumerate() {
			if byte == b'\n' {
				line_starts.push(index + 1);
			}
		}
		Self { text, line_starts }
	}

	pub fn text(&self) -> &'a str { self.text }

	/// The zero-based line containing the given byte offset.
	pub fn line_index(&self, position: usize) -> usize {
		self.line_starts.partition_point(|&start| start <= position) - 1
	}

	pub fn line_start(&self, line: usize) -> usize { self.line_starts[line.min(self.line_starts.len() - 1)] }

	/// The text of a line, without its trailing newline.
	pub fn line_text(&self, line: usize) -> &'a str {
		let start = self.line_start(line);
		let end = match self.line_starts.get(line + 1) {
			Some(&next) => next,
			None => self.text.len(),
		};
		self.text[start..end].trim_end_matches(['\n', '\r'])
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn line_index_maps_offsets_to_lines() {
		let source = SourceText::new("one\ntwo\nthree");
		assert_eq!(source.line_index(0), 0);
		assert_eq!(source.line_index(3), 0);
		assert_eq!(source.line_index(4), 1);
		assert_eq!(source.line_index(8), 2);
		assert_eq!(source.line_index(12), 2);
	}

	#[test]
	fn line_text_strips_newlines() {
		let source = SourceText::new("one\ntwo\r\nthree");
		assert_eq!(source.line_text(0), "one");
		assert_eq!(source.line_text(1), "two");
		assert_eq!(source.line_text(2), "three");
	}

	#[test]
	fn span_bounds() {
		let span = TextSpan::from_bounds(3, 8);
		assert_eq!(span.start, 3);
		assert_eq!(span.length, 5);
		assert_eq!(span.end(), 8);
	}
}
