//! ember is a small imperative scripting language: integers, booleans,
//! mutable and immutable variables, blocks, `if`/`while`/`for` control flow
//! and an interactive prompt that keeps state between lines.
//!
//! A unit of source moves through four stages:
//!
//! 1. [`syntax::SyntaxTree::parse`] lexes and parses it into an untyped tree,
//!    recovering from errors so there is always a tree.
//! 2. [`binding::Binder::bind_unit`] resolves names against the scope chain,
//!    types every node and collects diagnostics instead of failing.
//! 3. [`lowering::Lowerer::lower`] desugars control flow into labels and
//!    jumps and flattens the result.
//! 4. [`evaluator::Evaluator::evaluate`] steps a cursor over the flat
//!    program.
//!
//! User mistakes are [`diagnostics`], rendered with carets against the
//! offending source line; they suppress evaluation but never abort the
//! session.

pub mod binding;
pub mod cli;
pub mod diagnostics;
mod ember;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod lowering;
pub mod source;
pub mod syntax;

pub use crate::{
	ember::Ember,
	error::{
		evaluator::{EvaluatorError, RuntimeError},
		EmberError,
	},
	evaluator::value::Value,
};
