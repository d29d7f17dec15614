//! Variable storage shared across the units of a session.

use crate::{binding::symbol::VariableSymbol, evaluator::value::Value};

/// Flat storage indexed by symbol id. Ids are assigned densely by the
/// binder, so a `Vec` of slots is all the "environment" the flattened,
/// jump-based program needs.
#[derive(Debug, Default)]
pub struct VariableStore {
	slots: Vec<Option<Value>>,
}

impl VariableStore {
	pub fn new() -> Self { Self::default() }

	pub fn get(&self, variable: &VariableSymbol) -> Option<Value> { self.slots.get(variable.id).copied().flatten() }

	pub fn set(&mut self, variable: &VariableSymbol, value: Value) {
		if variable.id >= self.slots.len() {
			self.slots.resize(variable.id + 1, None);
		}
		self.slots[variable.id] = Some(value);
	}
}
