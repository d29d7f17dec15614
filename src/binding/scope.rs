//! Lexical scopes and the snapshots that chain interactive turns together.

use std::{collections::HashMap, rc::Rc};

use crate::binding::symbol::{FunctionSymbol, VariableSymbol};

/// One lexical scope. Scopes form a parent chain that the binder pushes and
/// pops as it enters and leaves blocks.
#[derive(Debug, Default)]
pub struct Scope {
	variables: HashMap<String, Rc<VariableSymbol>>,
	functions: HashMap<String, Rc<FunctionSymbol>>,
	parent:    Option<Box<Scope>>,
}

impl Scope {
	pub fn new() -> Self { Self::default() }

	/// A fresh scope whose lookups fall through to `parent`.
	pub fn child(parent: Scope) -> Self {
		Self { variables: HashMap::new(), functions: HashMap::new(), parent: Some(Box::new(parent)) }
	}

	/// Declare a variable in this scope. Fails if the name is already taken
	/// *in this scope*; shadowing an outer scope is allowed.
	pub fn try_declare(&mut self, variable: Rc<VariableSymbol>) -> bool {
		if self.variables.contains_key(&variable.name) {
			return false;
		}
		self.variables.insert(variable.name.clone(), variable);
		true
	}

	/// Resolve a name, walking outward through parent scopes.
	pub fn lookup(&self, name: &str) -> Option<Rc<VariableSymbol>> {
		match self.variables.get(name) {
			Some(variable) => Some(Rc::clone(variable)),
			None => self.parent.as_ref()?.lookup(name),
		}
	}

	pub fn try_declare_function(&mut self, function: Rc<FunctionSymbol>) -> bool {
		if self.functions.contains_key(&function.name) {
			return false;
		}
		self.functions.insert(function.name.clone(), function);
		true
	}

	pub fn lookup_function(&self, name: &str) -> Option<Rc<FunctionSymbol>> {
		match self.functions.get(name) {
			Some(function) => Some(Rc::clone(function)),
			None => self.parent.as_ref()?.lookup_function(name),
		}
	}

	/// The variables declared directly in this scope, ignoring parents.
	pub fn declared_variables(&self) -> Vec<Rc<VariableSymbol>> { self.variables.values().map(Rc::clone).collect() }

	/// Detach and return the parent scope, leaving `self` rootless.
	pub fn take_parent(&mut self) -> Scope { *self.parent.take().unwrap_or_default() }
}

/// The variables a finished interactive turn leaves behind. Snapshots form a
/// chain, newest first; replaying the chain oldest-first rebuilds the scope
/// state for the next turn.
#[derive(Debug)]
pub struct ScopeSnapshot {
	pub variables: Vec<Rc<VariableSymbol>>,
	pub previous:  Option<Rc<ScopeSnapshot>>,
}

impl ScopeSnapshot {
	/// Total number of variables across the whole chain. The next turn's
	/// symbol ids start here so storage slots never collide.
	pub fn variable_count(&self) -> usize {
		let mut count = 0;
		let mut snapshot = Some(self);
		while let Some(current) = snapshot {
			count += current.variables.len();
			snapshot = current.previous.as_deref();
		}
		count
	}
}
