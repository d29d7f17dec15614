//! Symbols produced by name resolution.

/// The types values can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
	Int,
	Bool,
}

impl std::fmt::Display for Type {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Int => write!(f, "int"),
			Type::Bool => write!(f, "bool"),
		}
	}
}

/// A resolved variable. The `id` doubles as the variable's storage slot in
/// the evaluator; ids are unique within one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSymbol {
	pub id:      usize,
	pub name:    String,
	pub mutable: bool,
	pub ty:      Type,
}

impl VariableSymbol {
	pub fn new(id: usize, name: impl Into<String>, mutable: bool, ty: Type) -> Self {
		Self { id, name: name.into(), mutable, ty }
	}

	/// A function parameter. Parameters are immutable.
	pub fn parameter(id: usize, name: impl Into<String>, ty: Type) -> Self { Self::new(id, name, false, ty) }
}

/// A resolved function. Declarations are checked but never executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSymbol {
	pub name:        String,
	pub parameters:  Vec<VariableSymbol>,
	pub return_type: Type,
}

/// A jump target generated by lowering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelSymbol {
	pub name: String,
}

impl LabelSymbol {
	pub fn new(name: impl Into<String>) -> Self { Self { name: name.into() } }
}

impl std::fmt::Display for LabelSymbol {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name) }
}
