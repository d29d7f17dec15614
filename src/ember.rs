//! The driver: owns session state and runs source through the pipeline.

use std::{
	io::{stdin, stdout, Write},
	path::Path,
	rc::Rc,
};

use anyhow::Context;

use crate::{
	binding::{scope::ScopeSnapshot, Binder},
	error::EmberError,
	evaluator::{store::VariableStore, value::Value, Evaluator},
	lowering::Lowerer,
	source::SourceText,
	syntax::SyntaxTree,
};

/// An interpreter session. Variables and scope state persist across calls to
/// [`Ember::run`], which is what makes the prompt interactive.
#[derive(Default)]
pub struct Ember {
	variables: VariableStore,
	previous:  Option<Rc<ScopeSnapshot>>,
}

impl Ember {
	pub fn new() -> Self { Self::default() }

	/// Run a script file as a single unit and print its value.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EmberError> {
		let source = std::fs::read_to_string(&path)
			.with_context(|| format!("Failed to open source file {}", path.as_ref().display()))?;
		let value = self.run(&source)?;
		println!("{value}");
		Ok(())
	}

	/// Read, evaluate and print units until end of input. A failed unit
	/// reports and the session keeps going.
	pub fn run_prompt(&mut self) -> Result<(), EmberError> {
		let mut input = String::new();
		loop {
			print!("> ");
			stdout().flush().context("Failed to flush stdout")?;
			input.clear();
			match stdin().read_line(&mut input) {
				Ok(0) => {
					println!("\nExiting session.");
					return Ok(());
				}
				Ok(_) => {
					let line = input.trim();
					if line.is_empty() {
						continue;
					}
					match self.run(line) {
						Ok(value) => println!("{value}"),
						Err(EmberError::Diagnostics(_)) => {}
						Err(error) => eprintln!("{error}"),
					}
				}
				Err(error) => return Err(anyhow::Error::from(error).context("Failed to read line").into()),
			}
		}
	}

	/// Run one unit: parse, bind, lower, evaluate. Diagnostics suppress
	/// evaluation and leave the session state untouched.
	pub fn run(&mut self, source: &str) -> Result<Value, EmberError> {
		let source = SourceText::new(source);
		let tree = SyntaxTree::parse(&source);
		let (root, snapshot, bind_diagnostics) = Binder::bind_unit(self.previous.clone(), &tree);

		let mut diagnostics = tree.diagnostics;
		diagnostics.extend(bind_diagnostics);
		if !diagnostics.is_empty() {
			for diagnostic in diagnostics.iter() {
				eprintln!("{}", diagnostic.render(&source));
			}
			return Err(EmberError::Diagnostics(diagnostics.len()));
		}

		// Only diagnostic-free units contribute their declarations to later
		// units.
		self.previous = Some(snapshot);
		let lowered = Lowerer::lower(&root);
		Ok(Evaluator::evaluate(&lowered, &mut self.variables)?)
	}
}
