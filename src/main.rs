use std::process::ExitCode;

use clap::Parser;
use ember::{
	cli::{Cli, Mode},
	Ember,
};

fn main() -> ExitCode {
	let mut ember = Ember::new();
	let result = match Cli::parse().mode {
		Mode::File { path } => ember.run_file(path),
		Mode::Repl => ember.run_prompt(),
	};
	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(error) => {
			eprintln!("{error}");
			ExitCode::FAILURE
		}
	}
}
