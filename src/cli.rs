//! Command line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ember", version, about = "A small imperative scripting language.")]
pub struct Cli {
	#[command(subcommand)]
	pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
	/// Run a script file.
	File { path: PathBuf },
	/// Start an interactive session.
	Repl,
}
