use std::io::{self, Write};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::CliError;

const BIN_NAME: &str = "hive";

/// Print completions, or write them to `output_path` and print the path.
pub fn run_completions(shell: Shell, output_path: Option<&Path>) -> Result<(), CliError> {
    let script = completion_script(shell);
    match output_path {
        Some(path) => {
            std::fs::write(path, &script)?;
            println!("{}", path.display());
        }
        None => io::stdout().write_all(&script)?,
    }
    Ok(())
}

pub fn completion_script(shell: Shell) -> Vec<u8> {
    let mut script = Vec::new();
    generate(shell, &mut Cli::command(), BIN_NAME, &mut script);
    script
}
