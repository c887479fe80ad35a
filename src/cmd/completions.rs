use std::io::Write;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;

fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
}

pub fn cmd_completions(shell: Shell) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_completions(shell, &mut lock);
    lock.flush()?;
    Ok(())
}
