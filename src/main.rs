use std::io::Write;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use covgate::cli::{self, Cli};
use covgate::EXIT_INVALID_INPUT;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            // Keep clap's status 2 free for a missing report.
            _ => {
                let _ = e.print();
                std::process::exit(EXIT_INVALID_INPUT);
            }
        },
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = cli.to_config();
    let output = cli::cmd_check(&config);

    let exit_code = match emit(&output) {
        Ok(()) => output.exit_code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_INVALID_INPUT
        }
    };

    std::process::exit(exit_code);
}

fn emit(output: &cli::CommandOutput) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.stdout.as_bytes())
        .context("Failed to write report to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    if !output.stderr.is_empty() {
        eprint!("{}", output.stderr);
    }
    Ok(())
}
