//! darlens CLI entrypoint.
//!
//! Parses arguments, configures logging from `-v`/`-q` and `RUST_LOG`, then
//! dispatches to the selected subcommand.

use clap::Parser;
use darlens_cli::cli::Cli;
use darlens_cli::commands::run;
use darlens_cli::error::Result;
use darlens_cli::output::write_stderr_line;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_filter())
        .parse_default_env()
        .init();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
