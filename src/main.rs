use clap::Parser;
use themarank::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
