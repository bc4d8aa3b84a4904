use clap::Parser;
use pairsift::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
