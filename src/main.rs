use clap::Parser;
use journalcheck::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
