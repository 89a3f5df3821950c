use clap::Parser;
use statchart::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
