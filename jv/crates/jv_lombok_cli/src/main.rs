// jvlombok entry point
use anyhow::Result;
use clap::Parser;
use jv_lombok_cli::{Cli, run};
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(&cli)?;
    if !outcome.output.is_empty() {
        println!("{}", outcome.output.trim_end());
    }
    if outcome.has_errors {
        std::process::exit(1);
    }
    Ok(())
}
