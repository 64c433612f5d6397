use anyhow::Result;
use clap::Parser;
use grocer::cli::Cli;
use grocer::logging::setup_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);
    cli.run()
}
