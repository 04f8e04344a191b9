mod cli;
mod config;
mod dry;
mod report_helpers;

use std::path::Path;

use clap::Parser;

use cli::{Cli, Commands, CommonArgs};
use dry::Tool;

fn main() {
    let cli = Cli::parse();

    let (tool, common) = match cli.command {
        Commands::Cpd { common } => (Tool::Cpd, common),
        Commands::Dupfinder { common } => (Tool::DupFinder, common),
        Commands::Simian { common } => (Tool::Simian, common),
    };

    if let Err(err) = run(tool, &common) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(tool: Tool, common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let thresholds = config::resolve(Path::new("."), common.high, common.normal)?;
    dry::run(
        &common.file,
        tool,
        thresholds,
        common.report,
        common.show_all,
        common.json,
    )
}
