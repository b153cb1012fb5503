use std::process::ExitCode;

use clap::Parser;

use jalaali_tools::{cli::Cli, commands, config::ToolConfig, logging};

fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match ToolConfig::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = logging::init_tracing(&config) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match commands::run(&args.command).and_then(|output| output.render(&config)) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            eprintln!("{}", err.user_message(&config));
            ExitCode::FAILURE
        }
    }
}
