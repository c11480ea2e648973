//! Gadfly CLI - rate claims, review evidence and audit facts from the shell.

use clap::Parser;
use gadfly_cli::{commands, logging, Cli, CliError, Config, Context, Formatter};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            if let CliError::AuditFailed { report, .. } = &e {
                println!("{}", report);
            }
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> gadfly_cli::Result<String> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let context = Context::new(config);
    commands::run(cli.command, &context, &formatter)
}
