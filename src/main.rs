use clap::Parser;
use infra_policy::{
    cli::{Cli, Commands},
    handlers::{self, CheckOptions},
};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };
    process::exit(code);
}

fn run(cli: Cli) -> infra_policy::Result<i32> {
    match cli.command {
        Commands::Check {
            paths,
            format,
            output,
            exclude,
            no_fail,
            threads,
        } => {
            let options = CheckOptions {
                paths,
                format: format.into(),
                output,
                exclude,
                no_fail,
                threads,
            };
            handlers::handle_check(options, cli.config.as_deref()).map(|outcome| outcome.exit_code())
        }
        Commands::Rules { format } => handlers::handle_rules(format.into()).map(|_| 0),
    }
}
