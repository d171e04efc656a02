use std::env;
use std::io::stdout;
use std::process::ExitCode;
use turtle_engine::error::UsageError;
use turtle_engine::runner::{self, RunnerConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match RunnerConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(UsageError::MissingArguments) => {
            println!("{}", UsageError::MissingArguments);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    match runner::run(&config, stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
