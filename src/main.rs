use std::io;
use std::process::ExitCode;

use env_logger::Env;
use log::{debug, error};

use bidtree::cli::Session;
use bidtree::common::config::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use bidtree::{Config, OrderedIndex};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV_VAR, DEFAULT_LOG_FILTER)).init();

    let config = Config::from_env();
    debug!("starting with {:?}", config);

    let mut index = OrderedIndex::with_capacity(config.initial_capacity);
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock()).with_stats(config.print_stats);

    match session.run(&mut index) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("session aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}
