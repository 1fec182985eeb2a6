use std::env;
use std::process::ExitCode;

use env_logger::Env;
use log::debug;

use mbseq::args::{self, Command, USAGE};
use mbseq::config::Config;
use mbseq::general::check;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            check::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> mbseq::Result<()> {
    let config_path = Config::location();
    let config = Config::load(&config_path)?;
    check::set_color_choice(config.console.color.choice());

    let params = match args::parse(env::args().skip(1), config.equalize.reference_note)? {
        Command::Run(params) => params,
        Command::Help => {
            check::print_usage(USAGE);
            return Ok(());
        }
    };

    let level = if params.debug || config.console.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
    debug!("config from {}: {:?}", config_path.display(), config);
    debug!("params: {:?}", params);

    let outcome = mbseq::run(&params)?;
    check::print_outcome(params.mode, &outcome);
    Ok(())
}
