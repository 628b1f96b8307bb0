use std::process::ExitCode;
use std::str::FromStr;

use abi::config::{Config, LogConfig};
use clap::{arg, command};
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_CONFIG: &str = "./abi/fixtures/config.yml";
const LOG_FILE_PREFIX: &str = "friend-server.log";

#[tokio::main]
async fn main() -> ExitCode {
    let matches = command!()
        .arg(arg!(-c --config <FILE> "path of the yaml config file").default_value(DEFAULT_CONFIG))
        .get_matches();
    let path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG);

    // tracing is configured by the file, so nothing is initialized yet
    let config = match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("load config {} failed: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    // keep the guard alive until main returns, otherwise buffered logs are lost
    let _guard = init_tracing(&config.log);

    info!("start friend request server, config: {}", path);
    match api::start(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(log: &LogConfig) -> Option<WorkerGuard> {
    // no subscriber yet, so a bad level can only go to stderr
    let level = Level::from_str(&log.level).unwrap_or_else(|_| {
        eprintln!("unknown log level {:?}, fall back to debug", log.level);
        Level::DEBUG
    });
    let builder = tracing_subscriber::fmt()
        .with_line_number(true)
        .with_max_level(level);

    if log.is_console() {
        builder.init();
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log.output, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    builder.with_writer(writer).with_ansi(false).init();
    Some(guard)
}
