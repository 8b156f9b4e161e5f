//! Logger setup from command line options.

use folio_logging::{initialize, parse_level, LogDestination};
use log::LevelFilter;

use crate::cli::Cli;

pub fn init(cli: &Cli) {
    let level = parse_level(&cli.log_level).unwrap_or_else(|| {
        eprintln!(
            "Warning: unknown log level {:?}, using info",
            cli.log_level
        );
        LevelFilter::Info
    });
    initialize(destination(cli), level);
}

fn destination(cli: &Cli) -> LogDestination {
    match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    }
}
