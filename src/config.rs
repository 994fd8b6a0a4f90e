use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_DATA_FILE: &str = ".data/roster.json";
pub const DEFAULT_LOG_FILTER: &str = "roster=info";

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Track tutorial groups, homework, attendance and consultations")]
pub struct Cli {
    /// Roster data file
    #[arg(short, long, env = "ROSTER_FILE", default_value = DEFAULT_DATA_FILE)]
    pub file: PathBuf,

    /// Log filter, e.g. `roster=debug` (RUST_LOG takes precedence)
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    pub log: String,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            data_file: cli.file,
            log_filter: cli.log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["roster"]).unwrap();
        let config = Config::from(cli);
        if std::env::var_os("ROSTER_FILE").is_none() {
            assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        }
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn cli_accepts_file_and_log() {
        let cli = Cli::try_parse_from(["roster", "-f", "class.json", "--log", "roster=debug"]).unwrap();
        let config = Config::from(cli);
        assert_eq!(config.data_file, PathBuf::from("class.json"));
        assert_eq!(config.log_filter, "roster=debug");
    }
}
