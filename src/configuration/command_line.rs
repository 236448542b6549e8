use crate::configuration::constants::cargo_env::CARGO_PKG_NAME;
use clap::arg_enum;
use log::LevelFilter;
use std::path::PathBuf;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum LogLevel {
        Off, Error, Warn, Info, Debug, Trace,
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = CARGO_PKG_NAME)]
pub struct Opt {
    /// Set a custom settings file. Supported: YAML, JSON, TOML
    #[structopt(parse(from_os_str))]
    pub file: Option<PathBuf>,

    /// Score a saved result JSON instead of running the execution engine
    #[structopt(long, short = "r", parse(from_os_str))]
    pub results: Option<PathBuf>,

    /// Operator profile to load, skips the interactive prompt
    #[structopt(long, short = "p", env = "COGU_PROFILE")]
    pub profile: Option<String>,

    /// Never prompt for a profile, the first configured one is used
    #[structopt(long)]
    pub no_interactive: bool,

    /// Disable ANSI colors in the report
    #[structopt(long)]
    pub no_color: bool,

    /// Sets a logging level
    #[structopt(case_insensitive = true, long, short = "L", possible_values = &LogLevel::variants(), env = "LOG_LEVEL")]
    pub logging: Option<LogLevel>,

    /// File to which application will write logs
    #[structopt(long, short = "O", env = "LOG_OUTPUT_FILE")]
    pub log_output_file: Option<PathBuf>,
}

impl Into<LevelFilter> for LogLevel {
    fn into(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_replay_options() {
        let opt = Opt::from_iter(&[
            "runner-cogu",
            "settings.toml",
            "--results",
            "run.json",
            "--profile",
            "Reishi",
            "--no-interactive",
            "-L",
            "debug",
        ]);

        assert_eq!(opt.file, Some(PathBuf::from("settings.toml")));
        assert_eq!(opt.results, Some(PathBuf::from("run.json")));
        assert_eq!(opt.profile.as_deref(), Some("Reishi"));
        assert!(opt.no_interactive);
        assert_eq!(opt.logging, Some(LogLevel::Debug));
    }

    #[test]
    fn test_log_level_is_copied_out_of_options() {
        let opt = Opt::from_iter(&["runner-cogu", "--no-interactive", "-L", "info"]);

        let level: LevelFilter = opt.logging.unwrap_or(LogLevel::Warn).into();
        let borrowed = &opt;

        assert_eq!(level, LevelFilter::Info);
        assert_eq!(borrowed.logging, Some(LogLevel::Info));
        assert!(borrowed.no_interactive);
    }

    #[test]
    fn test_log_level_into_level_filter() {
        let level: LevelFilter = LogLevel::Warn.into();
        assert_eq!(level, LevelFilter::Warn);
        let level: LevelFilter = LogLevel::Off.into();
        assert_eq!(level, LevelFilter::Off);
    }
}
