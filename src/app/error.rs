use std::fmt;
use std::io;

/// Failures that end a run before a report can be produced.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// The execution engine reported that it could not start at all.
    ExecutionFailedToStart(String),
    Engine(String),
    Decode(String),
    Io(io::Error),
    Configuration(String),
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::ExecutionFailedToStart(ref err) => {
                write!(f, "Execution engine failed to start: {}", err)
            }
            Error::Engine(ref err) => write!(f, "Execution engine error: {}", err),
            Error::Decode(ref err) => write!(f, "Cannot decode run result: {}", err),
            Error::Io(ref err) => err.fmt(f),
            Error::Configuration(ref err) => write!(f, "Configuration error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
