use std::fmt;
use std::io;

use nalframe_core::{Error, RegionError, WriteError};

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        io::ErrorKind::BrokenPipe => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn region_error(context: &str, err: RegionError) -> CliError {
    match err {
        RegionError::StartAfterEnd { .. } | RegionError::EndPastBuffer { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        RegionError::UnitTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
    }
}

pub fn write_error(context: &str, err: WriteError) -> CliError {
    match err {
        WriteError::Io(source) => io_error(context, source),
        WriteError::PayloadTooLarge { .. } => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        WriteError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
    }
}

pub fn core_error(context: &str, err: Error) -> CliError {
    match err {
        Error::Region(err) => region_error(context, err),
        Error::Write(err) => write_error(context, err),
        Error::Parse(err) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        Error::ConfigRecord(err) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}
