use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Usage,
    Config,
    NotFound,
    RateLimit,
    Api,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Config = 3,
    NotFound = 4,
    RateLimit = 5,
    Api = 6,
    Io = 7,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, thiserror::Error, Serialize)]
#[error("{message}")]
pub struct FolioError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FolioError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimit, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.kind {
            ErrorKind::Usage => ExitCode::Usage,
            ErrorKind::Config => ExitCode::Config,
            ErrorKind::NotFound => ExitCode::NotFound,
            ErrorKind::RateLimit => ExitCode::RateLimit,
            ErrorKind::Api => ExitCode::Api,
            ErrorKind::Io => ExitCode::Io,
        }
    }
}

impl From<std::io::Error> for FolioError {
    fn from(value: std::io::Error) -> Self {
        Self::io(value.to_string())
    }
}

impl From<&str> for FolioError {
    fn from(value: &str) -> Self {
        Self::usage(value)
    }
}

impl From<String> for FolioError {
    fn from(value: String) -> Self {
        Self::usage(value)
    }
}

impl<T: Display> From<(ErrorKind, T)> for FolioError {
    fn from((kind, value): (ErrorKind, T)) -> Self {
        Self::new(kind, value.to_string())
    }
}

pub type FolioResult<T> = Result<T, FolioError>;
