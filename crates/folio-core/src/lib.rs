mod error;

pub use error::{ErrorKind, ExitCode, FolioError, FolioResult};
