use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The error type returned by every fallible operation of this library.
///
/// From a caller's perspective there is exactly one failure mode: the module could not be
/// loaded. [`Error::ModuleLoad`] is what [`crate::browse`] reports, carrying the path and the
/// precise cause. The remaining variants describe those causes and are produced by the loading
/// layers directly (e.g. [`crate::CilModule::from_mem`]).
///
/// Rendering signatures and building the declaration tree never fail.
///
/// # Examples
///
/// ```rust,no_run
/// use dotbrowse::Error;
/// use std::path::Path;
///
/// match dotbrowse::browse(Path::new("Library.dll")) {
///     Ok(root) => println!("{root}"),
///     Err(Error::ModuleLoad { path, source }) => {
///         eprintln!("could not load {}: {}", path.display(), source);
///     }
///     Err(e) => eprintln!("unexpected: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The module at `path` could not be opened or its metadata could not be read.
    ///
    /// This is the only error surfaced by the high-level entry points; `source` holds the
    /// underlying cause.
    #[error("Failed to load module '{}' - {source}", path.display())]
    ModuleLoad {
        /// The path that was requested
        path: PathBuf,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// The file is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    ///
    /// Returned for PE images without a CLR runtime header, i.e. native binaries.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// A metadata token references a row that does not exist.
    #[error("Token does not resolve to a metadata row - {0}")]
    TypeNotFound(Token),

    /// Recursion limit reached while decoding a nested signature.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),
}

impl Error {
    /// Wraps `self` as the load failure of the module at `path`.
    pub(crate) fn into_load_failure(self, path: impl Into<PathBuf>) -> Error {
        match self {
            Error::ModuleLoad { .. } => self,
            other => Error::ModuleLoad {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_carries_location() {
        let err = malformed_error!("bad stream - {}", "#~");
        match err {
            Error::Malformed {
                message,
                file,
                line,
            } => {
                assert_eq!(message, "bad stream - #~");
                assert!(file.ends_with("error.rs"));
                assert!(line > 0);
            }
            _ => panic!("Expected Malformed"),
        }
    }

    #[test]
    fn load_failure_wraps_once() {
        let err = Error::Empty.into_load_failure("a.dll");
        let err = err.into_load_failure("b.dll");

        match &err {
            Error::ModuleLoad { path, source } => {
                assert_eq!(path, &PathBuf::from("a.dll"));
                assert!(matches!(**source, Error::Empty));
            }
            _ => panic!("Expected ModuleLoad"),
        }
        assert_eq!(
            err.to_string(),
            "Failed to load module 'a.dll' - Provided input was empty"
        );
    }
}
