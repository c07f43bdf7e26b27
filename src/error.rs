//! When text does not hold the value asked for.

use core::fmt::{self, Debug, Display};
use core::result;
#[cfg(feature = "std")]
use std::{error, io};

/// This type represents all possible errors that can occur when reading a
/// value out of text with [`from_str`](crate::from_str) or
/// [`from_str_prefix`](crate::from_str_prefix).
pub struct Error {
    /// This `Box` keeps `Result<T>` as small as `T` plus a pointer.
    err: Box<ErrorImpl>,
}

/// Alias for a `Result` with the error type `numcvt::Error`.
pub type Result<T> = result::Result<T, Error>;

impl Error {
    /// One-based column at which the error was detected, counted in
    /// characters from the start of the input.
    pub fn column(&self) -> usize {
        self.err.column
    }

    /// Specifies the cause of this error.
    pub fn code(&self) -> &ErrorCode {
        &self.err.code
    }

    /// Categorizes the cause of this error.
    ///
    /// - `Category::Syntax` - text that does not start with a value of the
    ///   requested type
    /// - `Category::Data` - a well-formed number that the requested type
    ///   cannot hold
    /// - `Category::Eof` - empty or all-whitespace input
    pub fn classify(&self) -> Category {
        match self.err.code {
            ErrorCode::NumberOutOfRange => Category::Data,
            ErrorCode::EofWhileParsingValue => Category::Eof,
            ErrorCode::InvalidNumber | ErrorCode::TrailingCharacters => Category::Syntax,
        }
    }

    /// Returns true if this error was caused by text that does not start
    /// with a value of the requested type.
    pub fn is_syntax(&self) -> bool {
        self.classify() == Category::Syntax
    }

    /// Returns true if this error was caused by a number that does not fit.
    ///
    /// For example, `"300"` is a well-formed integer but not a `u8`.
    pub fn is_data(&self) -> bool {
        self.classify() == Category::Data
    }

    /// Returns true if the input ran out before any value started.
    pub fn is_eof(&self) -> bool {
        self.classify() == Category::Eof
    }
}

/// Categorizes the cause of a `numcvt::Error`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Category {
    /// The text does not start with a value of the requested type, or has
    /// something other than whitespace after it.
    Syntax,

    /// The text holds a number the requested type cannot represent.
    Data,

    /// The text is empty or whitespace.
    Eof,
}

#[cfg(feature = "std")]
impl From<Error> for io::Error {
    /// Convert a `numcvt::Error` into an `io::Error`.
    ///
    /// Syntax and data errors are turned into `InvalidData` IO errors.
    /// EOF errors are turned into `UnexpectedEof` IO errors.
    fn from(err: Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Data => io::Error::new(io::ErrorKind::InvalidData, err),
            Category::Eof => io::Error::new(io::ErrorKind::UnexpectedEof, err),
        }
    }
}

struct ErrorImpl {
    code: ErrorCode,
    column: usize,
}

/// This type describes all possible errors that can occur when reading a
/// value out of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The input is empty or only whitespace.
    EofWhileParsingValue,

    /// The input does not start with a value of the requested type.
    InvalidNumber,

    /// The digits form an integer outside the range of the requested type.
    NumberOutOfRange,

    /// A value was read but non-whitespace text follows it.
    TrailingCharacters,
}

impl Error {
    #[cold]
    pub(crate) fn new(code: ErrorCode, column: usize) -> Self {
        Error {
            err: Box::new(ErrorImpl { code, column }),
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorCode::EofWhileParsingValue => f.write_str("EOF while parsing a value"),
            ErrorCode::InvalidNumber => f.write_str("invalid number"),
            ErrorCode::NumberOutOfRange => f.write_str("number out of range"),
            ErrorCode::TrailingCharacters => f.write_str("trailing characters"),
        }
    }
}

#[cfg(feature = "std")]
impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&*self.err, f)
    }
}

impl Display for ErrorImpl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at column {}", self.code, self.column)
    }
}

// Remove a layer of verbosity from the debug representation. Humans often
// end up seeing this representation because it is what unwrap() shows.
impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Error({:?}, column: {})",
            self.err.code.to_string(),
            self.err.column
        )
    }
}
