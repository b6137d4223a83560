use std::error;
use std::fmt;

/// Errors that can occur while the records of a report are extracted and reshaped.
/// All of them are raised at the point of detection, nothing is retried since the
/// report is a static artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserError {
    /// A required key phrase does not occur in the token stream.
    MissingRecord { key: String },
    /// The key phrase was found but its value could not be read as the declared type,
    /// or the value does not have the expected shape.
    MalformedRecord { key: String, message: String },
    /// The length of a packed vector is not a triangular number.
    InvalidMatrixSize { length: usize },
    /// The shell type code is not part of the fixed vocabulary.
    UnsupportedShellType { code: i64 },
    /// The report was written by a program version the parser does not support.
    IncompatibleVersion { parser: String, version: String },
}

impl ParserError {
    pub fn missing(key: &str) -> Self {
        ParserError::MissingRecord {
            key: key.to_owned(),
        }
    }

    pub fn malformed<S: Into<String>>(key: &str, message: S) -> Self {
        ParserError::MalformedRecord {
            key: key.to_owned(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::MissingRecord { key } => {
                write!(f, "The record \"{}\" was not found in the output", key)
            }
            ParserError::MalformedRecord { key, message } => {
                write!(f, "The record \"{}\" is malformed: {}", key, message)
            }
            ParserError::InvalidMatrixSize { length } => write!(
                f,
                "A vector of length {} can not be unpacked into a symmetric matrix",
                length
            ),
            ParserError::UnsupportedShellType { code } => {
                write!(f, "Shell type: {} is not implemented", code)
            }
            ParserError::IncompatibleVersion { parser, version } => write!(
                f,
                "Error found while parsing output using \"{}\" parser: version {} is not supported",
                parser, version
            ),
        }
    }
}

impl error::Error for ParserError {}
