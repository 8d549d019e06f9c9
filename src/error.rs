//! Crate-level error types.
//!
//! Only the ambient surfaces fail: options files and structure files. The
//! analysis core degrades to empty results instead of returning errors.

use std::fmt;

/// Errors produced by the proxima crate.
#[derive(Debug)]
pub enum ProximaError {
    /// Failed to load or parse a molecular structure file.
    StructureLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for ProximaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructureLoad(msg) => {
                write!(f, "structure load error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for ProximaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProximaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_prefixes_variant() {
        let err = ProximaError::OptionsParse("bad key".to_owned());
        assert_eq!(err.to_string(), "options parse error: bad key");
        let err = ProximaError::StructureLoad("no atoms".to_owned());
        assert_eq!(err.to_string(), "structure load error: no atoms");
    }

    #[test]
    fn io_error_exposes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ProximaError::from(io);
        assert!(err.source().is_some());
        assert!(ProximaError::OptionsParse(String::new()).source().is_none());
    }
}
