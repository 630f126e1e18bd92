//! Crate-level error types.
//!
//! Interactive paths (input handling, per-frame updates) never fail; they
//! degrade to no-ops. Only option files and DOM binding setup report errors.

use std::fmt;

/// Errors produced by the splatview crate.
#[derive(Debug)]
pub enum SplatViewError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Browser DOM lookup or binding failure.
    Web(String),
}

impl fmt::Display for SplatViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Web(msg) => write!(f, "web binding error: {msg}"),
        }
    }
}

impl std::error::Error for SplatViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SplatViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_includes_message() {
        let err = SplatViewError::OptionsParse("bad key".into());
        assert_eq!(err.to_string(), "options parse error: bad key");
        let err = SplatViewError::Web("no canvas".into());
        assert_eq!(err.to_string(), "web binding error: no canvas");
    }

    #[test]
    fn io_errors_expose_their_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SplatViewError::from(io);
        assert!(err.source().is_some());
        assert!(SplatViewError::Web(String::new()).source().is_none());
    }
}
