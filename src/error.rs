use std::fmt;

/// A rejected subscript binding.
///
/// Every variant is terminal: binding either produces a complete call
/// description or fails with exactly one of these, raised synchronously by
/// the first component that observes the violation. Nothing is retried and
/// no partial call is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BindError {
    /// The subscript contained no positional and no named entries at all.
    ///
    /// The surface grammar already forbids empty brackets, but the engine
    /// rejects the case itself rather than trusting the caller.
    EmptySubscript,
    /// A mapping-unpacking entry produced a key that is not a string.
    InvalidUnpackKey,
    /// Two named entries share a name, in any combination of literal and
    /// unpacked origin.
    DuplicateKeyword(String),
    /// A named entry collides with a parameter that was already bound
    /// positionally (the index slot, or the value slot of a set operation).
    DuplicateArgument(String),
    /// A named-only parameter has no default and no supplied entry.
    MissingRequiredKeyword(String),
    /// A named entry matches no parameter and the signature declares no
    /// catch-all.
    UnexpectedKeyword(String),
}

/// Field-less mirror of [`BindError`] for matching on the failure class
/// without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::IntoStaticStr, serde::Serialize, serde::Deserialize)]
pub enum BindErrorKind {
    EmptySubscript,
    InvalidUnpackKey,
    DuplicateKeyword,
    DuplicateArgument,
    MissingRequiredKeyword,
    UnexpectedKeyword,
}

impl BindError {
    /// Returns the failure class of this error.
    #[must_use]
    pub fn kind(&self) -> BindErrorKind {
        match self {
            Self::EmptySubscript => BindErrorKind::EmptySubscript,
            Self::InvalidUnpackKey => BindErrorKind::InvalidUnpackKey,
            Self::DuplicateKeyword(_) => BindErrorKind::DuplicateKeyword,
            Self::DuplicateArgument(_) => BindErrorKind::DuplicateArgument,
            Self::MissingRequiredKeyword(_) => BindErrorKind::MissingRequiredKeyword,
            Self::UnexpectedKeyword(_) => BindErrorKind::UnexpectedKeyword,
        }
    }

    /// Returns the offending name, for the variants that carry one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::EmptySubscript | Self::InvalidUnpackKey => None,
            Self::DuplicateKeyword(name)
            | Self::DuplicateArgument(name)
            | Self::MissingRequiredKeyword(name)
            | Self::UnexpectedKeyword(name) => Some(name),
        }
    }

    /// Returns a compact summary of the error.
    ///
    /// Format: `Kind: message` (e.g., `UnexpectedKeyword: got an unexpected
    /// keyword argument 'spam'`).
    #[must_use]
    pub fn summary(&self) -> String {
        let kind: &'static str = self.kind().into();
        format!("{kind}: {self}")
    }
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySubscript => f.write_str("empty subscript is not allowed"),
            Self::InvalidUnpackKey => f.write_str("keywords must be strings"),
            Self::DuplicateKeyword(name) => {
                write!(f, "got multiple values for keyword argument '{name}'")
            }
            Self::DuplicateArgument(name) => {
                write!(f, "got multiple values for argument '{name}'")
            }
            Self::MissingRequiredKeyword(name) => {
                write!(f, "missing required keyword argument: '{name}'")
            }
            Self::UnexpectedKeyword(name) => {
                write!(f, "got an unexpected keyword argument '{name}'")
            }
        }
    }
}

impl std::error::Error for BindError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_invalid_unpack_key() {
        assert_eq!(BindError::InvalidUnpackKey.to_string(), "keywords must be strings");
    }

    #[test]
    fn message_duplicate_argument() {
        let err = BindError::DuplicateArgument("index".to_owned());
        assert_eq!(err.to_string(), "got multiple values for argument 'index'");
        assert_eq!(err.name(), Some("index"));
    }

    #[test]
    fn message_unexpected_keyword() {
        let err = BindError::UnexpectedKeyword("bacon".to_owned());
        assert_eq!(err.to_string(), "got an unexpected keyword argument 'bacon'");
    }

    #[test]
    fn summary_includes_kind_name() {
        let err = BindError::MissingRequiredKeyword("spam".to_owned());
        assert_eq!(err.kind(), BindErrorKind::MissingRequiredKeyword);
        assert_eq!(
            err.summary(),
            "MissingRequiredKeyword: missing required keyword argument: 'spam'"
        );
    }

    #[test]
    fn kindless_variants_have_no_name() {
        assert_eq!(BindError::EmptySubscript.name(), None);
        assert_eq!(BindError::InvalidUnpackKey.name(), None);
    }
}
