//! Errors raised while loading a DrugBank document or building tables from it

/// Extraction failure. Never recovered internally: a single error aborts the
/// whole extraction run.
#[derive(Debug)]
pub enum ExtractError {
    /// A structurally required element is absent
    MissingField { path: String },
    /// Text that must be numeric is not
    MalformedNumber { path: String, value: String },
    /// Two rows of a keyed table share a key
    DuplicateKey { table: &'static str, key: String },
    /// A column does not line up with the table it is attached to
    LengthMismatch {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    /// Document contains no root element
    EmptyDocument,
    Xml(quick_xml::Error),
    Io(std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { path } => write!(f, "missing field: {path}"),
            Self::MalformedNumber { path, value } => {
                write!(f, "malformed number at {path}: {value:?}")
            }
            Self::DuplicateKey { table, key } => write!(f, "duplicate key in {table}: {key}"),
            Self::LengthMismatch {
                table,
                expected,
                found,
            } => write!(
                f,
                "length mismatch in {table}: expected {expected} values, found {found}"
            ),
            Self::EmptyDocument => write!(f, "document has no root element"),
            Self::Xml(e) => write!(f, "XML: {e}"),
            Self::Io(e) => write!(f, "IO: {e}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Xml(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e)
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_field() {
        let err = ExtractError::missing("drug/products");
        assert_eq!(err.to_string(), "missing field: drug/products");
    }

    #[test]
    fn display_malformed_number() {
        let err = ExtractError::MalformedNumber {
            path: "price/cost".to_string(),
            value: "n/a".to_string(),
        };
        assert!(err.to_string().contains("\"n/a\""));
    }

    #[test]
    fn io_error_has_source() {
        let err = ExtractError::from(std::io::Error::other("boom"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("IO:"));
    }
}
