use std::fmt;
use std::path;

use crate::Kind;

/// Failure to produce a [`SiteConfig`][crate::SiteConfig] from a file.
///
/// The variants separate "the file could not be read", "the file is not valid
/// YAML" and "the YAML does not describe a site".
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to read `{}`", .path.display())]
    Io {
        path: path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config `{}`", .path.display())]
    Parse {
        path: path::PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid config `{}`", .path.display())]
    Schema {
        path: path::PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl Error {
    pub fn path(&self) -> &path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Schema { path, .. } => path,
        }
    }

    pub fn schema(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Line and column of a parse failure, when the parser reported one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Self::Parse { source, .. } => source.location().map(|l| (l.line(), l.column())),
            _ => None,
        }
    }
}

/// A syntactically valid document that breaks the site configuration contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("the document root must be a mapping, found {found}")]
    RootNotAMapping { found: Kind },
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: &'static str },
    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },
    #[error("`{field}` must be {expected}, found {found}")]
    WrongType {
        field: String,
        expected: Expected,
        found: Kind,
    },
    #[error("`{field}` contains the key `{key}` more than once")]
    DuplicateKey { field: String, key: String },
}

impl SchemaError {
    pub(crate) fn wrong_type(field: impl Into<String>, expected: Expected, found: Kind) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
            found,
        }
    }

    /// The field the error points at, `None` for a bad document root.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::RootNotAMapping { .. } => None,
            Self::MissingRequiredField { field } | Self::EmptyField { field } => Some(*field),
            Self::WrongType { field, .. } | Self::DuplicateKey { field, .. } => Some(field.as_str()),
        }
    }
}

/// The shape a field was required to have.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Expected {
    String,
    Bool,
    Integer,
    Float,
    Sequence,
    Mapping,
    /// A mapping whose values are all strings.
    StringMap,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "a string",
            Self::Bool => "a boolean",
            Self::Integer => "an integer",
            Self::Float => "a number",
            Self::Sequence => "a sequence",
            Self::Mapping => "a mapping",
            Self::StringMap => "a mapping of strings",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wrong_type_names_field_and_kinds() {
        let err = SchemaError::wrong_type("redirects", Expected::StringMap, Kind::Sequence);
        assert_eq!(
            err.to_string(),
            "`redirects` must be a mapping of strings, found a sequence"
        );
        assert_eq!(err.field(), Some("redirects"));
    }

    #[test]
    fn missing_field_message() {
        let err = SchemaError::MissingRequiredField { field: "rootUrl" };
        assert_eq!(err.to_string(), "missing required field `rootUrl`");
        assert_eq!(err.field(), Some("rootUrl"));
    }

    #[test]
    fn empty_field_message() {
        let err = SchemaError::EmptyField { field: "title" };
        assert_eq!(err.to_string(), "`title` must not be empty");
        assert_eq!(err.field(), Some("title"));
    }

    #[test]
    fn schema_error_is_the_source() {
        let err = Error::Schema {
            path: "site/config.yaml".into(),
            source: SchemaError::RootNotAMapping {
                found: Kind::Sequence,
            },
        };
        assert_eq!(err.to_string(), "invalid config `site/config.yaml`");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("the document root must be a mapping, found a sequence")
        );
        assert_eq!(err.path(), path::Path::new("site/config.yaml"));
        assert!(err.schema().is_some());
        assert_eq!(err.location(), None);
    }
}
