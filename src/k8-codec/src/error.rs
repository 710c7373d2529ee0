use std::fmt;

use thiserror::Error;

/// dotted location of a field inside a configuration tree,
/// for example `container.0.port.1.containerPort`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(&index.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<value>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self(path.split('.').map(|s| s.to_owned()).collect())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("{field}: invalid value {value:?}, expected {expected}")]
    InvalidFormat {
        field: FieldPath,
        value: String,
        expected: &'static str,
    },
    #[error("{field}: required field is missing")]
    MissingField { field: FieldPath },
    #[error("{field}: one of {} must be set", .variants.join(", "))]
    UnknownVariant {
        field: FieldPath,
        variants: Vec<&'static str>,
    },
    #[error("{field}: only one of {} may be set", .found.join(", "))]
    AmbiguousVariant {
        field: FieldPath,
        found: Vec<&'static str>,
    },
    #[error("{field}: {value:?} is not one of {}", .allowed.join(", "))]
    InvalidEnum {
        field: FieldPath,
        value: String,
        allowed: Vec<&'static str>,
    },
    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange {
        field: FieldPath,
        value: String,
        min: i64,
        max: i64,
    },
}

impl CodecError {
    pub fn invalid_format<S: Into<String>>(value: S, expected: &'static str) -> Self {
        Self::InvalidFormat {
            field: FieldPath::root(),
            value: value.into(),
            expected,
        }
    }

    pub fn missing(field: FieldPath) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid_enum<S: Into<String>>(value: S, allowed: Vec<&'static str>) -> Self {
        Self::InvalidEnum {
            field: FieldPath::root(),
            value: value.into(),
            allowed,
        }
    }

    pub fn out_of_range<S: Into<String>>(value: S, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            field: FieldPath::root(),
            value: value.into(),
            min,
            max,
        }
    }

    pub fn field(&self) -> &FieldPath {
        match self {
            Self::InvalidFormat { field, .. }
            | Self::MissingField { field }
            | Self::UnknownVariant { field, .. }
            | Self::AmbiguousVariant { field, .. }
            | Self::InvalidEnum { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }

    /// attach the location, keeping one that is already set
    pub fn at(mut self, path: FieldPath) -> Self {
        let field = match &mut self {
            Self::InvalidFormat { field, .. }
            | Self::MissingField { field }
            | Self::UnknownVariant { field, .. }
            | Self::AmbiguousVariant { field, .. }
            | Self::InvalidEnum { field, .. }
            | Self::OutOfRange { field, .. } => field,
        };
        if field.is_root() {
            *field = path;
        }
        self
    }
}

#[cfg(test)]
mod test {

    use super::CodecError;
    use super::FieldPath;

    #[test]
    fn test_path_display() {
        let path = FieldPath::root().child("container").index(0).child("image");
        assert_eq!(path.to_string(), "container.0.image");
        assert_eq!(path, FieldPath::from("container.0.image"));
        assert_eq!(FieldPath::root().to_string(), "<value>");
    }

    #[test]
    fn test_at_keeps_inner_location() {
        let err = CodecError::missing(FieldPath::from("httpGet.path"))
            .at(FieldPath::from("livenessProbe.0"));
        assert_eq!(err.field(), &FieldPath::from("httpGet.path"));

        let err = CodecError::out_of_range("0", 1, 65535).at(FieldPath::from("port.0.port"));
        assert_eq!(err.to_string(), "port.0.port: 0 is outside 1..=65535");
    }

    #[test]
    fn test_variant_message() {
        let err = CodecError::AmbiguousVariant {
            field: FieldPath::from("volume.0"),
            found: vec!["emptyDir", "hostPath"],
        };
        assert_eq!(
            err.to_string(),
            "volume.0: only one of emptyDir, hostPath may be set"
        );
    }
}
