use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn not_found(path: impl Into<String>) -> Error {
        Error(ErrorKind::NotFound { path: path.into() }.into())
    }

    pub fn malformed_header(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::MalformedHeader {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn shape_mismatch(line_number: u64, expected: usize, actual: usize) -> Error {
        Error(
            ErrorKind::ShapeMismatch {
                line_number,
                expected,
                actual,
            }
            .into(),
        )
    }

    pub fn unknown_index(name: impl Into<String>) -> Error {
        Error(ErrorKind::UnknownIndex { name: name.into() }.into())
    }

    pub fn invalid_seek(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidSeek {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn closed(name: impl Into<String>) -> Error {
        Error(ErrorKind::ClosedResource { name: name.into() }.into())
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn decode(context: impl Into<String>, source: serde_json::Error) -> Error {
        Error(
            ErrorKind::Decode {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("path not found: '{path}'")]
    NotFound { path: String },

    #[error("malformed header: {message}")]
    MalformedHeader { message: String },

    #[error("record at line {line_number} has {actual} fields, header has {expected}")]
    ShapeMismatch {
        line_number: u64,
        expected: usize,
        actual: usize,
    },

    #[error("unknown index '{name}'")]
    UnknownIndex { name: String },

    #[error("invalid seek: {message}")]
    InvalidSeek { message: String },

    #[error("operation on closed resource '{name}'")]
    ClosedResource { name: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("failed to decode record for '{context}': {source}")]
    Decode {
        context: String,
        source: serde_json::Error,
    },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}
