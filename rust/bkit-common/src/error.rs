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

    pub fn out_of_range(context: impl Into<String>) -> Error {
        ErrorKind::OutOfRange {
            context: context.into(),
        }
        .into()
    }

    pub fn malformed(element: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::MalformedInput {
            element: element.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn limit_exceeded(element: impl Into<String>, limit: usize) -> Error {
        ErrorKind::EncodingLimitExceeded {
            element: element.into(),
            limit,
        }
        .into()
    }

    pub fn unsafe_relocation() -> Error {
        ErrorKind::UnsafeRelocation.into()
    }

    pub fn invalid_tag(tag: u8) -> Error {
        ErrorKind::InvalidTag { tag }.into()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.kind(), ErrorKind::MalformedInput { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("out of range: {context}")]
    OutOfRange { context: String },

    #[error("malformed input for '{element}': {message}")]
    MalformedInput { element: String, message: String },

    #[error("reached the limit of {limit} bytes while decoding '{element}'")]
    EncodingLimitExceeded { element: String, limit: usize },

    #[error(
        "cannot relocate decoder contents into aligned memory: \
         the current contents are still referenced by a previously returned view"
    )]
    UnsafeRelocation,

    #[error("unknown typed array tag 0x{tag:02x}")]
    InvalidTag { tag: u8 },

    #[error("invalid utf-8 string: {source}")]
    InvalidUtf8 { source: std::str::Utf8Error },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(source: std::str::Utf8Error) -> Self {
        ErrorKind::InvalidUtf8 { source }.into()
    }
}
