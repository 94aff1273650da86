use thiserror::Error;

/// A required input was missing before any request was built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A document from the service (or an inbound webhook) could not be read.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("missing required element: {0}")]
    MissingElement(String),

    #[error("element {element} is not an integer: {value:?}")]
    InvalidInteger { element: String, value: String },

    #[error("element {element} is not a valid timestamp: {value:?}")]
    InvalidTimestamp { element: String, value: String },

    #[error("unknown status code: {0}")]
    InvalidStatusCode(i64),

    #[error("missing form parameter: {0}")]
    MissingParam(&'static str),

    #[error("file contents are not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("encoded XML is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Everything a full request/response round trip can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// The validation failure behind this error, if that is what it was.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Encode(EncodeError::Validation(v)) => Some(v),
            _ => None,
        }
    }
}
