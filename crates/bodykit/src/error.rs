//! Error types for bodykit

use std::fmt;
use thiserror::Error;

/// Boxed error returned by external collaborators (evaluators, schema generators)
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error kind for detailed categorization
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Token stream was empty, unbalanced, or did not resolve to an object root
    IllegalXml,
    MaxDepthExceeded { max: u16 },
    MaxSizeExceeded { max: usize },
    /// A repeated sibling tag hit [`SiblingPolicy::Reject`](crate::xml::SiblingPolicy::Reject)
    DuplicateSibling { name: String },
    InvalidJson,
    /// JSON value that has no Document Tree representation (arrays, numbers, ...)
    UnsupportedJson { path: String, found: &'static str },
    /// Evaluator failed while materializing a leaf
    Evaluation,
    /// Schema generator failed
    SchemaGeneration,
    /// Uploaded file does not map to a single file inside the body directory
    InvalidFileRef { stored_name: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalXml => write!(f, "illegal XML format"),
            Self::MaxDepthExceeded { max } => write!(f, "max depth exceeded: {max}"),
            Self::MaxSizeExceeded { max } => write!(f, "max size exceeded: {max}"),
            Self::DuplicateSibling { name } => write!(f, "duplicate sibling tag: {name}"),
            Self::InvalidJson => write!(f, "invalid JSON"),
            Self::UnsupportedJson { path, found } => {
                write!(f, "unsupported JSON value at {path}: {found}")
            }
            Self::Evaluation => write!(f, "placeholder evaluation failed"),
            Self::SchemaGeneration => write!(f, "schema generation failed"),
            Self::InvalidFileRef { stored_name } => {
                write!(f, "invalid body file name: {stored_name}")
            }
        }
    }
}

/// Main error type for bodykit
#[derive(Error, Debug)]
pub struct Error {
    kind: ErrorKind,
    detail: Option<String>,
    token: Option<usize>,
    #[source]
    source: Option<BoxError>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: None,
            token: None,
            source: None,
        }
    }

    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(kind)
        }
    }

    /// Create error pointing at the token with the given index
    pub fn at_token(kind: ErrorKind, token: usize, detail: impl Into<String>) -> Self {
        Self {
            token: Some(token),
            ..Self::with_detail(kind, detail)
        }
    }

    /// Attach the collaborator error that caused this one
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn token(&self) -> Option<usize> {
        self.token
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(token) = self.token {
            write!(f, " (token {token})")?;
        }
        Ok(())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::InvalidJson).with_source(err)
    }
}

/// Result type alias for bodykit
pub type Result<T> = std::result::Result<T, Error>;
