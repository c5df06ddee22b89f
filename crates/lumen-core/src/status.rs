use thiserror::Error;

/// Failure while reading from a [`DecoderBuffer`](crate::decoder_buffer::DecoderBuffer)
/// or another byte view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Out of bounds: need {requested} bytes at offset {offset}, have {available}")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        available: usize,
    },
}

/// Failure while streaming mesh attributes or generating tangents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Missing attribute: \"{0}\" is required")]
    MissingAttribute(String),
    #[error("Attribute \"{semantics}\" has {actual} components, expected {expected}")]
    ComponentCountMismatch {
        semantics: String,
        expected: usize,
        actual: usize,
    },
    #[error("Attribute \"{0}\" is declared more than once")]
    DuplicateAttribute(String),
    #[error("Attribute streams disagree on length")]
    AttributeStreamMismatch,
    #[error("Invalid attribute \"{semantics}\": {reason}")]
    InvalidAttribute { semantics: String, reason: String },
    #[error("Vertex data error: {0}")]
    Buffer(#[from] BufferError),
}

pub type Status = Result<(), MeshError>;
