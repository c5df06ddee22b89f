use lumen_core::status::BufferError;
use thiserror::Error;

/// Failure while decoding a KTX container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KtxError {
    #[error("Truncated KTX data: {0}")]
    TruncatedData(#[from] BufferError),
    #[error("Invalid KTX identifier: {found:02X?}")]
    InvalidIdentifier { found: Vec<u8> },
    #[error("Unsupported texel layout: glType {gl_type:#06X}, glFormat {gl_format:#06X}")]
    UnsupportedFormat { gl_type: u32, gl_format: u32 },
}

pub type KtxResult<T> = Result<T, KtxError>;
