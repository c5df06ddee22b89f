//! Lumen I/O library for texture containers.
//!
//! Decodes KTX files straight from a byte slice. Header fields are read
//! with the byte order declared in the file, metadata keeps its declaration
//! order, and image data is handed out as views into the input.
//!
//! ```ignore
//! use lumen_io::{read_ktx, DecoderOptions, KtxReader, PaddingMode, KTX11_IDENTIFIER_LENGTH};
//!
//! let info = read_ktx(&bytes)?;
//! for (level, mip) in info.mipmaps.iter().enumerate() {
//!     println!("level {level}: {}x{}", mip.width, mip.height);
//! }
//!
//! // Plain KTX 1.1 files with a 12-byte identifier.
//! let reader = KtxReader::new(DecoderOptions::new().with_identifier_length(KTX11_IDENTIFIER_LENGTH));
//! let info = reader.read(&bytes)?;
//!
//! // Legacy files whose padding is not 4-byte aligned.
//! let reader = KtxReader::new(DecoderOptions::new().with_padding(PaddingMode::ZeroRun));
//! let info = reader.read(&bytes)?;
//! ```

pub mod error;
pub mod ktx_header;
pub mod ktx_key_value;
pub mod ktx_mipmap;
pub mod ktx_reader;
pub mod options;

pub use error::{KtxError, KtxResult};
pub use ktx_header::{
    KtxHeader, DEFAULT_IDENTIFIER_LENGTH, KTX11_IDENTIFIER_LENGTH, KTX_IDENTIFIER,
};
pub use ktx_key_value::KeyValue;
pub use ktx_mipmap::{ArrayElement, MipmapLevel};
pub use ktx_reader::{read_ktx, KtxInfo, KtxReader, UploadFormat};
pub use options::{DecoderOptions, PaddingMode};
