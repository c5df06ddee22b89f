//! KTX container reader.
//!
//! Provides both a struct-based API (`KtxReader`) and a convenience function
//! (`read_ktx`). Decoding never copies image data: every face and metadata
//! value in [`KtxInfo`] borrows the input buffer.

use lumen_core::decoder_buffer::DecoderBuffer;
use lumen_core::gl_enums;
use tracing::debug;

use crate::error::KtxResult;
use crate::ktx_header::{KtxHeader, KtxPreamble};
use crate::ktx_key_value::{decode_key_value_data, KeyValue};
use crate::ktx_mipmap::{decode_mipmap_levels, MipmapLevel};
use crate::options::DecoderOptions;

/// `(internalformat, format, type)` arguments for a GL texture upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadFormat {
    pub internal_format: u32,
    pub format: u32,
    pub gl_type: u32,
}

/// A decoded KTX container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KtxInfo<'a> {
    /// The identifier bytes that open the file, decoded lossily as UTF-8.
    pub identifier: String,
    pub little_endian: bool,
    pub header: KtxHeader,
    pub key_value_data: Vec<KeyValue<'a>>,
    pub mipmaps: Vec<MipmapLevel<'a>>,
}

impl<'a> KtxInfo<'a> {
    /// First entry whose key contains `pattern`.
    pub fn find_key_value(&self, pattern: &str) -> Option<&KeyValue<'a>> {
        self.key_value_data.iter().find(|kv| kv.key.contains(pattern))
    }

    /// Spherical harmonic coefficients stored under the first `sh` key.
    ///
    /// The value is split on whitespace; tokens that are not numbers are
    /// dropped. Returns an empty list when no such key exists.
    pub fn spherical_harmonics(&self) -> Vec<f32> {
        let Some(entry) = self.find_key_value("sh") else {
            return Vec::new();
        };
        String::from_utf8_lossy(entry.value)
            .split_whitespace()
            .filter_map(|token| token.trim_end_matches('\0').parse::<f32>().ok())
            .collect()
    }

    /// Upload arguments for this texture.
    ///
    /// `R11F_G11F_B10F` data is uploaded as packed `RGB` /
    /// `UNSIGNED_INT_10F_11F_11F_REV` whatever the header says.
    pub fn upload_format(&self) -> UploadFormat {
        let internal_format = self.header.gl_internal_format;
        if internal_format == gl_enums::R11F_G11F_B10F {
            UploadFormat {
                internal_format,
                format: gl_enums::RGB,
                gl_type: gl_enums::UNSIGNED_INT_10F_11F_11F_REV,
            }
        } else {
            UploadFormat {
                internal_format,
                format: self.header.gl_format,
                gl_type: self.header.gl_type,
            }
        }
    }

    pub fn is_cubemap(&self) -> bool {
        self.header.is_cubemap()
    }

    pub fn is_array(&self) -> bool {
        self.header.is_array()
    }

    pub fn num_levels(&self) -> usize {
        self.mipmaps.len()
    }
}

/// KTX container reader.
#[derive(Debug, Clone, Default)]
pub struct KtxReader {
    options: DecoderOptions,
}

impl KtxReader {
    pub fn new(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes a complete KTX container from `data`.
    ///
    /// # Errors
    ///
    /// - `KtxError::TruncatedData` if any block runs past the end of `data`.
    /// - `KtxError::InvalidIdentifier` if `strict_identifier` is set and the
    ///   identifier does not match.
    /// - `KtxError::UnsupportedFormat` if no texel size is known for the
    ///   header's `glType`/`glFormat` pair.
    pub fn read<'a>(&self, data: &'a [u8]) -> KtxResult<KtxInfo<'a>> {
        let mut buffer = DecoderBuffer::new(data);

        let preamble = KtxPreamble::decode(&mut buffer, self.options.identifier_length)?;
        if self.options.strict_identifier {
            preamble.check_identifier()?;
        }
        let endian = preamble.endianness;
        let header = KtxHeader::decode(&mut buffer, endian)?;

        let key_value_data = decode_key_value_data(
            &mut buffer,
            endian,
            header.bytes_of_key_value_data as usize,
        )?;

        let texel_size = header.texel_size()?;
        let mipmaps = decode_mipmap_levels(
            &mut buffer,
            &header,
            endian,
            texel_size,
            self.options.padding,
        )?;

        debug!(
            width = header.pixel_width,
            height = header.pixel_height,
            depth = header.pixel_depth,
            levels = mipmaps.len(),
            elements = header.number_of_array_elements,
            faces = header.number_of_faces,
            key_values = key_value_data.len(),
            little_endian = endian.is_little(),
            "decoded KTX container"
        );

        Ok(KtxInfo {
            identifier: String::from_utf8_lossy(preamble.identifier).into_owned(),
            little_endian: endian.is_little(),
            header,
            key_value_data,
            mipmaps,
        })
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Decodes `data` with default [`DecoderOptions`].
pub fn read_ktx(data: &[u8]) -> KtxResult<KtxInfo<'_>> {
    KtxReader::default().read(data)
}
