//! KTX container header.
//!
//! Layout with the default 15-byte identifier (67 bytes):
//!
//! | Offset | Size | Field                     |
//! |--------|------|---------------------------|
//! | 0      | 15   | identifier                |
//! | 15     | 4    | endianness marker         |
//! | 19     | 48   | twelve `u32` fields below |
//!
//! Plain KTX 1.1 files carry a 12-byte identifier and a 64-byte header; set
//! [`DecoderOptions::identifier_length`](crate::options::DecoderOptions) to
//! [`KTX11_IDENTIFIER_LENGTH`] to read them.
//!
//! The marker reads `01 02 03 04` when the file was written little-endian.
//! Every other marker is treated as big-endian without complaint.

use lumen_core::decoder_buffer::{DecoderBuffer, Endianness};
use lumen_core::gl_enums;

use crate::error::{KtxError, KtxResult};

/// `«KTX 11»\r\n\x1A\n`
pub const KTX_IDENTIFIER: [u8; 12] = [
    0xAB, 0x4B, 0x54, 0x58, 0x20, 0x31, 0x31, 0xBB, 0x0D, 0x0A, 0x1A, 0x0A,
];

/// Identifier bytes read before the marker unless configured otherwise.
pub const DEFAULT_IDENTIFIER_LENGTH: usize = 15;

/// Identifier length of plain KTX 1.1 files.
pub const KTX11_IDENTIFIER_LENGTH: usize = KTX_IDENTIFIER.len();

/// Endianness marker as it appears in a little-endian file.
pub const LITTLE_ENDIAN_MARKER: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

/// Bytes taken by the marker and the twelve header fields.
const FIELDS_SIZE: usize = 4 + 12 * 4;

/// Total size of identifier, marker and fields.
pub const fn header_size(identifier_length: usize) -> usize {
    identifier_length + FIELDS_SIZE
}

/// Identifier and byte order, read before any header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KtxPreamble<'a> {
    pub identifier: &'a [u8],
    pub endianness: Endianness,
}

impl<'a> KtxPreamble<'a> {
    pub fn decode(buffer: &mut DecoderBuffer<'a>, identifier_length: usize) -> KtxResult<Self> {
        let identifier = buffer.decode_slice(identifier_length)?;
        let marker = buffer.decode_slice(LITTLE_ENDIAN_MARKER.len())?;
        Ok(Self {
            identifier,
            endianness: Endianness::from_little_endian(marker == LITTLE_ENDIAN_MARKER),
        })
    }

    /// True when the identifier opens with the KTX 1.1 magic.
    ///
    /// Bytes past the magic in a longer identifier are not checked.
    pub fn has_valid_identifier(&self) -> bool {
        self.identifier.starts_with(&KTX_IDENTIFIER)
    }

    pub fn check_identifier(&self) -> KtxResult<()> {
        if self.has_valid_identifier() {
            Ok(())
        } else {
            Err(KtxError::InvalidIdentifier {
                found: self.identifier.to_vec(),
            })
        }
    }
}

/// The twelve `u32` header fields, in file order.
///
/// Zero counts for depth, array elements, faces and mip levels are stored
/// as 1 after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KtxHeader {
    pub gl_type: u32,
    pub gl_type_size: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub number_of_array_elements: u32,
    pub number_of_faces: u32,
    pub number_of_mipmap_levels: u32,
    pub bytes_of_key_value_data: u32,
}

impl KtxHeader {
    /// Reads the fields that follow the endianness marker.
    pub fn decode(buffer: &mut DecoderBuffer<'_>, endian: Endianness) -> KtxResult<Self> {
        // Struct literal fields are evaluated in source order.
        let mut next = || buffer.decode_u32(endian);
        let header = Self {
            gl_type: next()?,
            gl_type_size: next()?,
            gl_format: next()?,
            gl_internal_format: next()?,
            gl_base_internal_format: next()?,
            pixel_width: next()?,
            pixel_height: next()?,
            pixel_depth: next()?,
            number_of_array_elements: next()?,
            number_of_faces: next()?,
            number_of_mipmap_levels: next()?,
            bytes_of_key_value_data: next()?,
        };
        Ok(header.normalized())
    }

    fn normalized(mut self) -> Self {
        self.pixel_depth = self.pixel_depth.max(1);
        self.number_of_array_elements = self.number_of_array_elements.max(1);
        self.number_of_faces = self.number_of_faces.max(1);
        self.number_of_mipmap_levels = self.number_of_mipmap_levels.max(1);
        self
    }

    /// Bytes per texel derived from `gl_type` and `gl_format`.
    ///
    /// Packed types (e.g. `UNSIGNED_INT_10F_11F_11F_REV`) carry the whole
    /// texel in one value and ignore the component count.
    pub fn texel_size(&self) -> KtxResult<usize> {
        if let Some(size) = gl_enums::packed_texel_size(self.gl_type) {
            return Ok(size);
        }
        gl_enums::bytes_per_component(self.gl_type)
            .zip(gl_enums::components_per_texel(self.gl_format))
            .map(|(bytes, components)| bytes * components)
            .ok_or(KtxError::UnsupportedFormat {
                gl_type: self.gl_type,
                gl_format: self.gl_format,
            })
    }

    /// `(width, height, depth)` of mip level `level`, each at least 1.
    pub fn level_dimensions(&self, level: u32) -> (u32, u32, u32) {
        let scale = |d: u32| d.checked_shr(level).unwrap_or(0).max(1);
        (
            scale(self.pixel_width),
            scale(self.pixel_height),
            scale(self.pixel_depth),
        )
    }

    pub fn is_cubemap(&self) -> bool {
        self.number_of_faces == 6
    }

    pub fn is_array(&self) -> bool {
        self.number_of_array_elements > 1
    }
}
