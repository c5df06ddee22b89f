//! Mip level image data.
//!
//! Each level starts with a `u32` `imageSize`, followed by every array
//! element and, inside each element, every face. Faces are followed by cube
//! padding and the level by mip padding.

use lumen_core::decoder_buffer::{DecoderBuffer, Endianness};
use lumen_core::math_utils::{next_mip_dimension, padding_to_4};
use tracing::trace;

use crate::error::KtxResult;
use crate::ktx_header::KtxHeader;
use crate::options::PaddingMode;

/// One array element of a mip level: 1 face, or 6 for cubemaps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrayElement<'a> {
    pub faces: Vec<&'a [u8]>,
}

/// Image data of one mip level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipmapLevel<'a> {
    /// `imageSize` as stored in the file. Not used for slicing.
    pub image_size: u32,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub elements: Vec<ArrayElement<'a>>,
}

impl<'a> MipmapLevel<'a> {
    /// Faces of the first array element in `+X, -X, +Y, -Y, +Z, -Z` order.
    pub fn cubemap(&self) -> Option<&[&'a [u8]]> {
        self.elements
            .first()
            .map(|e| e.faces.as_slice())
            .filter(|faces| faces.len() == 6)
    }

    pub fn face(&self, element: usize, face: usize) -> Option<&'a [u8]> {
        self.elements.get(element)?.faces.get(face).copied()
    }

    pub fn num_faces(&self) -> usize {
        self.elements.iter().map(|e| e.faces.len()).sum()
    }
}

/// Byte length of one face: `depth * height * padded_row`.
///
/// Rows are padded to a multiple of four bytes. Saturates instead of
/// overflowing so oversized declarations fail as truncated reads.
pub fn face_length(width: u32, height: u32, depth: u32, texel_size: usize) -> usize {
    let row_length = (width as usize).saturating_mul(texel_size);
    let padded_row = row_length.saturating_add(padding_to_4(row_length));
    (depth as usize)
        .saturating_mul(height as usize)
        .saturating_mul(padded_row)
}

/// Decodes every mip level declared in `header`.
///
/// Any read past the end of `buffer` aborts the whole decode.
pub fn decode_mipmap_levels<'a>(
    buffer: &mut DecoderBuffer<'a>,
    header: &KtxHeader,
    endian: Endianness,
    texel_size: usize,
    padding: PaddingMode,
) -> KtxResult<Vec<MipmapLevel<'a>>> {
    let mut levels = Vec::new();
    let (mut width, mut height, mut depth) = header.level_dimensions(0);
    for level in 0..header.number_of_mipmap_levels {
        let image_size = buffer.decode_u32(endian)?;
        let level_start = buffer.position();
        let length = face_length(width, height, depth, texel_size);

        let mut elements = Vec::new();
        for _ in 0..header.number_of_array_elements {
            let mut faces = Vec::new();
            for _ in 0..header.number_of_faces {
                let face_start = buffer.position();
                faces.push(buffer.decode_slice(length)?);
                padding.skip(buffer, face_start);
            }
            elements.push(ArrayElement { faces });
        }
        padding.skip(buffer, level_start);

        trace!(level, width, height, depth, image_size, face_length = length, "decoded mip level");
        levels.push(MipmapLevel {
            image_size,
            width,
            height,
            depth,
            elements,
        });

        width = next_mip_dimension(width);
        height = next_mip_dimension(height);
        depth = next_mip_dimension(depth);
    }
    Ok(levels)
}
