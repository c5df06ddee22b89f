//! Synthetic KTX file builder shared by the integration tests and benches.

#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder, LittleEndian, WriteBytesExt};
use lumen_core::gl_enums;
use lumen_core::math_utils::padding_to_4;
use lumen_io::ktx_mipmap::face_length;
use lumen_io::{KtxHeader, DEFAULT_IDENTIFIER_LENGTH, KTX_IDENTIFIER};

/// How face payload bytes are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Deterministic nonzero pattern, distinct per level/element/face.
    Pattern,
    Zeros,
}

#[derive(Debug, Clone)]
pub struct KtxBuilder {
    pub header: KtxHeader,
    pub big_endian: bool,
    pub marker: Option<[u8; 4]>,
    pub identifier: Vec<u8>,
    pub key_values: Vec<Vec<u8>>,
    pub fill: Fill,
}

impl KtxBuilder {
    pub fn new(gl_type: u32, gl_format: u32, width: u32, height: u32) -> Self {
        Self {
            header: KtxHeader {
                gl_type,
                gl_type_size: gl_enums::bytes_per_component(gl_type).unwrap_or(1) as u32,
                gl_format,
                gl_internal_format: gl_format,
                gl_base_internal_format: gl_format,
                pixel_width: width,
                pixel_height: height,
                pixel_depth: 0,
                number_of_array_elements: 0,
                number_of_faces: 1,
                number_of_mipmap_levels: 1,
                bytes_of_key_value_data: 0,
            },
            big_endian: false,
            marker: None,
            identifier: default_identifier(),
            key_values: Vec::new(),
            fill: Fill::Pattern,
        }
    }

    pub fn rgba8(width: u32, height: u32) -> Self {
        Self::new(gl_enums::UNSIGNED_BYTE, gl_enums::RGBA, width, height)
    }

    /// Writes the bare 12-byte KTX 1.1 identifier.
    pub fn ktx11(mut self) -> Self {
        self.identifier = KTX_IDENTIFIER.to_vec();
        self
    }

    /// Byte offset of the endianness marker.
    pub fn marker_offset(&self) -> usize {
        self.identifier.len()
    }

    pub fn levels(mut self, levels: u32) -> Self {
        self.header.number_of_mipmap_levels = levels;
        self
    }

    pub fn faces(mut self, faces: u32) -> Self {
        self.header.number_of_faces = faces;
        self
    }

    pub fn elements(mut self, elements: u32) -> Self {
        self.header.number_of_array_elements = elements;
        self
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.header.pixel_depth = depth;
        self
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn key_value(mut self, entry: &[u8]) -> Self {
        self.key_values.push(entry.to_vec());
        self
    }

    /// Header with zero counts replaced by 1, as the decoder reports it.
    pub fn normalized_header(&self) -> KtxHeader {
        let mut header = self.header;
        header.pixel_depth = header.pixel_depth.max(1);
        header.number_of_array_elements = header.number_of_array_elements.max(1);
        header.number_of_faces = header.number_of_faces.max(1);
        header.number_of_mipmap_levels = header.number_of_mipmap_levels.max(1);
        header.bytes_of_key_value_data = self.key_value_bytes() as u32;
        header
    }

    pub fn key_value_bytes(&self) -> usize {
        self.key_values
            .iter()
            .map(|kv| 4 + kv.len() + padding_to_4(kv.len()))
            .sum()
    }

    pub fn face_bytes(&self, level: u32, element: u32, face: u32) -> Vec<u8> {
        let header = self.normalized_header();
        let (width, height, depth) = header.level_dimensions(level);
        let texel_size = header.texel_size().unwrap_or(4);
        let len = face_length(width, height, depth, texel_size);
        match self.fill {
            Fill::Zeros => vec![0; len],
            Fill::Pattern => (0..len)
                .map(|i| ((level as usize * 31 + element as usize * 7 + face as usize * 3 + i) % 255 + 1) as u8)
                .collect(),
        }
    }

    fn put_u32(&self, out: &mut Vec<u8>, value: u32) {
        let result = if self.big_endian {
            out.write_u32::<BigEndian>(value)
        } else {
            out.write_u32::<LittleEndian>(value)
        };
        result.unwrap();
    }

    pub fn build(&self) -> Vec<u8> {
        let header = self.normalized_header();
        let mut out = self.identifier.clone();
        match self.marker {
            Some(marker) => out.extend_from_slice(&marker),
            None => self.put_u32(&mut out, 0x0403_0201),
        }

        let raw = self.header;
        for field in [
            raw.gl_type,
            raw.gl_type_size,
            raw.gl_format,
            raw.gl_internal_format,
            raw.gl_base_internal_format,
            raw.pixel_width,
            raw.pixel_height,
            raw.pixel_depth,
            raw.number_of_array_elements,
            raw.number_of_faces,
            raw.number_of_mipmap_levels,
            header.bytes_of_key_value_data,
        ] {
            self.put_u32(&mut out, field);
        }

        for kv in &self.key_values {
            self.put_u32(&mut out, kv.len() as u32);
            out.extend_from_slice(kv);
            out.resize(out.len() + padding_to_4(kv.len()), 0);
        }

        let cube_only = header.number_of_faces == 6 && header.number_of_array_elements == 1;
        for level in 0..header.number_of_mipmap_levels {
            let face_len = self.face_bytes(level, 0, 0).len();
            let image_size = if cube_only {
                face_len
            } else {
                face_len * (header.number_of_faces * header.number_of_array_elements) as usize
            };
            self.put_u32(&mut out, image_size as u32);
            for element in 0..header.number_of_array_elements {
                for face in 0..header.number_of_faces {
                    out.extend(self.face_bytes(level, element, face));
                }
            }
        }
        out
    }
}

/// KTX 1.1 magic padded with zeros to the default identifier length.
pub fn default_identifier() -> Vec<u8> {
    let mut identifier = KTX_IDENTIFIER.to_vec();
    identifier.resize(DEFAULT_IDENTIFIER_LENGTH, 0);
    identifier
}

/// Reads a `u32` the way the builder wrote it.
pub fn read_u32(big_endian: bool, bytes: &[u8]) -> u32 {
    if big_endian {
        BigEndian::read_u32(bytes)
    } else {
        LittleEndian::read_u32(bytes)
    }
}
