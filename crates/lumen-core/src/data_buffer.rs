use byteorder::{ByteOrder, LittleEndian};

use crate::status::BufferError;

/// Owned, growable vertex byte storage.
///
/// Vertex data is interleaved and little-endian. New attribute blocks are
/// appended at the end, so previously recorded byte offsets stay valid.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataBuffer {
    data: Vec<u8>,
}

impl DataBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Packs `values` as consecutive little-endian `f32`s.
    pub fn from_f32s(values: &[f32]) -> Self {
        let mut buffer = Self::new();
        buffer.append_f32s(values);
        buffer
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Appends raw bytes and returns the byte offset they start at.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let offset = self.data.len();
        self.data.extend_from_slice(bytes);
        offset
    }

    /// Appends little-endian `f32`s and returns the byte offset they start at.
    pub fn append_f32s(&mut self, values: &[f32]) -> usize {
        let offset = self.data.len();
        self.data.resize(offset + values.len() * 4, 0);
        LittleEndian::write_f32_into(values, &mut self.data[offset..]);
        offset
    }

    /// Reads one little-endian `f32` at `byte_pos`.
    pub fn read_f32(&self, byte_pos: usize) -> Result<f32, BufferError> {
        let end = byte_pos.checked_add(4).filter(|&end| end <= self.data.len());
        match end {
            Some(end) => Ok(LittleEndian::read_f32(&self.data[byte_pos..end])),
            None => Err(BufferError::OutOfBounds {
                offset: byte_pos,
                requested: 4,
                available: self.data.len().saturating_sub(byte_pos),
            }),
        }
    }

    /// Fills `out` with consecutive little-endian `f32`s starting at `byte_pos`.
    pub fn read_f32_into(&self, byte_pos: usize, out: &mut [f32]) -> Result<(), BufferError> {
        let size = out.len() * 4;
        let end = byte_pos.checked_add(size).filter(|&end| end <= self.data.len());
        match end {
            Some(end) => {
                LittleEndian::read_f32_into(&self.data[byte_pos..end], out);
                Ok(())
            }
            None => Err(BufferError::OutOfBounds {
                offset: byte_pos,
                requested: size,
                available: self.data.len().saturating_sub(byte_pos),
            }),
        }
    }
}
