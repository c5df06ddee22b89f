use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::status::BufferError;

/// Byte order used for multi-byte reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Maps the "is little endian" flag stored in container headers.
    pub fn from_little_endian(little_endian: bool) -> Self {
        if little_endian {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    pub fn is_little(self) -> bool {
        self == Endianness::Little
    }

    /// Reads a `u32` from the first four bytes of `bytes`.
    ///
    /// Panics if `bytes` is shorter than four bytes; callers check bounds.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            Endianness::Little => LittleEndian::read_u32(bytes),
            Endianness::Big => BigEndian::read_u32(bytes),
        }
    }

    #[inline]
    pub fn write_u32(self, bytes: &mut [u8], value: u32) {
        match self {
            Endianness::Little => LittleEndian::write_u32(bytes, value),
            Endianness::Big => BigEndian::write_u32(bytes, value),
        }
    }
}

/// Sequential, offset-tracking reader over a borrowed byte buffer.
///
/// Every read hands back a view into the original buffer; nothing is copied.
/// Reads that would run past the end fail with [`BufferError::OutOfBounds`]
/// and leave the position untouched.
///
/// # Example
///
/// ```
/// use lumen_core::decoder_buffer::{DecoderBuffer, Endianness};
///
/// let data = [0x01, 0x00, 0x00, 0x00, 0xAA, 0x00, 0x00, 0x07];
/// let mut buffer = DecoderBuffer::new(&data);
///
/// assert_eq!(buffer.decode_u32(Endianness::Little).unwrap(), 1);
/// assert_eq!(buffer.decode_slice(1).unwrap(), &[0xAA]);
/// assert_eq!(buffer.skip_while_zero(), 2);
/// assert_eq!(buffer.remaining_size(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DecoderBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DecoderBuffer<'a> {
    /// Creates a new `DecoderBuffer` positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position in bytes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining in the buffer.
    pub fn remaining_size(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining_size() == 0
    }

    /// Returns the byte at the current position without advancing.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn check_available(&self, size: usize) -> Result<(), BufferError> {
        if size > self.remaining_size() {
            return Err(BufferError::OutOfBounds {
                offset: self.pos,
                requested: size,
                available: self.remaining_size(),
            });
        }
        Ok(())
    }

    /// Decodes a single byte.
    pub fn decode_u8(&mut self) -> Result<u8, BufferError> {
        self.check_available(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Decodes a `u32` using the given byte order.
    pub fn decode_u32(&mut self, endian: Endianness) -> Result<u32, BufferError> {
        self.check_available(4)?;
        let value = endian.read_u32(&self.data[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(value)
    }

    /// Decodes and returns a view of the next `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::OutOfBounds` if not enough bytes remain.
    pub fn decode_slice(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check_available(size)?;
        let slice = &self.data[self.pos..self.pos + size];
        self.pos += size;
        Ok(slice)
    }

    /// Splits off a cursor over the next `size` bytes and advances past them.
    ///
    /// Positions reported by the returned cursor are relative to its own start.
    pub fn sub_buffer(&mut self, size: usize) -> Result<DecoderBuffer<'a>, BufferError> {
        self.decode_slice(size).map(DecoderBuffer::new)
    }

    /// Advances one byte at a time while the current byte is `0x00`.
    ///
    /// Stops at the first nonzero byte, which is left unread, or at the end
    /// of the buffer. Returns the number of bytes skipped.
    pub fn skip_while_zero(&mut self) -> usize {
        let start = self.pos;
        while self.peek_u8() == Some(0x00) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skips zero bytes, but never past the next multiple of `alignment`
    /// counted from `origin`.
    ///
    /// A nonzero byte or the end of the buffer also stops the skip. Already
    /// aligned positions skip nothing. Returns the number of bytes skipped.
    pub fn skip_zero_padding(&mut self, origin: usize, alignment: usize) -> usize {
        let start = self.pos;
        if alignment == 0 {
            return 0;
        }
        while (self.pos.saturating_sub(origin)) % alignment != 0 && self.peek_u8() == Some(0x00) {
            self.pos += 1;
        }
        self.pos - start
    }
}
