//! KTX key/value metadata block.

use lumen_core::decoder_buffer::{DecoderBuffer, Endianness};

use crate::error::KtxResult;

/// One metadata entry, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue<'a> {
    /// Text up to and including the first NUL byte, decoded lossily.
    pub key: String,
    /// Bytes after the first NUL byte, borrowed from the file.
    pub value: &'a [u8],
}

impl<'a> KeyValue<'a> {
    /// Splits a raw `keyAndValue` entry after its first NUL byte.
    ///
    /// The NUL terminates the key and stays part of it. Without a NUL the
    /// whole entry is the key and the value is empty.
    pub fn from_entry(entry: &'a [u8]) -> Self {
        let (key, value) = match entry.iter().position(|&b| b == 0) {
            Some(nul) => (&entry[..=nul], &entry[nul + 1..]),
            None => (entry, &entry[entry.len()..]),
        };
        Self {
            key: String::from_utf8_lossy(key).into_owned(),
            value,
        }
    }

    /// The key without its terminating NUL.
    pub fn key_str(&self) -> &str {
        self.key.strip_suffix('\0').unwrap_or(&self.key)
    }

    /// The value as UTF-8 text with trailing NUL bytes removed.
    pub fn value_str(&self) -> Option<&'a str> {
        let end = self
            .value
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |last| last + 1);
        std::str::from_utf8(&self.value[..end]).ok()
    }
}

/// Decodes `byte_count` bytes of key/value data from `buffer`.
///
/// Exactly `byte_count` bytes are consumed, including the size prefixes and
/// the padding after each entry. Padding stops at the next 4-byte boundary
/// so it never reaches into the following size prefix. An entry running past
/// the block fails with
/// [`KtxError::TruncatedData`](crate::error::KtxError::TruncatedData).
pub fn decode_key_value_data<'a>(
    buffer: &mut DecoderBuffer<'a>,
    endian: Endianness,
    byte_count: usize,
) -> KtxResult<Vec<KeyValue<'a>>> {
    let mut block = buffer.sub_buffer(byte_count)?;
    let mut entries = Vec::new();
    while !block.is_empty() {
        let origin = block.position();
        let size = block.decode_u32(endian)? as usize;
        let entry = block.decode_slice(size)?;
        entries.push(KeyValue::from_entry(entry));
        block.skip_zero_padding(origin, 4);
    }
    Ok(entries)
}
