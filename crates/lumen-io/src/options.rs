use lumen_core::decoder_buffer::DecoderBuffer;

use crate::ktx_header::DEFAULT_IDENTIFIER_LENGTH;

/// How cube and mip padding after image data is skipped.
///
/// Key/value entries are always padded to a 4-byte boundary and do not
/// follow this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// Skip zero bytes only up to the next 4-byte boundary.
    #[default]
    Aligned,
    /// Skip every zero byte until the next nonzero byte or the end of data.
    ///
    /// Also swallows leading zero bytes of whatever follows the padding.
    ZeroRun,
}

impl PaddingMode {
    /// Skips padding after a block that started at `origin` in `buffer`.
    pub(crate) fn skip(self, buffer: &mut DecoderBuffer<'_>, origin: usize) -> usize {
        match self {
            PaddingMode::Aligned => buffer.skip_zero_padding(origin, 4),
            PaddingMode::ZeroRun => buffer.skip_while_zero(),
        }
    }
}

/// Settings for [`KtxReader`](crate::ktx_reader::KtxReader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    pub padding: PaddingMode,
    /// Bytes read as the identifier before the endianness marker.
    pub identifier_length: usize,
    /// Reject files whose identifier does not open with the KTX 1.1 magic.
    pub strict_identifier: bool,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            padding: PaddingMode::default(),
            identifier_length: DEFAULT_IDENTIFIER_LENGTH,
            strict_identifier: false,
        }
    }
}

impl DecoderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identifier_length(mut self, length: usize) -> Self {
        self.identifier_length = length;
        self
    }

    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_strict_identifier(mut self, strict: bool) -> Self {
        self.strict_identifier = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DecoderOptions::default();
        assert_eq!(options.padding, PaddingMode::Aligned);
        assert_eq!(options.identifier_length, 15);
        assert!(!options.strict_identifier);
        assert_eq!(DecoderOptions::new().with_identifier_length(12).identifier_length, 12);
    }

    #[test]
    fn test_aligned_stops_at_boundary() {
        let data = [0xAA, 0x00, 0x00, 0x00, 0x00, 0x05];
        let mut buffer = DecoderBuffer::new(&data);
        buffer.decode_u8().unwrap();
        assert_eq!(PaddingMode::Aligned.skip(&mut buffer, 0), 3);
        assert_eq!(buffer.position(), 4);
    }

    #[test]
    fn test_zero_run_skips_everything() {
        let data = [0xAA, 0x00, 0x00, 0x00, 0x00, 0x05];
        let mut buffer = DecoderBuffer::new(&data);
        buffer.decode_u8().unwrap();
        assert_eq!(PaddingMode::ZeroRun.skip(&mut buffer, 0), 4);
        assert_eq!(buffer.peek_u8(), Some(0x05));
    }
}
