//! OpenGL enum values referenced by texture containers and vertex formats.
//!
//! Only the subset needed to size texels and describe vertex attributes is
//! listed here.

// Component types.
pub const BYTE: u32 = 0x1400;
pub const UNSIGNED_BYTE: u32 = 0x1401;
pub const SHORT: u32 = 0x1402;
pub const UNSIGNED_SHORT: u32 = 0x1403;
pub const INT: u32 = 0x1404;
pub const UNSIGNED_INT: u32 = 0x1405;
pub const FLOAT: u32 = 0x1406;
pub const HALF_FLOAT: u32 = 0x140B;

// Packed types: one value holds every component of a texel.
pub const UNSIGNED_SHORT_4_4_4_4: u32 = 0x8033;
pub const UNSIGNED_SHORT_5_5_5_1: u32 = 0x8034;
pub const UNSIGNED_SHORT_5_6_5: u32 = 0x8363;
pub const UNSIGNED_INT_2_10_10_10_REV: u32 = 0x8368;
pub const UNSIGNED_INT_24_8: u32 = 0x84FA;
pub const UNSIGNED_INT_10F_11F_11F_REV: u32 = 0x8C3B;
pub const UNSIGNED_INT_5_9_9_9_REV: u32 = 0x8C3E;

// Pixel formats.
pub const DEPTH_COMPONENT: u32 = 0x1902;
pub const RED: u32 = 0x1903;
pub const ALPHA: u32 = 0x1906;
pub const RGB: u32 = 0x1907;
pub const RGBA: u32 = 0x1908;
pub const LUMINANCE: u32 = 0x1909;
pub const LUMINANCE_ALPHA: u32 = 0x190A;
pub const RG: u32 = 0x8227;
pub const RG_INTEGER: u32 = 0x8228;
pub const RED_INTEGER: u32 = 0x8D94;
pub const RGB_INTEGER: u32 = 0x8D98;
pub const RGBA_INTEGER: u32 = 0x8D99;

// Sized internal formats with special upload rules.
pub const R11F_G11F_B10F: u32 = 0x8C3A;

/// Byte size of one component for an unpacked GL type.
pub fn bytes_per_component(gl_type: u32) -> Option<usize> {
    match gl_type {
        BYTE | UNSIGNED_BYTE => Some(1),
        SHORT | UNSIGNED_SHORT | HALF_FLOAT => Some(2),
        INT | UNSIGNED_INT | FLOAT => Some(4),
        _ => None,
    }
}

/// Byte size of a whole texel for a packed GL type.
pub fn packed_texel_size(gl_type: u32) -> Option<usize> {
    match gl_type {
        UNSIGNED_SHORT_4_4_4_4 | UNSIGNED_SHORT_5_5_5_1 | UNSIGNED_SHORT_5_6_5 => Some(2),
        UNSIGNED_INT_2_10_10_10_REV
        | UNSIGNED_INT_24_8
        | UNSIGNED_INT_10F_11F_11F_REV
        | UNSIGNED_INT_5_9_9_9_REV => Some(4),
        _ => None,
    }
}

/// Number of components per texel for a pixel format.
pub fn components_per_texel(gl_format: u32) -> Option<usize> {
    match gl_format {
        RED | RED_INTEGER | ALPHA | LUMINANCE | DEPTH_COMPONENT => Some(1),
        RG | RG_INTEGER | LUMINANCE_ALPHA => Some(2),
        RGB | RGB_INTEGER => Some(3),
        RGBA | RGBA_INTEGER => Some(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_sizes() {
        assert_eq!(bytes_per_component(UNSIGNED_BYTE), Some(1));
        assert_eq!(bytes_per_component(HALF_FLOAT), Some(2));
        assert_eq!(bytes_per_component(FLOAT), Some(4));
        assert_eq!(bytes_per_component(UNSIGNED_INT_10F_11F_11F_REV), None);
        assert_eq!(packed_texel_size(UNSIGNED_INT_10F_11F_11F_REV), Some(4));
        assert_eq!(packed_texel_size(UNSIGNED_SHORT_5_6_5), Some(2));
    }

    #[test]
    fn test_components_per_texel() {
        assert_eq!(components_per_texel(RED), Some(1));
        assert_eq!(components_per_texel(RG_INTEGER), Some(2));
        assert_eq!(components_per_texel(RGB), Some(3));
        assert_eq!(components_per_texel(RGBA_INTEGER), Some(4));
        assert_eq!(components_per_texel(0), None);
    }
}
