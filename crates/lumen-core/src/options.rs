/// Default shader slot of the generated tangent attribute.
pub const DEFAULT_TANGENT_SLOT: u32 = 3;

/// Settings for [`calculate_tangents`](crate::tangent_generator::calculate_tangents).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TangentOptions {
    /// Attribute slot recorded on the appended `tangent` descriptor.
    pub slot: u32,
}

impl Default for TangentOptions {
    fn default() -> Self {
        Self {
            slot: DEFAULT_TANGENT_SLOT,
        }
    }
}

impl TangentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }
}
