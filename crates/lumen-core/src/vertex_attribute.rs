use crate::data_types::ComponentType;
use crate::status::MeshError;

/// Semantic names understood by the tangent generator.
pub mod semantics {
    pub const POSITION: &str = "position";
    pub const NORMAL: &str = "normal";
    pub const UV: &str = "uv";
    pub const TANGENT: &str = "tangent";
}

/// Largest component count a single attribute may declare.
pub const MAX_COMPONENTS: usize = 4;

/// Describes where one attribute lives inside a mesh's vertex buffer.
///
/// `offset` is the byte position of the attribute for vertex 0 and `stride`
/// the distance in bytes between consecutive vertices. Attributes that share
/// an interleaved block carry the same stride.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    semantics: String,
    slot: u32,
    size: usize,
    component_type: ComponentType,
    offset: usize,
    stride: usize,
}

impl VertexAttribute {
    pub fn new(
        semantics: impl Into<String>,
        slot: u32,
        size: usize,
        component_type: ComponentType,
        offset: usize,
        stride: usize,
    ) -> Self {
        Self {
            semantics: semantics.into(),
            slot,
            size,
            component_type,
            offset,
            stride,
        }
    }

    /// Shorthand for a `Float32` attribute.
    pub fn float(
        semantics: impl Into<String>,
        slot: u32,
        size: usize,
        offset: usize,
        stride: usize,
    ) -> Self {
        Self::new(semantics, slot, size, ComponentType::Float32, offset, stride)
    }

    pub fn semantics(&self) -> &str {
        &self.semantics
    }

    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Number of components per vertex.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes occupied by one vertex's value.
    pub fn element_size(&self) -> usize {
        self.size * self.component_type.byte_length()
    }

    /// Byte position of this attribute's value for `vertex`.
    pub fn byte_position(&self, vertex: usize) -> usize {
        self.offset + self.stride * vertex
    }

    /// Checks that the attribute can be streamed.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.size == 0 || self.size > MAX_COMPONENTS {
            return Err(MeshError::InvalidAttribute {
                semantics: self.semantics.clone(),
                reason: format!("{} components, expected 1..={}", self.size, MAX_COMPONENTS),
            });
        }
        if self.component_type != ComponentType::Float32 {
            return Err(MeshError::InvalidAttribute {
                semantics: self.semantics.clone(),
                reason: format!("{:?} components cannot be streamed as floats", self.component_type),
            });
        }
        if self.stride < self.element_size() {
            return Err(MeshError::InvalidAttribute {
                semantics: self.semantics.clone(),
                reason: format!(
                    "stride {} is smaller than one {}-byte element",
                    self.stride,
                    self.element_size()
                ),
            });
        }
        Ok(())
    }
}
