use crate::data_buffer::DataBuffer;
use crate::vertex_attribute::VertexAttribute;

/// Indexed triangle-list mesh with an interleaved vertex buffer.
///
/// `index_data` holds three entries per triangle. The vertex format may
/// describe several attribute blocks inside `vertex_data`, each with its own
/// offset and stride.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    vertex_format: Vec<VertexAttribute>,
    vertex_data: DataBuffer,
    index_data: Vec<u16>,
}

impl Mesh {
    pub fn new(
        vertex_format: Vec<VertexAttribute>,
        vertex_data: DataBuffer,
        index_data: Vec<u16>,
    ) -> Self {
        Self {
            vertex_format,
            vertex_data,
            index_data,
        }
    }

    pub fn vertex_format(&self) -> &[VertexAttribute] {
        &self.vertex_format
    }

    pub fn vertex_data(&self) -> &DataBuffer {
        &self.vertex_data
    }

    pub fn index_data(&self) -> &[u16] {
        &self.index_data
    }

    pub fn set_index_data(&mut self, index_data: Vec<u16>) {
        self.index_data = index_data;
    }

    /// First attribute declared with `semantics`.
    pub fn named_attribute(&self, semantics: &str) -> Option<&VertexAttribute> {
        self.vertex_format
            .iter()
            .find(|attribute| attribute.semantics() == semantics)
    }

    /// Appends a descriptor to the vertex format. Names are not deduplicated.
    pub fn add_attribute(&mut self, attribute: VertexAttribute) {
        self.vertex_format.push(attribute);
    }

    /// Appends a trailing block of little-endian floats to the vertex data and
    /// returns its byte offset.
    pub fn append_vertex_data(&mut self, values: &[f32]) -> usize {
        self.vertex_data.append_f32s(values)
    }

    /// Number of complete triangles in the index buffer.
    pub fn num_triangles(&self) -> usize {
        self.index_data.len() / 3
    }
}
