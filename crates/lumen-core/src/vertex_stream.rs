//! Lazy views that rebuild per-corner attribute values from a mesh.
//!
//! Three layers, each a producer that can be iterated any number of times:
//!
//! - [`VertexAttributeStream`] yields one `(index, value)` pair per index
//!   buffer entry for a single attribute.
//! - [`VertexStream`] zips one attribute stream per attribute into
//!   [`StreamVertex`] records keyed by semantic name.
//! - [`TriangleStream`] groups consecutive vertices into triangles.
//!
//! Shared vertices are visited once per corner that references them; no
//! deduplication happens at this level. Calling `iter()` again restarts from
//! the first index. Each returned iterator is independent, so two consumers
//! never advance each other.

use byteorder::{ByteOrder, LittleEndian};

use crate::data_buffer::DataBuffer;
use crate::mesh::Mesh;
use crate::status::{BufferError, MeshError};
use crate::vector_extensions::{Vector2f, Vector3f};
use crate::vertex_attribute::{VertexAttribute, MAX_COMPONENTS};

/// Value of one attribute for one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue {
    Scalar(f32),
    Vector {
        components: [f32; MAX_COMPONENTS],
        len: usize,
    },
}

impl AttributeValue {
    pub fn from_slice(values: &[f32]) -> Self {
        if values.len() == 1 {
            return AttributeValue::Scalar(values[0]);
        }
        let mut components = [0.0; MAX_COMPONENTS];
        let len = values.len().min(MAX_COMPONENTS);
        components[..len].copy_from_slice(&values[..len]);
        AttributeValue::Vector { components, len }
    }

    pub fn as_slice(&self) -> &[f32] {
        match self {
            AttributeValue::Scalar(value) => std::slice::from_ref(value),
            AttributeValue::Vector { components, len } => &components[..*len],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            AttributeValue::Scalar(value) => Some(*value),
            AttributeValue::Vector { .. } => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vector2f> {
        (self.len() == 2).then(|| Vector2f::from_slice(self.as_slice()))
    }

    pub fn as_vec3(&self) -> Option<Vector3f> {
        (self.len() == 3).then(|| Vector3f::from_slice(self.as_slice()))
    }
}

/// One index buffer entry resolved against a single attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamVertexAttribute {
    pub index: u16,
    pub value: AttributeValue,
}

/// Producer of `(index, value)` pairs for one attribute of a mesh.
#[derive(Debug, Clone)]
pub struct VertexAttributeStream<'m> {
    indices: &'m [u16],
    data: &'m DataBuffer,
    attribute: &'m VertexAttribute,
}

impl<'m> VertexAttributeStream<'m> {
    /// Binds `attribute` to the vertex and index data of `mesh`.
    ///
    /// # Errors
    ///
    /// - `MeshError::InvalidAttribute` if the descriptor cannot be streamed.
    /// - `MeshError::Buffer` if the highest referenced vertex lies past the
    ///   end of the vertex data.
    pub fn new(mesh: &'m Mesh, attribute: &'m VertexAttribute) -> Result<Self, MeshError> {
        attribute.validate()?;
        let data = mesh.vertex_data();
        if let Some(&max_index) = mesh.index_data().iter().max() {
            let start = attribute.byte_position(max_index as usize);
            let end = start + attribute.element_size();
            if end > data.data_size() {
                return Err(BufferError::OutOfBounds {
                    offset: start,
                    requested: attribute.element_size(),
                    available: data.data_size().saturating_sub(start),
                }
                .into());
            }
        }
        Ok(Self {
            indices: mesh.index_data(),
            data,
            attribute,
        })
    }

    pub fn semantics(&self) -> &'m str {
        self.attribute.semantics()
    }

    /// Number of items one pass yields.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Starts a new pass from the first index.
    pub fn iter(&self) -> VertexAttributeIter<'m> {
        VertexAttributeIter {
            indices: self.indices,
            data: self.data,
            attribute: self.attribute,
            position: 0,
        }
    }
}

impl<'a, 'm> IntoIterator for &'a VertexAttributeStream<'m> {
    type Item = StreamVertexAttribute;
    type IntoIter = VertexAttributeIter<'m>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a [`VertexAttributeStream`].
#[derive(Debug, Clone)]
pub struct VertexAttributeIter<'m> {
    indices: &'m [u16],
    data: &'m DataBuffer,
    attribute: &'m VertexAttribute,
    position: usize,
}

impl<'m> Iterator for VertexAttributeIter<'m> {
    type Item = StreamVertexAttribute;

    fn next(&mut self) -> Option<Self::Item> {
        let index = *self.indices.get(self.position)?;
        self.position += 1;

        // Bounds were checked against the largest index when the stream was built.
        let start = self.attribute.byte_position(index as usize);
        let bytes = &self.data.data()[start..start + self.attribute.element_size()];
        let mut components = [0.0; MAX_COMPONENTS];
        let len = self.attribute.size();
        LittleEndian::read_f32_into(bytes, &mut components[..len]);
        Some(StreamVertexAttribute {
            index,
            value: AttributeValue::from_slice(&components[..len]),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.indices.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VertexAttributeIter<'_> {}

/// All streamed attributes of one index buffer entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamVertex<'m> {
    pub index: u16,
    fields: Vec<(&'m str, AttributeValue)>,
}

impl<'m> StreamVertex<'m> {
    /// Value of the attribute named `semantics`, if the stream carries it.
    pub fn get(&self, semantics: &str) -> Option<&AttributeValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == semantics)
            .map(|(_, value)| value)
    }

    /// Semantic names in vertex-format order.
    pub fn semantics(&self) -> impl Iterator<Item = &'m str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

/// Producer of whole vertices: one attribute stream per schema entry.
///
/// The schema is fixed at construction and every name in it is unique.
#[derive(Debug, Clone)]
pub struct VertexStream<'m> {
    streams: Vec<VertexAttributeStream<'m>>,
}

impl<'m> VertexStream<'m> {
    /// Streams every attribute of the mesh's vertex format.
    ///
    /// # Errors
    ///
    /// `MeshError::DuplicateAttribute` if two attributes share a semantic
    /// name, plus any error from [`VertexAttributeStream::new`].
    pub fn new(mesh: &'m Mesh) -> Result<Self, MeshError> {
        let mut streams: Vec<VertexAttributeStream<'m>> = Vec::with_capacity(mesh.vertex_format().len());
        for attribute in mesh.vertex_format() {
            if streams.iter().any(|s| s.semantics() == attribute.semantics()) {
                return Err(MeshError::DuplicateAttribute(attribute.semantics().to_string()));
            }
            streams.push(VertexAttributeStream::new(mesh, attribute)?);
        }
        Ok(Self { streams })
    }

    /// Streams only the named attributes, in the given order.
    ///
    /// The first attribute declared under each name is used.
    pub fn with_semantics(mesh: &'m Mesh, names: &[&str]) -> Result<Self, MeshError> {
        let mut streams: Vec<VertexAttributeStream<'m>> = Vec::with_capacity(names.len());
        for &name in names {
            if streams.iter().any(|s| s.semantics() == name) {
                return Err(MeshError::DuplicateAttribute(name.to_string()));
            }
            let attribute = mesh
                .named_attribute(name)
                .ok_or_else(|| MeshError::MissingAttribute(name.to_string()))?;
            streams.push(VertexAttributeStream::new(mesh, attribute)?);
        }
        Ok(Self { streams })
    }

    /// Starts a new pass from the first index.
    pub fn iter(&self) -> VertexIter<'m> {
        VertexIter {
            streams: self
                .streams
                .iter()
                .map(|s| (s.semantics(), s.iter()))
                .collect(),
            finished: false,
        }
    }
}

impl<'a, 'm> IntoIterator for &'a VertexStream<'m> {
    type Item = Result<StreamVertex<'m>, MeshError>;
    type IntoIter = VertexIter<'m>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a [`VertexStream`].
///
/// Yields `MeshError::AttributeStreamMismatch` once if the component streams
/// run out at different times or disagree on the index, then stops.
#[derive(Debug, Clone)]
pub struct VertexIter<'m> {
    streams: Vec<(&'m str, VertexAttributeIter<'m>)>,
    finished: bool,
}

impl<'m> Iterator for VertexIter<'m> {
    type Item = Result<StreamVertex<'m>, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.streams.is_empty() {
            return None;
        }

        let mut index = None;
        let mut fields = Vec::with_capacity(self.streams.len());
        let mut exhausted = 0;
        let mut mismatch = false;
        for (name, stream) in self.streams.iter_mut() {
            match stream.next() {
                Some(item) => {
                    if *index.get_or_insert(item.index) != item.index {
                        mismatch = true;
                    }
                    fields.push((*name, item.value));
                }
                None => exhausted += 1,
            }
        }

        if exhausted == self.streams.len() {
            self.finished = true;
            return None;
        }
        if exhausted > 0 || mismatch {
            self.finished = true;
            return Some(Err(MeshError::AttributeStreamMismatch));
        }
        // At least one stream produced an item, so the index is set.
        index.map(|index| Ok(StreamVertex { index, fields }))
    }
}

/// Three consecutive vertices of a triangle list.
pub type StreamTriangle<'m> = [StreamVertex<'m>; 3];

/// Producer of triangles built from a [`VertexStream`].
///
/// Trailing index entries that do not form a full triangle are dropped.
#[derive(Debug, Clone)]
pub struct TriangleStream<'m> {
    vertices: VertexStream<'m>,
}

impl<'m> TriangleStream<'m> {
    pub fn new(mesh: &'m Mesh) -> Result<Self, MeshError> {
        Ok(Self::from_vertex_stream(VertexStream::new(mesh)?))
    }

    pub fn with_semantics(mesh: &'m Mesh, names: &[&str]) -> Result<Self, MeshError> {
        Ok(Self::from_vertex_stream(VertexStream::with_semantics(mesh, names)?))
    }

    pub fn from_vertex_stream(vertices: VertexStream<'m>) -> Self {
        Self { vertices }
    }

    /// Starts a new pass from the first triangle.
    pub fn iter(&self) -> TriangleIter<'m> {
        TriangleIter {
            vertices: self.vertices.iter(),
        }
    }
}

impl<'a, 'm> IntoIterator for &'a TriangleStream<'m> {
    type Item = Result<StreamTriangle<'m>, MeshError>;
    type IntoIter = TriangleIter<'m>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One pass over a [`TriangleStream`].
#[derive(Debug, Clone)]
pub struct TriangleIter<'m> {
    vertices: VertexIter<'m>,
}

impl<'m> TriangleIter<'m> {
    fn next_vertex(&mut self) -> Option<Result<StreamVertex<'m>, MeshError>> {
        self.vertices.next()
    }
}

impl<'m> Iterator for TriangleIter<'m> {
    type Item = Result<StreamTriangle<'m>, MeshError>;

    fn next(&mut self) -> Option<Self::Item> {
        let a = match self.next_vertex()? {
            Ok(vertex) => vertex,
            Err(err) => return Some(Err(err)),
        };
        let b = match self.next_vertex()? {
            Ok(vertex) => vertex,
            Err(err) => return Some(Err(err)),
        };
        let c = match self.next_vertex()? {
            Ok(vertex) => vertex,
            Err(err) => return Some(Err(err)),
        };
        Some(Ok([a, b, c]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex_attribute::semantics;

    // Two triangles sharing an edge; interleaved position(3) + uv(2) + weight(1).
    fn quad_mesh(indices: Vec<u16>) -> Mesh {
        let stride = 24;
        let mut values = Vec::new();
        for (i, (x, y)) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].iter().enumerate() {
            values.extend_from_slice(&[*x, *y, 0.0, *x, *y, i as f32 * 10.0]);
        }
        Mesh::new(
            vec![
                VertexAttribute::float(semantics::POSITION, 0, 3, 0, stride),
                VertexAttribute::float(semantics::UV, 2, 2, 12, stride),
                VertexAttribute::float("weight", 4, 1, 20, stride),
            ],
            DataBuffer::from_f32s(&values),
            indices,
        )
    }

    #[test]
    fn test_attribute_stream_visits_every_corner() {
        let mesh = quad_mesh(vec![0, 1, 2, 0, 2, 3]);
        let stream = VertexAttributeStream::new(&mesh, &mesh.vertex_format()[0]).unwrap();
        let items: Vec<_> = stream.iter().collect();
        assert_eq!(items.len(), 6);
        assert_eq!(items[3].index, 0);
        assert_eq!(items[2].value.as_slice(), &[1.0, 1.0, 0.0]);
        assert_eq!(stream.iter().len(), 6);
    }

    #[test]
    fn test_attribute_stream_scalar_values() {
        let mesh = quad_mesh(vec![3, 1, 2]);
        let stream = VertexAttributeStream::new(&mesh, &mesh.vertex_format()[2]).unwrap();
        let values: Vec<_> = stream.iter().map(|a| a.value.as_scalar()).collect();
        assert_eq!(values, vec![Some(30.0), Some(10.0), Some(20.0)]);
    }

    #[test]
    fn test_attribute_stream_is_restartable() {
        let mesh = quad_mesh(vec![0, 1, 2]);
        let stream = VertexAttributeStream::new(&mesh, &mesh.vertex_format()[1]).unwrap();
        let mut first = stream.iter();
        first.next();
        let second: Vec<_> = stream.iter().map(|a| a.index).collect();
        assert_eq!(second, vec![0, 1, 2]);
        assert_eq!(first.next().map(|a| a.index), Some(1));
    }

    #[test]
    fn test_attribute_stream_rejects_out_of_range_index() {
        let mesh = quad_mesh(vec![0, 1, 4]);
        let err = VertexAttributeStream::new(&mesh, &mesh.vertex_format()[0]).unwrap_err();
        assert!(matches!(err, MeshError::Buffer(BufferError::OutOfBounds { .. })));
    }

    #[test]
    fn test_vertex_stream_named_fields() {
        let mesh = quad_mesh(vec![0, 2, 3]);
        let stream = VertexStream::new(&mesh).unwrap();
        let vertices: Vec<_> = stream.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[1].index, 2);
        assert_eq!(
            vertices[1].get(semantics::UV).and_then(|v| v.as_vec2()),
            Some(Vector2f::new(1.0, 1.0))
        );
        assert_eq!(vertices[2].get("weight").and_then(|v| v.as_scalar()), Some(30.0));
        assert!(vertices[0].get(semantics::NORMAL).is_none());
        assert_eq!(
            vertices[0].semantics().collect::<Vec<_>>(),
            vec!["position", "uv", "weight"]
        );
    }

    #[test]
    fn test_vertex_stream_rejects_duplicate_names() {
        let mut mesh = quad_mesh(vec![0, 1, 2]);
        mesh.add_attribute(VertexAttribute::float(semantics::UV, 5, 2, 12, 24));
        assert_eq!(
            VertexStream::new(&mesh).unwrap_err(),
            MeshError::DuplicateAttribute("uv".into())
        );
        // A projection that names the attribute once still works.
        let stream = VertexStream::with_semantics(&mesh, &[semantics::UV]).unwrap();
        assert_eq!(stream.iter().count(), 3);
    }

    #[test]
    fn test_vertex_stream_with_missing_semantics() {
        let mesh = quad_mesh(vec![0, 1, 2]);
        assert_eq!(
            VertexStream::with_semantics(&mesh, &[semantics::POSITION, semantics::NORMAL]).unwrap_err(),
            MeshError::MissingAttribute("normal".into())
        );
    }

    #[test]
    fn test_vertex_iter_reports_mismatch_once() {
        let mesh = quad_mesh(vec![0, 1, 2]);
        let short = [0u16, 1];
        let attribute = &mesh.vertex_format()[0];
        let full = VertexAttributeStream::new(&mesh, attribute).unwrap();
        let mut iter = VertexIter {
            streams: vec![
                ("position", full.iter()),
                (
                    "uv",
                    VertexAttributeIter {
                        indices: &short,
                        data: mesh.vertex_data(),
                        attribute: &mesh.vertex_format()[1],
                        position: 0,
                    },
                ),
            ],
            finished: false,
        };
        assert!(iter.next().unwrap().is_ok());
        assert!(iter.next().unwrap().is_ok());
        assert_eq!(iter.next().unwrap().unwrap_err(), MeshError::AttributeStreamMismatch);
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_triangle_stream_drops_trailing_indices() {
        let mesh = quad_mesh(vec![0, 1, 2, 0, 2, 3, 1, 3]);
        let stream = TriangleStream::new(&mesh).unwrap();
        let triangles: Vec<_> = stream.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(triangles.len(), 2);
        let corner_indices: Vec<_> = triangles[1].iter().map(|v| v.index).collect();
        assert_eq!(corner_indices, vec![0, 2, 3]);
        // Restart yields the same triangles.
        assert_eq!(stream.iter().count(), 2);
    }

    #[test]
    fn test_empty_index_buffer() {
        let mesh = quad_mesh(Vec::new());
        let stream = TriangleStream::new(&mesh).unwrap();
        assert_eq!(stream.iter().count(), 0);
    }
}
