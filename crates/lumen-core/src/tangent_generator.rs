//! Per-vertex tangent-space basis generation.
//!
//! For every triangle corner the tangent and bitangent are solved from the
//! two edges leaving that corner and the matching UV deltas:
//!
//! ```text
//! inv_det   = 1 / (duv1.x * duv2.y - duv1.y * duv2.x)
//! tangent   = normalize((edge1 * duv2.y - edge2 * duv1.y) * inv_det)
//! bitangent = normalize((edge2 * duv1.x - edge1 * duv2.x) * inv_det)
//! handedness = sign(dot(cross(tangent, bitangent), normal))
//! ```
//!
//! The first triangle that touches a vertex index defines its basis. Only
//! `(tangent, handedness)` is stored; shaders rebuild the bitangent with
//! [`reconstruct_bitangent`].
//!
//! Degenerate UV triangles are not rejected. The determinant is inverted
//! without a guard and the resulting `inf`/`NaN` components are passed on.

use std::collections::HashSet;

use tracing::debug;

use crate::math_utils::sign;
use crate::mesh::Mesh;
use crate::options::TangentOptions;
use crate::status::{MeshError, Status};
use crate::vector_extensions::{Vector2f, Vector3f, Vector4f};
use crate::vertex_attribute::{semantics, VertexAttribute};
use crate::vertex_stream::{StreamVertex, TriangleStream};

/// Components stored per vertex: tangent xyz plus handedness.
pub const TANGENT_COMPONENTS: usize = 4;

/// Byte stride of the appended tangent block.
pub const TANGENT_STRIDE: usize = TANGENT_COMPONENTS * 4;

/// Attributes the generator reads, with their required component counts.
const REQUIRED_ATTRIBUTES: [(&str, usize); 3] = [
    (semantics::POSITION, 3),
    (semantics::UV, 2),
    (semantics::NORMAL, 3),
];

/// Tangent frame computed for one vertex index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentSample {
    pub index: u16,
    pub tangent: Vector3f,
    pub bitangent: Vector3f,
    pub handedness: f32,
}

impl TangentSample {
    /// The four floats written to the vertex buffer.
    pub fn packed(&self) -> [f32; TANGENT_COMPONENTS] {
        Vector4f::from_xyz(self.tangent, self.handedness).to_array()
    }
}

#[derive(Debug, Clone, Copy)]
struct Corner {
    index: u16,
    position: Vector3f,
    uv: Vector2f,
    normal: Vector3f,
}

impl Corner {
    fn from_vertex(vertex: &StreamVertex<'_>) -> Result<Self, MeshError> {
        Ok(Self {
            index: vertex.index,
            position: vector3(vertex, semantics::POSITION)?,
            uv: vertex
                .get(semantics::UV)
                .and_then(|v| v.as_vec2())
                .ok_or_else(|| MeshError::MissingAttribute(semantics::UV.to_string()))?,
            normal: vector3(vertex, semantics::NORMAL)?,
        })
    }
}

fn vector3(vertex: &StreamVertex<'_>, name: &str) -> Result<Vector3f, MeshError> {
    vertex
        .get(name)
        .and_then(|v| v.as_vec3())
        .ok_or_else(|| MeshError::MissingAttribute(name.to_string()))
}

fn check_required_attributes(mesh: &Mesh) -> Status {
    for (name, expected) in REQUIRED_ATTRIBUTES {
        let attribute = mesh
            .named_attribute(name)
            .ok_or_else(|| MeshError::MissingAttribute(name.to_string()))?;
        if attribute.size() != expected {
            return Err(MeshError::ComponentCountMismatch {
                semantics: name.to_string(),
                expected,
                actual: attribute.size(),
            });
        }
    }
    Ok(())
}

fn corner_basis(corners: &[Corner; 3], j: usize) -> TangentSample {
    let corner = &corners[j];
    let next = &corners[(j + 1) % 3];
    let prev = &corners[(j + 2) % 3];

    let edge1 = next.position - corner.position;
    let edge2 = prev.position - corner.position;
    let duv1 = next.uv - corner.uv;
    let duv2 = prev.uv - corner.uv;

    let inv_det = 1.0 / (duv1.x * duv2.y - duv1.y * duv2.x);

    let tangent = ((edge1 * duv2.y - edge2 * duv1.y) * inv_det).normalized();
    let bitangent = ((edge2 * duv1.x - edge1 * duv2.x) * inv_det).normalized();
    let handedness = sign(tangent.cross(bitangent).dot(corner.normal));

    TangentSample {
        index: corner.index,
        tangent,
        bitangent,
        handedness,
    }
}

/// Computes one tangent sample per unique vertex index, in first-seen order.
///
/// The mesh is not modified.
///
/// # Errors
///
/// - `MeshError::MissingAttribute` if `position`, `uv` or `normal` is absent.
/// - `MeshError::ComponentCountMismatch` if they are not 3, 2 and 3 wide.
/// - Any streaming error, e.g. an index that points past the vertex data.
pub fn compute_tangent_samples(mesh: &Mesh) -> Result<Vec<TangentSample>, MeshError> {
    check_required_attributes(mesh)?;

    let names: Vec<&str> = REQUIRED_ATTRIBUTES.iter().map(|(name, _)| *name).collect();
    let triangles = TriangleStream::with_semantics(mesh, &names)?;

    let mut processed = HashSet::new();
    let mut samples = Vec::new();
    for triangle in triangles.iter() {
        let triangle = triangle?;
        let corners = [
            Corner::from_vertex(&triangle[0])?,
            Corner::from_vertex(&triangle[1])?,
            Corner::from_vertex(&triangle[2])?,
        ];
        for j in 0..3 {
            if !processed.insert(corners[j].index) {
                continue;
            }
            samples.push(corner_basis(&corners, j));
        }
    }
    Ok(samples)
}

/// Appends a `tangent` attribute to `mesh`.
///
/// The samples from [`compute_tangent_samples`] are packed as
/// `(T.x, T.y, T.z, handedness)` into a new block after the existing vertex
/// data, with a stride of [`TANGENT_STRIDE`]. The new descriptor points at
/// that block, so it is not interleaved with the original attributes.
///
/// Names are not deduplicated: calling this twice appends two blocks. On
/// error the mesh is left untouched.
pub fn calculate_tangents(mesh: &mut Mesh, options: &TangentOptions) -> Status {
    let samples = compute_tangent_samples(mesh)?;

    let packed: Vec<f32> = samples.iter().flat_map(|s| s.packed()).collect();
    let offset = mesh.append_vertex_data(&packed);
    mesh.add_attribute(VertexAttribute::float(
        semantics::TANGENT,
        options.slot,
        TANGENT_COMPONENTS,
        offset,
        TANGENT_STRIDE,
    ));

    debug!(
        unique_vertices = samples.len(),
        triangles = mesh.num_triangles(),
        offset,
        slot = options.slot,
        "appended tangent attribute"
    );
    Ok(())
}

/// Rebuilds the bitangent from a normal and a packed `(T, handedness)` tangent.
pub fn reconstruct_bitangent(normal: Vector3f, tangent: Vector4f) -> Vector3f {
    normal.cross(tangent.xyz()) * tangent.w
}
