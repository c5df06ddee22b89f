//! Lumen Core Library
//!
//! Low-level building blocks shared by the Lumen crates: a zero-copy byte
//! cursor for binary containers, the indexed mesh model, lazy attribute,
//! vertex and triangle streams over interleaved vertex data, and per-vertex
//! tangent-space generation.

#![allow(clippy::needless_range_loop)]

pub mod data_buffer;
pub mod data_types;
pub mod decoder_buffer;
pub mod gl_enums;
pub mod math_utils;
pub mod mesh;
pub mod options;
pub mod status;
pub mod tangent_generator;
pub mod vector_extensions;
pub mod vertex_attribute;
pub mod vertex_stream;

pub use data_buffer::DataBuffer;
pub use data_types::ComponentType;
pub use decoder_buffer::{DecoderBuffer, Endianness};
pub use mesh::Mesh;
pub use options::TangentOptions;
pub use status::{BufferError, MeshError, Status};
pub use tangent_generator::{calculate_tangents, compute_tangent_samples, TangentSample};
pub use vector_extensions::{Vector2f, Vector3f, Vector4f};
pub use vertex_attribute::VertexAttribute;
pub use vertex_stream::{
    AttributeValue, StreamTriangle, StreamVertex, StreamVertexAttribute, TriangleStream,
    VertexAttributeStream, VertexStream,
};
