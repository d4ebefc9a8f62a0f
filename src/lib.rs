// lib.rs

/// Contains the interface between `Mesh` object and 3D geometry files such as obj.
pub mod io;

/// Contains the bitstream definitions shared by the encoder and the decoder.
pub(crate) mod shared;

/// Defines the encoders of the sequential, uncompressed bitstream subset.
pub mod encode;

/// Defines the decoders.
pub mod decode;

/// Contains the shared definitions and native objects.
pub mod core;

/// Turns decoded geometry into flat, tightly packed buffers.
pub mod flat;

/// Byte-in, byte-out entry points.
pub mod api;

pub(crate) mod utils;

pub use api::{decode_mesh, decode_mesh_direct_write, decode_point_cloud, mesh_buffer_len};
pub use crate::core::mesh::Mesh;
pub use crate::core::point_cloud::PointCloud;


/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::attribute::{Attribute, AttributeId, AttributeType, DataType};
    pub use crate::core::mesh::{Mesh, builder::MeshBuilder, metadata::{GeometryMetadata, Metadata}};
    pub use crate::core::point_cloud::PointCloud;
    pub use crate::core::shared::{ConfigType, DataValue};
    pub use crate::core::bit_coder::{
        ByteReader,
        ByteWriter,
        FunctionalByteReader,
        FunctionalByteWriter
    };
    pub use crate::flat::layout::{AttributeValues, ElementKind, IndexWidth, MeshLayout};
    pub use crate::encode::{self, encode_mesh, encode_point_cloud};
    pub use crate::decode;
}
