//! Flattening of decoded geometry into tightly packed buffers.
//!
//! A flattened mesh is its index block followed by one block per attribute, see [`layout::MeshLayout`].
//! [`mesh_buffer_len`] and [`write_mesh`] share the same layout, so the size reported by the former
//! is always the number of bytes written by the latter.

pub mod layout;
pub mod writer;
pub(crate) mod values;

use thiserror::Error;

use crate::core::attribute::{AttributeType, DataType};
use crate::core::mesh::Mesh;
use crate::core::point_cloud::PointCloud;
use crate::core::shared::DataValue;
use layout::{IndexWidth, MeshLayout};
use values::{ComponentArray, WriteComponents};
use writer::SliceWriter;

/// Number of bytes per point in a flattened point cloud: three `f32` coordinates.
pub const POINT_STRIDE: usize = 12;

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Buffer of {available} bytes is too small, {required} bytes are required")]
    BufferTooSmall { required: usize, available: usize },
    #[error("Writing {needed} bytes at {position} exceeds the capacity of {capacity} bytes")]
    CapacityExhausted { position: usize, needed: usize, capacity: usize },
    #[error("Layout size overflows")]
    LayoutTooLarge,
    #[error("Attribute {attribute} has no value for point {point}")]
    MissingValue { attribute: usize, point: usize },
    #[error("The layout has no attribute {0}")]
    NoSuchAttribute(usize),
    #[error("Data type {0:?} cannot be flattened")]
    UnsupportedDataType(DataType),
    #[error("Attributes with {0} components cannot be flattened")]
    UnsupportedDimension(usize),
}

/// The exact number of bytes [`write_mesh`] writes for `mesh`.
///
/// 64-bit integer and boolean attributes are not counted at their stored width: the size fails
/// for them with [`Err::UnsupportedDataType`], the same as the writer.
pub fn mesh_buffer_len(mesh: &Mesh) -> Result<usize, Err> {
    Ok(MeshLayout::from_mesh(mesh)?.byte_len())
}

/// Writes the flattened mesh into `out` and returns the number of bytes written.
///
/// Fails if `out` is shorter than [`mesh_buffer_len`]; in that case nothing past the end of
/// `out` is touched, but the content of `out` is unspecified.
pub fn write_mesh(mesh: &Mesh, out: &mut [u8]) -> Result<usize, Err> {
    let layout = MeshLayout::from_mesh(mesh)?;
    let mut writer = SliceWriter::new(out);

    match layout.index_width() {
        // indices above u16::MAX are truncated; the width only follows the index count.
        IndexWidth::U16 => for face in mesh.get_faces() {
            for &idx in face {
                writer.write(idx as u16)?;
            }
        },
        IndexWidth::U32 => for face in mesh.get_faces() {
            for &idx in face {
                writer.write(idx as u32)?;
            }
        },
    }

    for (attribute, (att, span)) in mesh.get_attributes().iter().zip(layout.attributes()).enumerate() {
        let mut values = ComponentArray::new(span.kind);
        for point in 0..mesh.num_points() {
            if !values.load(att, point) {
                return Err(Err::MissingValue { attribute, point });
            }
            values.write_components(span.dim, &mut writer)?;
        }
    }

    Ok(writer.position())
}

/// Flattens the positions of a point cloud: three native-order `f32` per point.
///
/// Returns an empty buffer if the point cloud has no position attribute or one of its positions
/// cannot be read. Missing components are zero.
pub fn point_cloud_positions(pc: &PointCloud) -> Vec<u8> {
    let Some(position) = pc.named_attribute(AttributeType::Position) else {
        return Vec::new();
    };

    let mut out = vec![0u8; pc.num_points() * POINT_STRIDE];
    for (point, chunk) in out.chunks_exact_mut(POINT_STRIDE).enumerate() {
        let mut xyz = [0.0f32; 3];
        if !position.convert_value(point, &mut xyz) {
            return Vec::new();
        }
        for (c, bytes) in xyz.into_iter().zip(chunk.chunks_exact_mut(4)) {
            c.write_ne(bytes);
        }
    }
    out
}
