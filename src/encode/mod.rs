pub(crate) mod header;
pub(crate) mod metadata;
pub(crate) mod connectivity;
pub(crate) mod attribute;

use crate::core::attribute::Attribute;
use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::metadata::GeometryMetadata;
use crate::core::mesh::Mesh;
use crate::core::point_cloud::PointCloud;
use crate::core::shared::ConfigType;
use crate::shared::header::GeometryType;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    /// Write the metadata of the geometry, if it has any.
    pub metadata: bool,
}

impl ConfigType for Config {
    fn default() -> Self {
        Self {
            metadata: true,
        }
    }
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Attribute encoding error: {0}")]
    AttributeError(#[from] attribute::Err),
    #[error("Connectivity encoding error: {0}")]
    ConnectivityError(#[from] connectivity::Err),
    #[error("Metadata encoding error: {0}")]
    MetadataError(#[from] metadata::Err),
}


/// Encodes the mesh with sequential connectivity and uncompressed attribute values.
pub fn encode_mesh<W>(mesh: &Mesh, writer: &mut W, cfg: &Config) -> Result<(), Err>
    where W: ByteWriter
{
    let metadata = mesh.get_metadata().filter(|_| cfg.metadata);
    encode_header_and_metadata(writer, GeometryType::TriangularMesh, metadata)?;

    connectivity::sequential::encode_connectivity(mesh.get_faces(), mesh.num_points(), writer)?;

    encode_attributes(mesh.get_attributes(), mesh.num_points(), writer)
}

/// Encodes the point cloud with uncompressed attribute values.
pub fn encode_point_cloud<W>(pc: &PointCloud, writer: &mut W, cfg: &Config) -> Result<(), Err>
    where W: ByteWriter
{
    let metadata = pc.get_metadata().filter(|_| cfg.metadata);
    encode_header_and_metadata(writer, GeometryType::PointCloud, metadata)?;

    connectivity::encode_point_count(pc.num_points(), writer)?;

    encode_attributes(pc.get_attributes(), pc.num_points(), writer)
}

fn encode_header_and_metadata<W>(
    writer: &mut W,
    geometry_type: GeometryType,
    metadata: Option<&GeometryMetadata>,
) -> Result<(), Err>
    where W: ByteWriter
{
    header::encode_header(writer, geometry_type, metadata.is_some());
    if let Some(metadata) = metadata {
        metadata::encode_metadata(metadata, writer)?;
    }
    Ok(())
}

fn encode_attributes<W>(attributes: &[Attribute], num_points: usize, writer: &mut W) -> Result<(), Err>
    where W: ByteWriter
{
    attribute::encode_attributes(attributes, num_points, writer)?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::AttributeType;
    use crate::core::mesh::builder::MeshBuilder;
    use crate::core::mesh::metadata::Metadata;
    use crate::decode;

    fn quad() -> MeshBuilder {
        let mut builder = MeshBuilder::new();
        builder.add_attribute(AttributeType::Position, &[
            [0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        ]);
        builder.add_attribute(AttributeType::TextureCoordinate, &[[0u16, 0], [1, 0], [1, 1], [0, 1]]);
        builder.set_faces(vec![[0, 1, 2], [0, 2, 3]]);
        builder
    }

    #[test]
    fn encoded_mesh_decodes_to_the_same_mesh() {
        let mesh = quad().build().unwrap();
        let mut buf = Vec::new();
        encode_mesh(&mesh, &mut buf, &Config::default()).unwrap();

        let decoded = decode::decode_mesh(&mut buf.iter(), &decode::Config::default()).unwrap();
        assert_eq!(decoded.get_faces(), mesh.get_faces());
        assert_eq!(decoded.num_points(), mesh.num_points());
        assert_eq!(decoded.get_attributes(), mesh.get_attributes());
    }

    #[test]
    fn metadata_follows_the_config() {
        let mut metadata = Metadata::new();
        metadata.add_entry("name", "quad");
        let mut builder = quad();
        builder.set_metadata(GeometryMetadata::new(metadata));
        let mesh = builder.build().unwrap();

        let mut with = Vec::new();
        encode_mesh(&mesh, &mut with, &Config::default()).unwrap();
        let decoded = decode::decode_mesh(&mut with.iter(), &decode::Config::default()).unwrap();
        assert_eq!(decoded.get_metadata(), mesh.get_metadata());

        let mut without = Vec::new();
        encode_mesh(&mesh, &mut without, &Config { metadata: false }).unwrap();
        assert!(without.len() < with.len());
        let decoded = decode::decode_mesh(&mut without.iter(), &decode::Config::default()).unwrap();
        assert!(decoded.get_metadata().is_none());
    }

    #[test]
    fn point_cloud_bitstream() {
        let mut builder = MeshBuilder::new();
        builder.add_attribute(AttributeType::Position, &[[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let pc = builder.build_point_cloud().unwrap();
        let mut buf = Vec::new();
        encode_point_cloud(&pc, &mut buf, &Config::default()).unwrap();
        assert_eq!(buf[7], GeometryType::PointCloud.get_id());

        let decoded = decode::decode_point_cloud(&mut buf.iter(), &decode::Config::default()).unwrap();
        assert_eq!(decoded.num_points(), 2);
        assert_eq!(decoded.get_attributes(), pc.get_attributes());
    }
}
