mod header;
mod metadata;
mod connectivity;
mod attribute;

use crate::core::bit_coder::ByteReader;
use crate::core::mesh::builder::{self, MeshBuilder};
use crate::core::mesh::Mesh;
use crate::core::point_cloud::PointCloud;
use crate::core::shared::ConfigType;
use crate::shared::header::GeometryType;

/// Decodes a triangle mesh. Point cloud bitstreams are rejected.
pub fn decode_mesh<R>(reader: &mut R, cfg: &Config) -> Result<Mesh, Err>
    where R: ByteReader
{
    let (geometry_type, builder) = decode_geometry(reader, cfg)?;
    if geometry_type != GeometryType::TriangularMesh {
        return Err(Err::NotAMesh);
    }
    Ok(builder.build()?)
}

/// Decodes a point cloud. A mesh bitstream is accepted as well; its faces are dropped.
pub fn decode_point_cloud<R>(reader: &mut R, cfg: &Config) -> Result<PointCloud, Err>
    where R: ByteReader
{
    let (_, builder) = decode_geometry(reader, cfg)?;
    Ok(builder.build()?.into_point_cloud())
}

fn decode_geometry<R>(reader: &mut R, cfg: &Config) -> Result<(GeometryType, MeshBuilder), Err>
    where R: ByteReader
{
    let header = header::decode_header(reader)?;

    let metadata = if header.contains_metadata {
        Some(metadata::decode_metadata(reader)?)
    } else {
        None
    };

    let connectivity = connectivity::decode_connectivity(reader, &header)?;
    let attributes = attribute::decode_attributes(reader, connectivity.num_points)?;

    let mut builder = MeshBuilder::new();
    builder.set_num_points(connectivity.num_points);
    builder.set_faces(connectivity.faces);
    for att in attributes {
        builder.add_raw_attribute(att);
    }
    if let Some(metadata) = metadata.filter(|_| cfg.metadata) {
        builder.set_metadata(metadata);
    }
    Ok((header.geometry_type, builder))
}


#[derive(Debug, Clone)]
pub struct Config {
    /// Keep the decoded metadata on the geometry.
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
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Attribute decoding error: {0}")]
    AttributeError(#[from] attribute::Err),
    #[error("Invalid geometry: {0}")]
    BuildError(#[from] builder::Err),
    #[error("Connectivity decoding error: {0}")]
    ConnectivityError(#[from] connectivity::Err),
    #[error("Header decoding error: {0}")]
    HeaderError(#[from] header::Err),
    #[error("Metadata decoding error: {0}")]
    MetadataError(#[from] metadata::Err),
    #[error("The bitstream holds a point cloud, not a mesh")]
    NotAMesh,
}
