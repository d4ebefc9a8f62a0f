mod sequential;

use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::shared::PointIdx;
use crate::shared::header::{EncoderMethod, GeometryType};
use super::header::Header;


#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Compressed sequential indices are not supported")]
    CompressedIndices,
    #[error("Face {face} refers to point {point}, but the mesh has {num_points} points")]
    IndexOutOfRange { face: usize, point: u64, num_points: usize },
    #[error("Unknown connectivity method id: {0}")]
    InvalidMethodId(u8),
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("{num_faces} faces cannot fit in the remaining {remaining} bytes")]
    TooManyFaces { num_faces: usize, remaining: usize },
    #[error("Encoder method {0:?} is not supported")]
    UnsupportedEncoderMethod(EncoderMethod),
}

/// The geometry part of a bitstream: the faces of a mesh, or nothing for a point cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Connectivity {
    pub faces: Vec<[PointIdx; 3]>,
    pub num_points: usize,
}

pub(crate) fn decode_connectivity<R>(reader: &mut R, header: &Header) -> Result<Connectivity, Err>
    where R: ByteReader
{
    if header.encoding_method != EncoderMethod::Sequential {
        return Err(Err::UnsupportedEncoderMethod(header.encoding_method));
    }
    match header.geometry_type {
        GeometryType::TriangularMesh => sequential::decode_mesh_connectivity(reader, header.version),
        GeometryType::PointCloud => {
            let num_points = reader.read_u32()? as usize;
            Ok(Connectivity { faces: Vec::new(), num_points })
        }
    }
}
