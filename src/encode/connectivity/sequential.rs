use crate::core::bit_coder::ByteWriter;
use crate::core::shared::PointIdx;
use crate::shared::connectivity::sequential::{index_encoding_from_point_count, IndexEncoding, Method};
use crate::utils::bit_coder::leb128_write;
use super::Err;

/// Writes the faces as uncompressed indices, with the narrowest width the point count allows.
pub(crate) fn encode_connectivity<W>(
    faces: &[[PointIdx; 3]],
    num_points: usize,
    writer: &mut W
) -> Result<(), Err>
    where W: ByteWriter,
{
    if u32::try_from(faces.len()).is_err() {
        return Err(Err::TooManyFaces(faces.len()));
    }
    if u32::try_from(num_points).is_err() {
        return Err(Err::TooManyPoints(num_points));
    }
    leb128_write(faces.len() as u64, writer);
    leb128_write(num_points as u64, writer);
    writer.write_u8(Method::DirectIndices.get_id());

    match index_encoding_from_point_count(num_points, true) {
        IndexEncoding::U8 => for face in faces {
            writer.write_u8(face[0] as u8);
            writer.write_u8(face[1] as u8);
            writer.write_u8(face[2] as u8);
        },
        IndexEncoding::U16 => for face in faces {
            writer.write_u16(face[0] as u16);
            writer.write_u16(face[1] as u16);
            writer.write_u16(face[2] as u16);
        },
        IndexEncoding::Varint => for face in faces {
            leb128_write(face[0] as u64, writer);
            leb128_write(face[1] as u64, writer);
            leb128_write(face[2] as u64, writer);
        },
        IndexEncoding::U32 => for face in faces {
            writer.write_u32(face[0] as u32);
            writer.write_u32(face[1] as u32);
            writer.write_u32(face[2] as u32);
        },
    }
    Ok(())
}
