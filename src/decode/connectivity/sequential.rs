use crate::core::bit_coder::ByteReader;
use crate::shared::connectivity::sequential::{index_encoding_from_point_count, IndexEncoding, Method};
use crate::shared::header::Version;
use crate::utils::bit_coder::{leb128_read, leb128_read_u32};
use super::{Connectivity, Err};


pub(super) fn decode_mesh_connectivity<R>(reader: &mut R, version: Version) -> Result<Connectivity, Err>
    where R: ByteReader
{
    let (num_faces, num_points) = if version.uses_varints() {
        (leb128_read_u32(reader)? as usize, leb128_read_u32(reader)? as usize)
    } else {
        (reader.read_u32()? as usize, reader.read_u32()? as usize)
    };

    // every index takes at least one byte
    let remaining = reader.remaining();
    if num_faces > remaining / 3 {
        return Err(Err::TooManyFaces { num_faces, remaining });
    }

    let method_id = reader.read_u8()?;
    match Method::from_id(method_id) {
        Some(Method::DirectIndices) => {},
        Some(Method::Compressed) => return Err(Err::CompressedIndices),
        None => return Err(Err::InvalidMethodId(method_id)),
    }

    let encoding = index_encoding_from_point_count(num_points, version.uses_varints());
    let mut faces = Vec::with_capacity(num_faces);
    for face_idx in 0..num_faces {
        let mut face = [0; 3];
        for slot in face.iter_mut() {
            let point = match encoding {
                IndexEncoding::U8 => reader.read_u8()? as u64,
                IndexEncoding::U16 => reader.read_u16()? as u64,
                IndexEncoding::Varint => leb128_read(reader)?,
                IndexEncoding::U32 => reader.read_u32()? as u64,
            };
            if point >= num_points as u64 {
                return Err(Err::IndexOutOfRange { face: face_idx, point, num_points });
            }
            *slot = point as usize;
        }
        faces.push(face);
    }

    Ok(Connectivity { faces, num_points })
}
