use crate::core::bit_coder::ByteWriter;
use crate::shared::header::{EncoderMethod, GeometryType, Version, MAGIC, METADATA_FLAG_MASK};

pub(crate) fn encode_header<W>(writer: &mut W, geometry_type: GeometryType, contains_metadata: bool)
where
    W: ByteWriter,
{
    // Write the draco string
    writer.write_bytes(MAGIC);

    // Write the version
    writer.write_u8(Version::CURRENT.major);
    writer.write_u8(Version::CURRENT.minor);

    writer.write_u8(geometry_type.get_id());

    // Only the sequential method is written.
    EncoderMethod::Sequential.write_to(writer);

    if contains_metadata {
        writer.write_u16(METADATA_FLAG_MASK);
    } else {
        writer.write_u16(0);
    }
}
