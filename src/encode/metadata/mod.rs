use crate::core::bit_coder::ByteWriter;
use crate::core::mesh::metadata::{GeometryMetadata, Metadata};
use crate::utils::bit_coder::leb128_write;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Metadata entries cannot have empty values")]
    EmptyValue,
    #[error("Metadata key of {0} bytes is longer than 255 bytes")]
    KeyTooLong(usize),
}

pub fn encode_metadata<W>(metadata: &GeometryMetadata, writer: &mut W) -> Result<(), Err>
    where W: ByteWriter,
{
    leb128_write(metadata.attribute_metadata().len() as u64, writer);
    for (id, att_metadata) in metadata.attribute_metadata() {
        leb128_write(id.as_u32() as u64, writer);
        encode_metadata_block(att_metadata, writer)?;
    }
    encode_metadata_block(metadata.geometry(), writer)
}

fn encode_metadata_block<W>(metadata: &Metadata, writer: &mut W) -> Result<(), Err>
    where W: ByteWriter,
{
    leb128_write(metadata.num_entries() as u64, writer);
    for (key, value) in metadata.entries() {
        write_name(key, writer)?;
        if value.is_empty() {
            return Err(Err::EmptyValue);
        }
        leb128_write(value.len() as u64, writer);
        writer.write_bytes(value);
    }

    leb128_write(metadata.num_sub_metadata() as u64, writer);
    for (key, sub) in metadata.sub_metadata() {
        write_name(key, writer)?;
        encode_metadata_block(sub, writer)?;
    }
    Ok(())
}

fn write_name<W>(name: &[u8], writer: &mut W) -> Result<(), Err>
    where W: ByteWriter,
{
    let len = u8::try_from(name.len()).map_err(|_| Err::KeyTooLong(name.len()))?;
    writer.write_u8(len);
    writer.write_bytes(name);
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::AttributeId;

    #[test]
    fn writes_entries_and_sub_metadata() {
        let mut geometry = Metadata::new();
        geometry.add_entry("k", "v");
        let mut sub = Metadata::new();
        sub.add_entry("x", "yz");
        geometry.add_sub_metadata("s", sub);
        let mut metadata = GeometryMetadata::new(geometry);
        metadata.add_attribute_metadata(AttributeId::new(2), Metadata::new());

        let mut buf = Vec::new();
        encode_metadata(&metadata, &mut buf).unwrap();
        assert_eq!(buf, vec![
            1, 2, 0, 0, // attribute 2 with an empty block
            1, 1, b'k', 1, b'v',
            1, 1, b's',
            1, 1, b'x', 2, b'y', b'z', 0,
        ]);
    }

    #[test]
    fn rejects_unencodable_metadata() {
        let mut m = Metadata::new();
        m.add_entry(vec![b'a'; 256], "v");
        let mut buf = Vec::new();
        assert_eq!(encode_metadata(&GeometryMetadata::new(m), &mut buf), Err(Err::KeyTooLong(256)));

        let mut m = Metadata::new();
        m.add_entry("k", "");
        let mut buf = Vec::new();
        assert_eq!(encode_metadata(&GeometryMetadata::new(m), &mut buf), Err(Err::EmptyValue));
    }
}
