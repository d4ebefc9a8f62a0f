use crate::core::attribute::AttributeId;
use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::core::mesh::metadata::{GeometryMetadata, Metadata};
use crate::utils::bit_coder::leb128_read_u32;

/// Limit on nested sub-metadata, so that hostile input cannot exhaust the stack.
const MAX_NESTING_DEPTH: usize = 32;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Metadata entry has an empty value")]
    EmptyValue,
    #[error("Metadata is nested too deeply")]
    NestingTooDeep,
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("Metadata declares {count} items, but only {remaining} bytes are left")]
    TooManyItems { count: usize, remaining: usize },
}

pub(crate) fn decode_metadata<R>(reader: &mut R) -> Result<GeometryMetadata, Err>
    where R: ByteReader
{
    let num_attribute_metadata = read_count(reader)?;
    let mut attribute_metadata = Vec::with_capacity(num_attribute_metadata);
    for _ in 0..num_attribute_metadata {
        let id = AttributeId::new(leb128_read_u32(reader)?);
        let metadata = decode_metadata_block(reader, 0)?;
        attribute_metadata.push((id, metadata));
    }

    let metadata = decode_metadata_block(reader, 0)?;
    Ok(
        GeometryMetadata {
            metadata,
            attribute_metadata,
        }
    )
}

fn decode_metadata_block<R>(reader: &mut R, depth: usize) -> Result<Metadata, Err>
    where R: ByteReader
{
    if depth > MAX_NESTING_DEPTH {
        return Err(Err::NestingTooDeep);
    }
    let mut metadata = Metadata::new();

    let num_entries = read_count(reader)?;
    for _ in 0..num_entries {
        let key = read_name(reader)?;
        let value_len = leb128_read_u32(reader)? as usize;
        if value_len == 0 {
            return Err(Err::EmptyValue);
        }
        let value = read_bytes(reader, value_len)?;
        metadata.add_entry(key, value);
    }

    let num_sub_metadata = read_count(reader)?;
    for _ in 0..num_sub_metadata {
        let key = read_name(reader)?;
        let sub = decode_metadata_block(reader, depth + 1)?;
        metadata.add_sub_metadata(key, sub);
    }
    Ok(metadata)
}

/// Reads a varint item count. Every item takes at least one byte.
fn read_count<R>(reader: &mut R) -> Result<usize, Err>
    where R: ByteReader
{
    let count = leb128_read_u32(reader)? as usize;
    let remaining = reader.remaining();
    if count > remaining {
        return Err(Err::TooManyItems { count, remaining });
    }
    Ok(count)
}

fn read_name<R>(reader: &mut R) -> Result<Vec<u8>, Err>
    where R: ByteReader
{
    let len = reader.read_u8()? as usize;
    read_bytes(reader, len)
}

fn read_bytes<R>(reader: &mut R, len: usize) -> Result<Vec<u8>, Err>
    where R: ByteReader
{
    if len > reader.remaining() {
        return Err(Err::NotEnoughData(ReaderErr::NotEnoughData));
    }
    let mut out = vec![0u8; len];
    reader.read_into(&mut out)?;
    Ok(out)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_metadata() {
        let data = [
            1, // one attribute metadata
            3, // attribute id
            1, 4, b'n', b'a', b'm', b'e', 2, b'u', b'v', // name = uv
            0, // no sub metadata
            // geometry metadata
            1, 1, b'k', 1, b'v',
            1, 3, b's', b'u', b'b', // sub metadata "sub"
            1, 1, b'x', 1, b'y', 0,
        ];
        let mut reader = data.iter();
        let metadata = decode_metadata(&mut reader).unwrap();
        assert_eq!(reader.remaining(), 0);

        let att = metadata.get_attribute_metadata(AttributeId::new(3)).unwrap();
        assert_eq!(att.get_str("name"), Some("uv"));
        assert_eq!(metadata.geometry().get_str("k"), Some("v"));
        let sub = metadata.geometry().get_sub_metadata(b"sub").unwrap();
        assert_eq!(sub.get_str("x"), Some("y"));
    }

    #[test]
    fn rejects_hostile_counts() {
        // claims 100 attribute metadata blocks in a 3-byte input
        let data = [100u8, 0, 0];
        assert_eq!(
            decode_metadata(&mut data.iter()),
            Err(Err::TooManyItems { count: 100, remaining: 2 })
        );

        let empty_value = [0, 1, 1, b'k', 0, 0];
        assert_eq!(decode_metadata(&mut empty_value.iter()), Err(Err::EmptyValue));
    }

    #[test]
    fn rejects_deep_nesting() {
        let mut data = vec![0]; // no attribute metadata
        for _ in 0..=MAX_NESTING_DEPTH + 1 {
            data.extend_from_slice(&[0, 1, 1, b'a']);
        }
        assert_eq!(decode_metadata(&mut data.iter()), Err(Err::NestingTooDeep));
    }
}
