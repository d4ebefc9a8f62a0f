use crate::core::bit_coder::{ByteReader, ByteWriter, ReaderErr};

pub(crate) fn leb128_read<W>(reader: &mut W) -> Result<u64, ReaderErr>
    where W: ByteReader,
{
    let mut result: u64 = 0;
    let mut shift = 0;
    loop {
        let byte = reader.read_u8()?;
        if shift >= 64 {
            return Err(ReaderErr::VarintOverflow);
        }
        result |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
    }
    Ok(result)
}

/// Reads a varint that must fit into 32 bits, as Draco does for all of its counts.
pub(crate) fn leb128_read_u32<W>(reader: &mut W) -> Result<u32, ReaderErr>
    where W: ByteReader,
{
    u32::try_from(leb128_read(reader)?).map_err(|_| ReaderErr::VarintOverflow)
}

pub(crate) fn leb128_write<W>(mut value: u64, writer: &mut W) 
    where W: ByteWriter,
{
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            writer.write_u8(byte);
            break;
        } else {
            writer.write_u8(byte | 0x80);
        }
    }
}
