use std::{slice, vec};

pub trait ByteWriter: Sized {
    fn write_u8(&mut self, value: u8);
    fn write_u16(&mut self, value: u16) {
        self.write_u8(value as u8);
        self.write_u8((value >> 8) as u8);
    }
    fn write_u32(&mut self, value: u32) {
        self.write_u16(value as u16);
        self.write_u16((value >> 16) as u16);
    }
    fn write_u64(&mut self, value: u64) {
        self.write_u32(value as u32);
        self.write_u32((value >> 32) as u32);
    }
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_u8(b);
        }
    }
}

impl ByteWriter for Vec<u8> {
    fn write_u8(&mut self, value: u8) {
        self.push(value);
    }

    fn write_u16(&mut self, value: u16) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_u32(&mut self, value: u32) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_u64(&mut self, value: u64) {
        self.extend_from_slice(&value.to_le_bytes());
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

pub struct FunctionalByteWriter<R> {
    write_fn: R,
}

impl<R: FnMut(u8)> ByteWriter for FunctionalByteWriter<R> {
    fn write_u8(&mut self, value: u8) {
        (self.write_fn)(value);
    }
}

impl<R: FnMut(u8)> FunctionalByteWriter<R> {
    pub fn new(write_fn: R) -> Self {
        FunctionalByteWriter { write_fn }
    }
}


/// Little-endian byte source used by the decoder.
///
/// `remaining` is an upper bound on the number of bytes left in the source. The decoder
/// compares declared element counts against it before allocating, so implementations that
/// cannot tell should return `usize::MAX`.
pub trait ByteReader {
    fn read_u8(&mut self) -> Result<u8, ReaderErr>;
    fn read_u16(&mut self) -> Result<u16, ReaderErr> {
        let out = [
            self.read_u8()?,
            self.read_u8()?
        ];
        Ok(u16::from_le_bytes(out))
    }
    fn read_u32(&mut self) -> Result<u32, ReaderErr> {
        let out = [
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?,
            self.read_u8()?
        ];
        Ok(u32::from_le_bytes(out))
    }
    fn read_u64(&mut self) -> Result<u64, ReaderErr> {
        let lo = self.read_u32()? as u64;
        let hi = self.read_u32()? as u64;
        Ok(lo | (hi << 32))
    }
    fn read_into(&mut self, out: &mut [u8]) -> Result<(), ReaderErr> {
        for b in out.iter_mut() {
            *b = self.read_u8()?;
        }
        Ok(())
    }
    fn remaining(&self) -> usize;
}

impl ByteReader for slice::Iter<'_, u8> {
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        self.next().copied().ok_or(ReaderErr::NotEnoughData)
    }

    fn read_into(&mut self, out: &mut [u8]) -> Result<(), ReaderErr> {
        let data = self.as_slice();
        if data.len() < out.len() {
            return Err(ReaderErr::NotEnoughData);
        }
        out.copy_from_slice(&data[..out.len()]);
        *self = data[out.len()..].iter();
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.len()
    }
}

impl ByteReader for vec::IntoIter<u8> {
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        self.next().ok_or(ReaderErr::NotEnoughData)
    }

    fn remaining(&self) -> usize {
        self.len()
    }
}

pub struct FunctionalByteReader<R> {
    read_fn: R,
}

impl<R: FnMut()->Result<u8, ReaderErr>> ByteReader for FunctionalByteReader<R> {
    fn read_u8(&mut self) -> Result<u8, ReaderErr> {
        (self.read_fn)()
    }

    fn remaining(&self) -> usize {
        usize::MAX
    }
}

impl<R: FnMut() -> Result<u8, ReaderErr>> FunctionalByteReader<R> {
    pub fn new(read_fn: R) -> Self {
        FunctionalByteReader { read_fn }
    }
}


#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderErr {
    #[error("Not enough data to read")]
    NotEnoughData,
    #[error("Varint does not fit the target integer")]
    VarintOverflow,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_writer_slice_reader() {
        let mut buffer = Vec::new();
        buffer.write_u8(0xAB);
        buffer.write_u16(0x1234);
        buffer.write_u32(0xDEADBEEF);
        buffer.write_u64(0x0102030405060708);
        buffer.write_bytes(b"xyz");
        assert_eq!(buffer.len(), 1 + 2 + 4 + 8 + 3);

        let mut reader = buffer.iter();
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64().unwrap(), 0x0102030405060708);
        assert_eq!(reader.remaining(), 3);
        let mut tail = [0u8; 3];
        reader.read_into(&mut tail).unwrap();
        assert_eq!(&tail, b"xyz");
        assert_eq!(reader.read_u8(), Err(ReaderErr::NotEnoughData));
    }

    #[test]
    fn read_into_does_not_consume_on_failure() {
        let data = [1u8, 2];
        let mut reader = data.iter();
        let mut out = [0u8; 3];
        assert_eq!(reader.read_into(&mut out), Err(ReaderErr::NotEnoughData));
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn functional_writer_and_reader() {
        let mut bytes = Vec::new();
        {
            let mut writer = FunctionalByteWriter::new(|b| bytes.push(b));
            writer.write_u32(0x11223344);
        }
        assert_eq!(bytes, vec![0x44, 0x33, 0x22, 0x11]);

        let mut iter = bytes.into_iter();
        let mut reader = FunctionalByteReader::new(|| iter.next().ok_or(ReaderErr::NotEnoughData));
        assert_eq!(reader.read_u32().unwrap(), 0x11223344);
        assert!(reader.read_u8().is_err());
    }
}
