use crate::core::shared::DataValue;
use super::Err;

/// A cursor over a caller-owned byte slice.
/// Every write checks the remaining capacity first and never touches bytes past the end of the slice.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Writes `value` in native byte order.
    #[inline]
    pub fn write<T: DataValue>(&mut self, value: T) -> Result<(), Err> {
        let end = self.pos
            .checked_add(T::SIZE)
            .filter(|&end| end <= self.buf.len())
            .ok_or(Err::CapacityExhausted {
                position: self.pos,
                needed: T::SIZE,
                capacity: self.buf.len(),
            })?;
        value.write_ne(&mut self.buf[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_until_full() {
        let mut buf = [0u8; 7];
        let mut writer = SliceWriter::new(&mut buf);
        writer.write(1.5f32).unwrap();
        writer.write(7u16).unwrap();
        assert_eq!(writer.position(), 6);
        assert_eq!(writer.remaining(), 1);
        assert_eq!(
            writer.write(3u16),
            Err(Err::CapacityExhausted { position: 6, needed: 2, capacity: 7 })
        );
        // a failed write does not move the cursor
        writer.write(9u8).unwrap();
        assert_eq!(writer.position(), 7);

        assert_eq!(&buf[..4], &1.5f32.to_ne_bytes());
        assert_eq!(&buf[4..6], &7u16.to_ne_bytes());
        assert_eq!(buf[6], 9);
    }

    #[test]
    fn empty_slice() {
        let mut buf: [u8; 0] = [];
        let mut writer = SliceWriter::new(&mut buf);
        assert!(writer.write(0i8).is_err());
        assert_eq!(writer.position(), 0);
    }
}
