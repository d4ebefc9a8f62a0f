const TWO_POW_21: usize = 1 << 21;

/// The way uncompressed point indices are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexEncoding {
    U8,
    U16,
    Varint,
    U32,
}

/// Picks the index encoding from the number of points.
/// Varints are only used by bitstreams that support them.
#[inline]
pub(crate) fn index_encoding_from_point_count(num_points: usize, varints: bool) -> IndexEncoding {
    match num_points {
        0..0x100 => IndexEncoding::U8,
        0x100..0x10000 => IndexEncoding::U16,
        0x10000..TWO_POW_21 if varints => IndexEncoding::Varint,
        _ => IndexEncoding::U32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Compressed,
    DirectIndices,
}

impl Method {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Compressed),
            1 => Some(Self::DirectIndices),
            _ => None,
        }
    }

    pub fn get_id(&self) -> u8 {
        match self {
            Self::Compressed => 0,
            Self::DirectIndices => 1,
        }
    }
}
