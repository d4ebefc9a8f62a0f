use thiserror::Error;

use crate::core::attribute::{self, Attribute, AttributeId, AttributeType, DataType};
use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::shared::attribute::SequentialDecoderType;
use crate::utils::bit_coder::leb128_read_u32;

/// Bytes taken by the smallest possible attribute header: four u8 fields and a one-byte varint.
const MIN_ATTRIBUTE_HEADER_SIZE: usize = 5;


#[remain::sorted]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Attribute error: {0}")]
    AttributeError(#[from] attribute::Err),
    #[error("Unknown sequential decoder type id: {0}")]
    InvalidDecoderTypeId(u8),
    #[error("An attribute decoder must have at least one attribute")]
    NoAttributes,
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("{count} attributes cannot fit in the remaining {remaining} bytes")]
    TooManyAttributes { count: usize, remaining: usize },
    #[error("Sequential decoder {0:?} is not supported")]
    UnsupportedDecoder(SequentialDecoderType),
    #[error("{num_points} values of {stride} bytes cannot fit in the remaining {remaining} bytes")]
    ValuesTooLarge { num_points: usize, stride: usize, remaining: usize },
}

/// Attribute description read ahead of the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AttributeHeader {
    att_type: AttributeType,
    data_type: DataType,
    num_components: usize,
    normalized: bool,
    id: AttributeId,
}

impl AttributeHeader {
    fn read_from<R>(reader: &mut R) -> Result<Self, Err>
        where R: ByteReader
    {
        let att_type = AttributeType::read_from(reader)?;
        let data_type = DataType::read_from(reader)?;
        let num_components = reader.read_u8()? as usize;
        if num_components == 0 {
            return Err(Err::AttributeError(attribute::Err::InvalidComponentCount));
        }
        let normalized = reader.read_u8()? != 0;
        let id = AttributeId::new(leb128_read_u32(reader)?);
        Ok(Self { att_type, data_type, num_components, normalized, id })
    }

    fn byte_stride(&self) -> usize {
        self.data_type.size() * self.num_components
    }
}

/// Decodes the attributes of a geometry with `num_points` points.
/// All decoder descriptions come first, then the values of every attribute in the same order.
pub(crate) fn decode_attributes<R>(reader: &mut R, num_points: usize) -> Result<Vec<Attribute>, Err>
    where R: ByteReader
{
    // sequential attribute decoders carry no data of their own
    let num_decoders = reader.read_u8()? as usize;

    let mut headers = Vec::new();
    for _ in 0..num_decoders {
        let num_attributes = leb128_read_u32(reader)? as usize;
        if num_attributes == 0 {
            return Err(Err::NoAttributes);
        }
        let remaining = reader.remaining();
        if num_attributes > remaining / MIN_ATTRIBUTE_HEADER_SIZE {
            return Err(Err::TooManyAttributes { count: num_attributes, remaining });
        }

        let first = headers.len();
        for _ in 0..num_attributes {
            headers.push(AttributeHeader::read_from(reader)?);
        }
        for _ in &headers[first..] {
            let id = reader.read_u8()?;
            match SequentialDecoderType::from_id(id) {
                Some(SequentialDecoderType::Generic) => {},
                Some(ty) => return Err(Err::UnsupportedDecoder(ty)),
                None => return Err(Err::InvalidDecoderTypeId(id)),
            }
        }
    }

    headers.into_iter()
        .map(|header| decode_values(reader, header, num_points))
        .collect()
}

fn decode_values<R>(reader: &mut R, header: AttributeHeader, num_points: usize) -> Result<Attribute, Err>
    where R: ByteReader
{
    let stride = header.byte_stride();
    let remaining = reader.remaining();
    let len = num_points.checked_mul(stride)
        .filter(|&len| len <= remaining)
        .ok_or(Err::ValuesTooLarge { num_points, stride, remaining })?;

    let mut buffer = vec![0u8; len];
    reader.read_into(&mut buffer)?;
    let att = Attribute::from_raw(
        header.id,
        header.att_type,
        header.data_type,
        header.num_components,
        header.normalized,
        buffer,
    )?;
    Ok(att)
}
