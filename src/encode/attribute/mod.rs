use thiserror::Error;

use crate::core::attribute::Attribute;
use crate::core::bit_coder::ByteWriter;
use crate::shared::attribute::SequentialDecoderType;
use crate::utils::bit_coder::leb128_write;

#[remain::sorted]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Attribute {id} has no value for point {point}")]
    MissingValue { id: u32, point: usize },
    #[error("{0} attributes exceed the limit of 255 attribute decoders")]
    TooManyAttributes(usize),
    #[error("{0} components exceed the limit of 255 components per attribute")]
    TooManyComponents(usize),
}

/// Writes every attribute with its own generic sequential decoder.
/// All decoder descriptions are written first, then the values of every attribute for every point.
pub(crate) fn encode_attributes<W>(
    attributes: &[Attribute],
    num_points: usize,
    writer: &mut W,
) -> Result<(), Err>
    where W: ByteWriter,
{
    let num_decoders = u8::try_from(attributes.len())
        .map_err(|_| Err::TooManyAttributes(attributes.len()))?;
    writer.write_u8(num_decoders);

    for att in attributes {
        let num_components = u8::try_from(att.get_num_components())
            .map_err(|_| Err::TooManyComponents(att.get_num_components()))?;
        // one attribute per decoder
        leb128_write(1, writer);
        att.get_attribute_type().write_to(writer);
        att.get_data_type().write_to(writer);
        writer.write_u8(num_components);
        writer.write_u8(att.is_normalized() as u8);
        leb128_write(att.get_id().as_u32() as u64, writer);
        writer.write_u8(SequentialDecoderType::Generic.get_id());
    }

    for att in attributes {
        for point in 0..num_points {
            let bytes = att.mapped_index(point)
                .and_then(|idx| att.get_value_bytes(idx))
                .ok_or(Err::MissingValue { id: att.get_id().as_u32(), point })?;
            writer.write_bytes(bytes);
        }
    }
    Ok(())
}
