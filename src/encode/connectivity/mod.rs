pub(crate) mod sequential;

use crate::core::bit_coder::ByteWriter;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("{0} faces do not fit into a bitstream")]
    TooManyFaces(usize),
    #[error("{0} points do not fit into a bitstream")]
    TooManyPoints(usize),
}

/// Writes the geometry part of a point cloud, which is just its point count.
pub(crate) fn encode_point_count<W>(num_points: usize, writer: &mut W) -> Result<(), Err>
    where W: ByteWriter,
{
    let num_points = u32::try_from(num_points).map_err(|_| Err::TooManyPoints(num_points))?;
    writer.write_u32(num_points);
    Ok(())
}
