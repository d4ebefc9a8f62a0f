use crate::core::bit_coder::{ByteReader, ReaderErr};
use crate::shared::header::{self as shared, EncoderMethod, GeometryType, Version, MAGIC, METADATA_FLAG_MASK};


#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] shared::Err),
    #[error("Not a Draco file")]
    NotADracoFile,
    #[error("Not enough data: {0}")]
    NotEnoughData(#[from] ReaderErr),
    #[error("Unsupported bitstream version {0}")]
    UnsupportedVersion(Version),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub version: Version,
    pub geometry_type: GeometryType,
    pub encoding_method: EncoderMethod,
    pub contains_metadata: bool,
}

pub(crate) fn decode_header<R>(reader: &mut R) -> Result<Header, Err>
where
    R: ByteReader,
{
    // Read the draco string
    let mut magic = [0u8; 5];
    reader.read_into(&mut magic)?;
    if &magic != MAGIC {
        return Err(Err::NotADracoFile)
    };

    // Read the version
    let version = Version::new(reader.read_u8()?, reader.read_u8()?);
    if !version.is_supported() {
        return Err(Err::UnsupportedVersion(version));
    }

    let geometry_type = GeometryType::read_from(reader)?;
    let encoding_method = EncoderMethod::read_from(reader)?;

    let flags = reader.read_u16()?;
    let contains_metadata = flags & METADATA_FLAG_MASK != 0;

    Ok (
        Header {
            version,
            geometry_type,
            encoding_method,
            contains_metadata,
        }
    )
}
