pub mod connectivity;

pub mod attribute;

pub mod header {
    use crate::core::bit_coder::{ByteReader, ByteWriter, ReaderErr};

    pub(crate) const MAGIC: &[u8; 5] = b"DRACO";
    pub(crate) const METADATA_FLAG_MASK: u16 = 0x8000;

    /// The only major version the codec understands.
    pub(crate) const VERSION_MAJOR: u8 = 2;
    /// The newest minor version. Minor versions 0 to 2 are read.
    pub(crate) const VERSION_MINOR: u8 = 2;

    #[remain::sorted]
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Err {
        #[error("Unknown encoder method id: {0}")]
        InvalidEncoderMethodId(u8),
        #[error("Unknown geometry type id: {0}")]
        InvalidGeometryTypeId(u8),
        #[error("Reader error: {0}")]
        ReaderError(#[from] ReaderErr),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum EncoderMethod {
        Edgebreaker,
        Sequential,
    }

    impl EncoderMethod {
        #[inline]
        pub fn read_from<R>(reader: &mut R) -> Result<Self, Err>
            where R: ByteReader
        {
            match reader.read_u8()? {
                0 => Ok(EncoderMethod::Sequential),
                1 => Ok(EncoderMethod::Edgebreaker),
                id => Err(Err::InvalidEncoderMethodId(id)),
            }
        }

        #[inline]
        pub fn write_to<W>(self, writer: &mut W)
            where W: ByteWriter
        {
            match self {
                EncoderMethod::Sequential => writer.write_u8(0),
                EncoderMethod::Edgebreaker => writer.write_u8(1),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum GeometryType {
        PointCloud,
        TriangularMesh,
    }

    impl GeometryType {
        pub fn get_id(self) -> u8 {
            match self {
                GeometryType::PointCloud => 0,
                GeometryType::TriangularMesh => 1,
            }
        }

        pub fn read_from<R>(reader: &mut R) -> Result<Self, Err>
            where R: ByteReader
        {
            match reader.read_u8()? {
                0 => Ok(GeometryType::PointCloud),
                1 => Ok(GeometryType::TriangularMesh),
                id => Err(Err::InvalidGeometryTypeId(id)),
            }
        }
    }

    /// A Draco bitstream version, ordered by (major, minor).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Version {
        pub major: u8,
        pub minor: u8,
    }

    impl Version {
        pub const fn new(major: u8, minor: u8) -> Self {
            Self { major, minor }
        }

        pub const CURRENT: Version = Version::new(VERSION_MAJOR, VERSION_MINOR);

        /// Whether counts and uncompressed indices may be stored as varints.
        pub fn uses_varints(self) -> bool {
            self >= Version::new(2, 2)
        }

        pub fn is_supported(self) -> bool {
            self.major == VERSION_MAJOR && self.minor <= VERSION_MINOR
        }
    }

    impl std::fmt::Display for Version {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}
