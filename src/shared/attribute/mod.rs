/// The kind of sequential attribute decoder a bitstream asks for.
/// Only [SequentialDecoderType::Generic] stores values without any transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequentialDecoderType {
    Generic,
    Integer,
    Quantization,
    Normals,
}

impl SequentialDecoderType {
    pub fn get_id(self) -> u8 {
        match self {
            Self::Generic => 0,
            Self::Integer => 1,
            Self::Quantization => 2,
            Self::Normals => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Generic),
            1 => Some(Self::Integer),
            2 => Some(Self::Quantization),
            3 => Some(Self::Normals),
            _ => None,
        }
    }
}
