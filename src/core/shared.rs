use std::fmt;

use super::attribute::DataType;

/// Index of a point (vertex) of a geometry.
pub type PointIdx = usize;

pub trait ConfigType {
    fn default()-> Self;
}

/// A scalar type that can be stored in an attribute and written to a flat buffer.
pub trait DataValue: Clone + Copy + fmt::Debug + PartialEq + PartialOrd + Default {
    /// the size of the value in bytes.
    const SIZE: usize;
    const IS_FLOAT: bool;

    fn get_dyn() -> DataType;

    fn to_f64(self) -> f64;
    fn from_f64(data: f64) -> Self;

    /// Wide enough to carry every integer data type, including `u64` and `i64`.
    fn to_i128(self) -> i128;
    /// Truncating conversion, the same as an `as` cast.
    fn from_i128(data: i128) -> Self;

    /// the largest value of the type, used to scale normalized values.
    fn max_as_f64() -> f64;

    /// `bytes` must hold exactly `Self::SIZE` bytes.
    fn read_le(bytes: &[u8]) -> Self;
    fn read_ne(bytes: &[u8]) -> Self;
    fn write_le(self, out: &mut [u8]);
    /// `out` must hold exactly `Self::SIZE` bytes.
    fn write_ne(self, out: &mut [u8]);

    /// Converts a value of another scalar type into this one.
    /// Integer values of a `normalized` attribute map onto `[0, 1]` (or `[-1, 1]`) when the target is a float.
    fn convert_from<Src: DataValue>(value: Src, normalized: bool) -> Self {
        if Self::IS_FLOAT {
            if normalized && !Src::IS_FLOAT {
                Self::from_f64(value.to_f64() / Src::max_as_f64())
            } else {
                Self::from_f64(value.to_f64())
            }
        } else if Src::IS_FLOAT {
            Self::from_f64(value.to_f64())
        } else {
            Self::from_i128(value.to_i128())
        }
    }
}

macro_rules! impl_data_value {
    ($is_float:expr; $(($t:ty, $data_type: expr)),*) => {
        $(
            impl DataValue for $t {
                const SIZE: usize = std::mem::size_of::<$t>();
                const IS_FLOAT: bool = $is_float;

                fn get_dyn() -> DataType {
                    $data_type
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(data: f64) -> Self {
                    data as $t
                }

                fn to_i128(self) -> i128 {
                    self as i128
                }

                fn from_i128(data: i128) -> Self {
                    data as $t
                }

                fn max_as_f64() -> f64 {
                    <$t>::MAX as f64
                }

                fn read_le(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }

                fn read_ne(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_ne_bytes(buf)
                }

                fn write_le(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_le_bytes());
                }

                fn write_ne(self, out: &mut [u8]) {
                    out.copy_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_data_value!(false;
    (u8, DataType::U8),
    (u16, DataType::U16),
    (u32, DataType::U32),
    (u64, DataType::U64),
    (i8, DataType::I8),
    (i16, DataType::I16),
    (i32, DataType::I32),
    (i64, DataType::I64)
);

impl_data_value!(true;
    (f32, DataType::F32),
    (f64, DataType::F64)
);
