use serde::Serialize;

use crate::core::bit_coder::{ByteReader, ByteWriter, ReaderErr};
use crate::core::shared::{DataValue, PointIdx};


#[remain::sorted]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Err {
	#[error("Invalid attribute type id: {0}")]
	InvalidAttributeTypeId(u8),
	#[error("Attribute has no components")]
	InvalidComponentCount,
	#[error("Invalid DataTypeId: {0}")]
	InvalidDataTypeId(u8),
	#[error("Value buffer of {len} bytes is not a multiple of the value size {stride}")]
	MisalignedValues { len: usize, stride: usize },
	#[error("Point {point} maps to value {value}, but the attribute has {num_values} values")]
	PointMapOutOfRange { point: usize, value: usize, num_values: usize },
	#[error("Reader error: {0}")]
	ReaderError(#[from] ReaderErr),
}

/// Represents an attribute of a decoded geometry, e.g. positions, normals, or colors of its points.
/// The struct does not carry the static type of its values: the data type and the number of
/// components are stored dynamically, and the values themselves are kept as little-endian bytes.
/// Typed access goes through [`Attribute::convert_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
	/// unique id of the attribute within its geometry
	id: AttributeId,

	/// attribute type
	att_type: AttributeType,

	/// the scalar type of each component
	data_type: DataType,

	/// the number of components of each value
	num_components: usize,

	/// whether integer values represent fixed point numbers in `[0, 1]` or `[-1, 1]`
	normalized: bool,

	/// tightly packed values in little-endian byte order
	buffer: Vec<u8>,

	/// an optional mapping from point index to the value index in the buffer.
	point_to_value_map: Option<Vec<usize>>,
}

impl Attribute {
	/// Creates an attribute from typed values. The i'th value belongs to the i'th point.
	pub fn from_values<T, const N: usize>(id: AttributeId, att_type: AttributeType, values: &[[T; N]]) -> Self
		where T: DataValue,
	{
		let mut buffer = vec![0u8; values.len() * N * T::SIZE];
		for (chunk, component) in buffer.chunks_exact_mut(T::SIZE).zip(values.iter().flatten()) {
			component.write_le(chunk);
		}
		Self {
			id,
			att_type,
			data_type: T::get_dyn(),
			num_components: N,
			normalized: false,
			buffer,
			point_to_value_map: None,
		}
	}

	/// Creates an attribute from raw little-endian value bytes, as found in a bitstream.
	pub fn from_raw(
		id: AttributeId,
		att_type: AttributeType,
		data_type: DataType,
		num_components: usize,
		normalized: bool,
		buffer: Vec<u8>,
	) -> Result<Self, Err> {
		if num_components == 0 {
			return Err(Err::InvalidComponentCount);
		}
		let stride = data_type.size() * num_components;
		if buffer.len() % stride != 0 {
			return Err(Err::MisalignedValues { len: buffer.len(), stride });
		}
		Ok(Self {
			id,
			att_type,
			data_type,
			num_components,
			normalized,
			buffer,
			point_to_value_map: None,
		})
	}

	/// Sets the mapping from point index to value index. Every entry must refer to a stored value.
	pub fn set_point_map(&mut self, map: Vec<usize>) -> Result<(), Err> {
		let num_values = self.num_unique_values();
		if let Some((point, &value)) = map.iter().enumerate().find(|&(_, &v)| v >= num_values) {
			return Err(Err::PointMapOutOfRange { point, value, num_values });
		}
		self.point_to_value_map = Some(map);
		Ok(())
	}

	pub fn set_normalized(&mut self, normalized: bool) {
		self.normalized = normalized;
	}

	#[inline]
	pub fn get_id(&self) -> AttributeId {
		self.id
	}

	#[inline]
	pub fn get_attribute_type(&self) -> AttributeType {
		self.att_type
	}

	#[inline]
	pub fn get_data_type(&self) -> DataType {
		self.data_type
	}

	#[inline]
	pub fn get_num_components(&self) -> usize {
		self.num_components
	}

	#[inline]
	pub fn is_normalized(&self) -> bool {
		self.normalized
	}

	/// the size of one value in bytes.
	#[inline]
	pub fn byte_stride(&self) -> usize {
		self.data_type.size() * self.num_components
	}

	/// The number of points the attribute provides a value for.
	#[inline(always)]
	pub fn len(&self) -> usize {
		if let Some(map) = &self.point_to_value_map {
			map.len()
		} else {
			self.num_unique_values()
		}
	}

	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	#[inline(always)]
	pub fn num_unique_values(&self) -> usize {
		self.buffer.len() / self.byte_stride()
	}

	/// Returns the value index of the given point, or `None` if the point is out of range.
	#[inline]
	pub fn mapped_index(&self, point: PointIdx) -> Option<usize> {
		match &self.point_to_value_map {
			Some(map) => map.get(point).copied(),
			// otherwise, we use identity mapping
			None => (point < self.num_unique_values()).then_some(point),
		}
	}

	/// the raw little-endian bytes of the value at `val_idx`.
	#[inline]
	pub fn get_value_bytes(&self, val_idx: usize) -> Option<&[u8]> {
		let stride = self.byte_stride();
		self.buffer.get(val_idx * stride..(val_idx + 1) * stride)
	}

	/// Converts the value of `point` into `out`, component by component.
	/// At most `out.len()` components are converted; the remaining slots of `out` are left untouched.
	/// Returns `false` if the point has no value or if the values are not numeric.
	pub fn convert_value<T: DataValue>(&self, point: PointIdx, out: &mut [T]) -> bool {
		let Some(bytes) = self.mapped_index(point).and_then(|idx| self.get_value_bytes(idx)) else {
			return false;
		};
		match self.data_type {
			DataType::I8 => self.convert_components::<i8, T>(bytes, out),
			DataType::U8 => self.convert_components::<u8, T>(bytes, out),
			DataType::I16 => self.convert_components::<i16, T>(bytes, out),
			DataType::U16 => self.convert_components::<u16, T>(bytes, out),
			DataType::I32 => self.convert_components::<i32, T>(bytes, out),
			DataType::U32 => self.convert_components::<u32, T>(bytes, out),
			DataType::I64 => self.convert_components::<i64, T>(bytes, out),
			DataType::U64 => self.convert_components::<u64, T>(bytes, out),
			DataType::F32 => self.convert_components::<f32, T>(bytes, out),
			DataType::F64 => self.convert_components::<f64, T>(bytes, out),
			DataType::Bool => return false,
		}
		true
	}

	fn convert_components<Src: DataValue, T: DataValue>(&self, bytes: &[u8], out: &mut [T]) {
		for (slot, chunk) in out.iter_mut().zip(bytes.chunks_exact(Src::SIZE)) {
			*slot = T::convert_from(Src::read_le(chunk), self.normalized);
		}
	}
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DataType {
	I8,
	U8,
	I16,
	U16,
	I32,
	U32,
	I64,
	U64,
	F32,
	F64,
	Bool,
}

impl DataType {
	/// returns the size of the data type in bytes e.g. 4 for F32
	#[inline]
	pub fn size(self) -> usize {
		match self {
			DataType::I8 | DataType::U8 | DataType::Bool => 1,
			DataType::I16 | DataType::U16 => 2,
			DataType::I32 | DataType::U32 | DataType::F32 => 4,
			DataType::I64 | DataType::U64 | DataType::F64 => 8,
		}
	}

	#[inline]
	pub fn is_float(self) -> bool {
		matches!(self, DataType::F32 | DataType::F64)
	}

	/// returns the id of the data type in the bitstream.
	#[inline]
	pub fn get_id(self) -> u8 {
		match self {
			DataType::I8 => 1,
			DataType::U8 => 2,
			DataType::I16 => 3,
			DataType::U16 => 4,
			DataType::I32 => 5,
			DataType::U32 => 6,
			DataType::I64 => 7,
			DataType::U64 => 8,
			DataType::F32 => 9,
			DataType::F64 => 10,
			DataType::Bool => 11,
		}
	}

	#[inline]
	pub fn from_id(id: u8) -> Result<Self, Err> {
		match id {
			1 => Ok(DataType::I8),
			2 => Ok(DataType::U8),
			3 => Ok(DataType::I16),
			4 => Ok(DataType::U16),
			5 => Ok(DataType::I32),
			6 => Ok(DataType::U32),
			7 => Ok(DataType::I64),
			8 => Ok(DataType::U64),
			9 => Ok(DataType::F32),
			10 => Ok(DataType::F64),
			11 => Ok(DataType::Bool),
			_ => Err(Err::InvalidDataTypeId(id)),
		}
	}

	#[inline]
	pub fn write_to<W: ByteWriter>(self, writer: &mut W) {
		writer.write_u8(self.get_id());
	}

	#[inline]
	pub fn read_from<R: ByteReader>(reader: &mut R) -> Result<Self, Err> {
		let id = reader.read_u8()?;
		Self::from_id(id)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeType {
	Position,
	Normal,
	Color,
	TextureCoordinate,
	Generic,
	Tangent,
	Material,
	Joint,
	Weight,
}

impl AttributeType {
	/// Returns the id of the attribute type.
	#[inline]
	pub fn get_id(&self) -> u8 {
		match self {
			Self::Position => 0,
			Self::Normal => 1,
			Self::Color => 2,
			Self::TextureCoordinate => 3,
			Self::Generic => 4,
			Self::Tangent => 5,
			Self::Material => 6,
			Self::Joint => 7,
			Self::Weight => 8,
		}
	}

	#[inline]
	pub fn from_id(id: u8) -> Result<Self, Err> {
		match id {
			0 => Ok(Self::Position),
			1 => Ok(Self::Normal),
			2 => Ok(Self::Color),
			3 => Ok(Self::TextureCoordinate),
			4 => Ok(Self::Generic),
			5 => Ok(Self::Tangent),
			6 => Ok(Self::Material),
			7 => Ok(Self::Joint),
			8 => Ok(Self::Weight),
			_ => Err(Err::InvalidAttributeTypeId(id)),
		}
	}

	#[inline]
	pub fn write_to<W: ByteWriter>(&self, writer: &mut W) {
		writer.write_u8(self.get_id());
	}

	#[inline]
	pub fn read_from<R: ByteReader>(reader: &mut R) -> Result<Self, Err> {
		let id = reader.read_u8()?;
		Self::from_id(id)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeId(u32);

impl AttributeId {
	pub fn new(id: u32) -> Self {
		Self(id)
	}

	/// Returns the id of the attribute.
	pub fn as_u32(&self) -> u32 {
		self.0
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_attribute() {
		let data = [[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
		let att = Attribute::from_values(AttributeId::new(0), AttributeType::Position, &data);
		assert_eq!(att.len(), data.len());
		assert_eq!(att.get_data_type(), DataType::F32);
		assert_eq!(att.get_num_components(), 3);
		assert_eq!(att.byte_stride(), 12);
		assert_eq!(att.get_attribute_type(), AttributeType::Position);

		let mut out = [0.0f32; 4];
		assert!(att.convert_value(1, &mut out));
		assert_eq!(out, [4.0, 5.0, 6.0, 0.0]);
		assert!(!att.convert_value(3, &mut out), "point 3 does not exist");
	}

	#[test]
	fn convert_value_changes_the_type() {
		let data = [[1u8, 200], [255, 0]];
		let mut att = Attribute::from_values(AttributeId::new(3), AttributeType::Color, &data);
		let mut out = [0i32; 4];
		assert!(att.convert_value(0, &mut out));
		assert_eq!(out, [1, 200, 0, 0]);

		att.set_normalized(true);
		let mut out = [0.0f32; 2];
		assert!(att.convert_value(1, &mut out));
		assert_eq!(out, [1.0, 0.0]);

		// a short output only receives its own number of components
		let mut out = [7u16; 1];
		assert!(att.convert_value(0, &mut out));
		assert_eq!(out, [1]);
	}

	#[test]
	fn point_map_redirects_lookups() {
		let data = [[10i16], [20]];
		let mut att = Attribute::from_values(AttributeId::new(0), AttributeType::Generic, &data);
		att.set_point_map(vec![1, 1, 0]).unwrap();
		assert_eq!(att.len(), 3);
		assert_eq!(att.num_unique_values(), 2);
		let mut out = [0i16; 1];
		assert!(att.convert_value(2, &mut out));
		assert_eq!(out, [10]);

		assert_eq!(
			att.set_point_map(vec![0, 2]),
			Err(Err::PointMapOutOfRange { point: 1, value: 2, num_values: 2 })
		);
	}

	#[test]
	fn raw_attributes_are_validated() {
		assert_eq!(
			Attribute::from_raw(AttributeId::new(0), AttributeType::Generic, DataType::U16, 3, false, vec![0; 7]),
			Err(Err::MisalignedValues { len: 7, stride: 6 })
		);
		assert_eq!(
			Attribute::from_raw(AttributeId::new(0), AttributeType::Generic, DataType::U16, 0, false, vec![]),
			Err(Err::InvalidComponentCount)
		);

		let att = Attribute::from_raw(AttributeId::new(0), AttributeType::Generic, DataType::Bool, 1, false, vec![1, 0]).unwrap();
		let mut out = [0u8; 1];
		assert!(!att.convert_value(0, &mut out), "booleans are not numeric values");
	}

	#[test]
	fn data_type_ids() {
		for id in 1..=11u8 {
			let ty = DataType::from_id(id).unwrap();
			assert_eq!(ty.get_id(), id);
		}
		assert_eq!(DataType::from_id(0), Err(Err::InvalidDataTypeId(0)));
		assert_eq!(DataType::from_id(12), Err(Err::InvalidDataTypeId(12)));
		assert_eq!(DataType::F64.size(), 8);
		assert_eq!(DataType::Bool.size(), 1);
		assert!(DataType::F32.is_float());

		let mut buf = Vec::new();
		AttributeType::TextureCoordinate.write_to(&mut buf);
		DataType::U32.write_to(&mut buf);
		let mut reader = buf.iter();
		assert_eq!(AttributeType::read_from(&mut reader).unwrap(), AttributeType::TextureCoordinate);
		assert_eq!(DataType::read_from(&mut reader).unwrap(), DataType::U32);
		assert_eq!(AttributeType::from_id(9), Err(Err::InvalidAttributeTypeId(9)));
	}
}
