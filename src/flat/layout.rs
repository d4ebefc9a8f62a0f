use serde::Serialize;

use crate::core::attribute::DataType;
use crate::core::mesh::Mesh;
use crate::core::shared::DataValue;
use super::Err;

/// The largest number of components an attribute may have to be flattened.
pub const MAX_COMPONENTS: usize = 4;

/// Index blocks with up to this many indices use 16-bit indices.
pub const MAX_U16_INDEX_COUNT: usize = 65535;

/// The scalar types a flat buffer can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl ElementKind {
    #[inline]
    pub fn size_in_bytes(self) -> usize {
        match self {
            ElementKind::I8 | ElementKind::U8 => 1,
            ElementKind::I16 | ElementKind::U16 => 2,
            ElementKind::I32 | ElementKind::U32 | ElementKind::F32 => 4,
            ElementKind::F64 => 8,
        }
    }
}

impl TryFrom<DataType> for ElementKind {
    type Error = Err;

    fn try_from(data_type: DataType) -> Result<Self, Err> {
        match data_type {
            DataType::I8 => Ok(ElementKind::I8),
            DataType::U8 => Ok(ElementKind::U8),
            DataType::I16 => Ok(ElementKind::I16),
            DataType::U16 => Ok(ElementKind::U16),
            DataType::I32 => Ok(ElementKind::I32),
            DataType::U32 => Ok(ElementKind::U32),
            DataType::F32 => Ok(ElementKind::F32),
            DataType::F64 => Ok(ElementKind::F64),
            DataType::I64 | DataType::U64 | DataType::Bool => Err(Err::UnsupportedDataType(data_type)),
        }
    }
}

/// Width of every index in the index block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexWidth {
    U16,
    U32,
}

impl IndexWidth {
    /// The width depends on the total number of indices only, never on their values.
    #[inline]
    pub fn for_index_count(index_count: usize) -> Self {
        if index_count <= MAX_U16_INDEX_COUNT {
            IndexWidth::U16
        } else {
            IndexWidth::U32
        }
    }

    #[inline]
    pub fn size_in_bytes(self) -> usize {
        match self {
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
        }
    }
}

/// Position of one attribute block inside a flat buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AttributeSpan {
    /// number of components per point
    pub dim: usize,
    pub kind: ElementKind,
    /// byte offset of the block from the start of the buffer
    pub offset: usize,
    /// byte length of the block
    pub len: usize,
}

/// Describes the bytes of a flattened mesh: an index block followed by one block per attribute,
/// all tightly packed in native byte order.
///
/// A layout is either derived from a decoded mesh with [`MeshLayout::from_mesh`], or described
/// ahead of time by a caller that knows what the bitstream holds:
///
/// ```
/// use draco_decoder::flat::layout::{ElementKind, MeshLayout};
///
/// let mut layout = MeshLayout::new(4, 6).unwrap();
/// layout.add_attribute(3, ElementKind::F32).unwrap();
/// assert_eq!(layout.index_length(), 12);
/// assert_eq!(layout.byte_len(), 60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MeshLayout {
    vertex_count: usize,
    index_count: usize,
    index_width: IndexWidth,
    attributes: Vec<AttributeSpan>,
    byte_len: usize,
}

impl MeshLayout {
    /// A layout holding only the index block. Fails if the index block overflows `usize`.
    pub fn new(vertex_count: usize, index_count: usize) -> Result<Self, Err> {
        let index_width = IndexWidth::for_index_count(index_count);
        let byte_len = index_count
            .checked_mul(index_width.size_in_bytes())
            .ok_or(Err::LayoutTooLarge)?;
        Ok(
            Self {
                vertex_count,
                index_count,
                index_width,
                attributes: Vec::new(),
                byte_len,
            }
        )
    }

    /// Appends an attribute block of `dim` components of `kind` per vertex.
    pub fn add_attribute(&mut self, dim: usize, kind: ElementKind) -> Result<&AttributeSpan, Err> {
        if dim == 0 || dim > MAX_COMPONENTS {
            return Err(Err::UnsupportedDimension(dim));
        }
        let offset = self.byte_len;
        let len = self.vertex_count
            .checked_mul(dim * kind.size_in_bytes())
            .ok_or(Err::LayoutTooLarge)?;
        self.byte_len = offset.checked_add(len).ok_or(Err::LayoutTooLarge)?;
        self.attributes.push(AttributeSpan { dim, kind, offset, len });
        Ok(&self.attributes[self.attributes.len() - 1])
    }

    /// The layout of `mesh`, or an error if one of its attributes cannot be flattened.
    pub fn from_mesh(mesh: &Mesh) -> Result<Self, Err> {
        let mut layout = Self::new(mesh.num_points(), mesh.num_indices())?;
        for att in mesh.get_attributes() {
            let kind = ElementKind::try_from(att.get_data_type())?;
            layout.add_attribute(att.get_num_components(), kind)?;
        }
        Ok(layout)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    #[inline]
    pub fn index_width(&self) -> IndexWidth {
        self.index_width
    }

    /// Byte length of the index block, which is also the offset of the first attribute block.
    #[inline]
    pub fn index_length(&self) -> usize {
        // checked in `new`
        self.index_count * self.index_width.size_in_bytes()
    }

    /// Total number of bytes of the flat buffer.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn get_attribute(&self, i: usize) -> Option<&AttributeSpan> {
        self.attributes.get(i)
    }

    pub fn attributes(&self) -> &[AttributeSpan] {
        &self.attributes
    }

    /// Reads the index block back from a flat buffer.
    pub fn read_indices(&self, buf: &[u8]) -> Result<Vec<u32>, Err> {
        let bytes = block(buf, 0, self.index_length())?;
        Ok(match self.index_width {
            IndexWidth::U16 => read_values::<u16>(bytes).into_iter().map(u32::from).collect(),
            IndexWidth::U32 => read_values::<u32>(bytes),
        })
    }

    /// Reads the block of the `i`'th attribute back from a flat buffer.
    pub fn read_attribute(&self, buf: &[u8], i: usize) -> Result<AttributeValues, Err> {
        let span = self.get_attribute(i).ok_or(Err::NoSuchAttribute(i))?;
        let bytes = block(buf, span.offset, span.len)?;
        Ok(match span.kind {
            ElementKind::I8 => AttributeValues::I8(read_values(bytes)),
            ElementKind::U8 => AttributeValues::U8(read_values(bytes)),
            ElementKind::I16 => AttributeValues::I16(read_values(bytes)),
            ElementKind::U16 => AttributeValues::U16(read_values(bytes)),
            ElementKind::I32 => AttributeValues::I32(read_values(bytes)),
            ElementKind::U32 => AttributeValues::U32(read_values(bytes)),
            ElementKind::F32 => AttributeValues::F32(read_values(bytes)),
            ElementKind::F64 => AttributeValues::F64(read_values(bytes)),
        })
    }
}

fn block(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], Err> {
    let required = offset.saturating_add(len);
    buf.get(offset..required)
        .ok_or(Err::BufferTooSmall { required, available: buf.len() })
}

fn read_values<T: DataValue>(bytes: &[u8]) -> Vec<T> {
    bytes.chunks_exact(T::SIZE).map(T::read_ne).collect()
}

/// The values of one attribute block, one scalar per component.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum AttributeValues {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl AttributeValues {
    /// Number of scalars.
    pub fn len(&self) -> usize {
        match self {
            AttributeValues::I8(v) => v.len(),
            AttributeValues::U8(v) => v.len(),
            AttributeValues::I16(v) => v.len(),
            AttributeValues::U16(v) => v.len(),
            AttributeValues::I32(v) => v.len(),
            AttributeValues::U32(v) => v.len(),
            AttributeValues::F32(v) => v.len(),
            AttributeValues::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_mesh_layout() {
        let mut layout = MeshLayout::new(16744, 54663).unwrap();
        layout.add_attribute(3, ElementKind::F32).unwrap();
        layout.add_attribute(2, ElementKind::F32).unwrap();

        assert_eq!(layout.index_width(), IndexWidth::U16);
        assert_eq!(layout.index_length(), 109326);
        let position = layout.get_attribute(0).unwrap();
        assert_eq!((position.offset, position.len), (109326, 200928));
        let uv = layout.get_attribute(1).unwrap();
        assert_eq!((uv.offset, uv.len), (310254, 133952));
        assert_eq!(layout.byte_len(), 310254 + 133952);
        assert!(layout.get_attribute(2).is_none());
    }

    #[test]
    fn index_width_depends_on_the_count() {
        assert_eq!(IndexWidth::for_index_count(0), IndexWidth::U16);
        assert_eq!(IndexWidth::for_index_count(65535), IndexWidth::U16);
        assert_eq!(IndexWidth::for_index_count(65536), IndexWidth::U32);
        assert_eq!(MeshLayout::new(10, 65535).unwrap().index_length(), 131070);
        assert_eq!(MeshLayout::new(10, 65536).unwrap().index_length(), 262144);
    }

    #[test]
    fn rejects_unsupported_attributes() {
        let mut layout = MeshLayout::new(4, 6).unwrap();
        assert_eq!(layout.add_attribute(0, ElementKind::U8), Err(Err::UnsupportedDimension(0)));
        assert_eq!(layout.add_attribute(5, ElementKind::U8), Err(Err::UnsupportedDimension(5)));
        assert_eq!(ElementKind::try_from(DataType::I64), Err(Err::UnsupportedDataType(DataType::I64)));
        assert_eq!(ElementKind::try_from(DataType::Bool), Err(Err::UnsupportedDataType(DataType::Bool)));
        assert_eq!(ElementKind::try_from(DataType::F64), Ok(ElementKind::F64));

        let mut huge = MeshLayout::new(usize::MAX / 2, 0).unwrap();
        assert_eq!(huge.add_attribute(4, ElementKind::F64), Err(Err::LayoutTooLarge));
        assert_eq!(MeshLayout::new(0, usize::MAX), Err(Err::LayoutTooLarge));
        assert_eq!(MeshLayout::new(0, usize::MAX / 4 + 1), Err(Err::LayoutTooLarge));
        assert_eq!(MeshLayout::new(0, usize::MAX / 4).map(|l| l.byte_len()), Ok(usize::MAX / 4 * 4));
    }

    #[test]
    fn element_widths() {
        let widths = [
            (ElementKind::I8, 1), (ElementKind::U8, 1), (ElementKind::I16, 2), (ElementKind::U16, 2),
            (ElementKind::I32, 4), (ElementKind::U32, 4), (ElementKind::F32, 4), (ElementKind::F64, 8),
        ];
        for (kind, width) in widths {
            assert_eq!(kind.size_in_bytes(), width, "width of {:?}", kind);
        }
    }

    #[test]
    fn reads_blocks_back() {
        let mut layout = MeshLayout::new(2, 3).unwrap();
        layout.add_attribute(1, ElementKind::I16).unwrap();
        let mut buf = Vec::new();
        for idx in [0u16, 1, 1] {
            buf.extend_from_slice(&idx.to_ne_bytes());
        }
        for v in [-5i16, 7] {
            buf.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(layout.read_indices(&buf).unwrap(), vec![0, 1, 1]);
        assert_eq!(layout.read_attribute(&buf, 0).unwrap(), AttributeValues::I16(vec![-5, 7]));
        assert_eq!(layout.read_attribute(&buf, 1), Err(Err::NoSuchAttribute(1)));
        assert_eq!(
            layout.read_attribute(&buf[..9], 0),
            Err(Err::BufferTooSmall { required: 10, available: 9 })
        );
    }

    #[test]
    fn serializes_to_json() {
        let mut layout = MeshLayout::new(3, 3).unwrap();
        layout.add_attribute(3, ElementKind::F32).unwrap();
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["index_width"], "u16");
        assert_eq!(json["byte_len"], 6 + 36);
        assert_eq!(json["attributes"][0]["kind"], "f32");
        assert_eq!(json["attributes"][0]["offset"], 6);
    }
}
