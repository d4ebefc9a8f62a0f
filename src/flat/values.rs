use crate::core::attribute::Attribute;
use crate::core::shared::{DataValue, PointIdx};
use super::layout::{ElementKind, MAX_COMPONENTS};
use super::writer::SliceWriter;
use super::Err;

#[enum_dispatch::enum_dispatch]
pub(crate) trait WriteComponents {
    /// Writes the first `dim` components.
    fn write_components(&self, dim: usize, writer: &mut SliceWriter<'_>) -> Result<(), Err>;
}

/// Scratch space for the value of one point.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub(crate) struct Components<T>([T; MAX_COMPONENTS]);

impl<T: DataValue> WriteComponents for Components<T> {
    #[inline]
    fn write_components(&self, dim: usize, writer: &mut SliceWriter<'_>) -> Result<(), Err> {
        for &c in &self.0[..dim] {
            writer.write(c)?;
        }
        Ok(())
    }
}

#[enum_dispatch::enum_dispatch(WriteComponents)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ComponentArray {
    I8(Components<i8>),
    U8(Components<u8>),
    I16(Components<i16>),
    U16(Components<u16>),
    I32(Components<i32>),
    U32(Components<u32>),
    F32(Components<f32>),
    F64(Components<f64>),
}

impl ComponentArray {
    pub fn new(kind: ElementKind) -> Self {
        match kind {
            ElementKind::I8 => Components::<i8>::default().into(),
            ElementKind::U8 => Components::<u8>::default().into(),
            ElementKind::I16 => Components::<i16>::default().into(),
            ElementKind::U16 => Components::<u16>::default().into(),
            ElementKind::I32 => Components::<i32>::default().into(),
            ElementKind::U32 => Components::<u32>::default().into(),
            ElementKind::F32 => Components::<f32>::default().into(),
            ElementKind::F64 => Components::<f64>::default().into(),
        }
    }

    /// Converts the value of `point` into the scratch space.
    /// Returns `false` if the attribute has no numeric value for the point.
    pub fn load(&mut self, att: &Attribute, point: PointIdx) -> bool {
        match self {
            ComponentArray::I8(c) => att.convert_value(point, &mut c.0),
            ComponentArray::U8(c) => att.convert_value(point, &mut c.0),
            ComponentArray::I16(c) => att.convert_value(point, &mut c.0),
            ComponentArray::U16(c) => att.convert_value(point, &mut c.0),
            ComponentArray::I32(c) => att.convert_value(point, &mut c.0),
            ComponentArray::U32(c) => att.convert_value(point, &mut c.0),
            ComponentArray::F32(c) => att.convert_value(point, &mut c.0),
            ComponentArray::F64(c) => att.convert_value(point, &mut c.0),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attribute::{AttributeId, AttributeType};

    #[test]
    fn load_and_write() {
        let att = Attribute::from_values(AttributeId::new(0), AttributeType::Normal, &[[1i8, -1, 0], [0, 0, 127]]);
        let mut values = ComponentArray::new(ElementKind::I8);
        assert!(values.load(&att, 1));
        assert_eq!(values, ComponentArray::I8(Components([0, 0, 127, 0])));

        let mut buf = [0u8; 3];
        let mut writer = SliceWriter::new(&mut buf);
        values.write_components(3, &mut writer).unwrap();
        assert_eq!(writer.position(), 3);
        assert_eq!(buf, [0, 0, 127]);
    }

    #[test]
    fn each_kind_writes_its_own_width() {
        let att = Attribute::from_values(AttributeId::new(0), AttributeType::Generic, &[[2u8, 3]]);
        let kinds = [
            ElementKind::I8, ElementKind::U8, ElementKind::I16, ElementKind::U16,
            ElementKind::I32, ElementKind::U32, ElementKind::F32, ElementKind::F64,
        ];
        for kind in kinds {
            let mut values = ComponentArray::new(kind);
            assert!(values.load(&att, 0));
            let mut buf = [0u8; 16];
            let mut writer = SliceWriter::new(&mut buf);
            values.write_components(2, &mut writer).unwrap();
            assert_eq!(writer.position(), 2 * kind.size_in_bytes(), "kind {:?}", kind);
        }
    }

    #[test]
    fn missing_point() {
        let att = Attribute::from_values(AttributeId::new(0), AttributeType::Generic, &[[2u8]]);
        let mut values = ComponentArray::new(ElementKind::U32);
        assert!(!values.load(&att, 1));
    }
}
