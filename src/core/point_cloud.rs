use super::attribute::{Attribute, AttributeType};
use super::mesh::metadata::GeometryMetadata;

/// A set of points without connectivity, each carrying one value per attribute.
#[derive(Clone, Debug, Default)]
pub struct PointCloud {
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) num_points: usize,
    pub(crate) metadata: Option<GeometryMetadata>,
}

impl PointCloud {
    pub fn get_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn named_attribute(&self, att_type: AttributeType) -> Option<&Attribute> {
        self.attributes.iter().find(|att| att.get_attribute_type() == att_type)
    }

    pub fn get_metadata(&self) -> Option<&GeometryMetadata> {
        self.metadata.as_ref()
    }
}
