pub mod builder;
pub mod metadata;

use super::attribute::{Attribute, AttributeType};
use super::point_cloud::PointCloud;
use super::shared::PointIdx;
use metadata::GeometryMetadata;

/// Represents a decoded triangle mesh.
/// It consists of a list of faces, where each face is defined by three point indices,
/// and a list of attributes ([Attribute]) holding one value per point.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub(crate) faces: Vec<[PointIdx; 3]>,
    pub(crate) attributes: Vec<Attribute>,
    pub(crate) num_points: usize,
    pub(crate) metadata: Option<GeometryMetadata>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get_faces(&self) -> &[[PointIdx; 3]] {
        &self.faces
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Total number of point references in the faces.
    #[inline]
    pub fn num_indices(&self) -> usize {
        self.faces.len() * 3
    }

    /// Returns the first attribute of the given type.
    pub fn named_attribute(&self, att_type: AttributeType) -> Option<&Attribute> {
        self.attributes.iter().find(|att| att.get_attribute_type() == att_type)
    }

    pub fn get_metadata(&self) -> Option<&GeometryMetadata> {
        self.metadata.as_ref()
    }

    /// Drops the faces.
    pub fn into_point_cloud(self) -> PointCloud {
        PointCloud {
            attributes: self.attributes,
            num_points: self.num_points,
            metadata: self.metadata,
        }
    }
}
