use thiserror::Error;

use crate::core::attribute::{Attribute, AttributeId, AttributeType};
use crate::core::point_cloud::PointCloud;
use crate::core::shared::{DataValue, PointIdx};
use super::metadata::GeometryMetadata;
use super::Mesh;

/// Assembles a [Mesh] or a [PointCloud] and checks that the parts agree with each other.
pub struct MeshBuilder {
    attributes: Vec<Attribute>,
    faces: Vec<[PointIdx; 3]>,
    num_points: Option<usize>,
    metadata: Option<GeometryMetadata>,
    current_id: u32,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            faces: Vec::new(),
            num_points: None,
            metadata: None,
            current_id: 0,
        }
    }

    /// Adds an attribute with one value per point and returns its unique id.
    pub fn add_attribute<Data, const N: usize>(&mut self, att_type: AttributeType, data: &[[Data; N]]) -> AttributeId
        where Data: DataValue
    {
        let unique_id = AttributeId::new(self.current_id);
        self.attributes.push(Attribute::from_values(unique_id, att_type, data));
        self.current_id += 1;
        unique_id
    }

    /// Adds an already constructed attribute, e.g. one read from a bitstream.
    pub fn add_raw_attribute(&mut self, att: Attribute) {
        self.current_id = self.current_id.max(att.get_id().as_u32().saturating_add(1));
        self.attributes.push(att);
    }

    pub fn set_faces(&mut self, faces: Vec<[PointIdx; 3]>) {
        self.faces = faces;
    }

    /// Sets the number of points explicitly.
    /// Without it, the point count is taken from the attributes.
    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = Some(num_points);
    }

    pub fn set_metadata(&mut self, metadata: GeometryMetadata) {
        self.metadata = Some(metadata);
    }

    pub fn build(self) -> Result<Mesh, Err> {
        let num_points = self.resolve_num_points()?;
        Self::check_faces(&self.faces, num_points)?;

        let Self { attributes, faces, metadata, .. } = self;
        Ok(
            Mesh {
                faces,
                attributes,
                num_points,
                metadata,
            }
        )
    }

    pub fn build_point_cloud(self) -> Result<PointCloud, Err> {
        if !self.faces.is_empty() {
            return Err(Err::FacesInPointCloud(self.faces.len()));
        }
        let num_points = self.resolve_num_points()?;
        let Self { attributes, metadata, .. } = self;
        Ok(
            PointCloud {
                attributes,
                num_points,
                metadata,
            }
        )
    }

    /// Every attribute must provide a value for every point.
    fn resolve_num_points(&self) -> Result<usize, Err> {
        let num_points = match self.num_points {
            Some(n) => n,
            None => self.attributes.first().map_or(0, Attribute::len),
        };
        for att in &self.attributes {
            if att.len() != num_points {
                return Err(Err::AttributeLengthMismatch {
                    id: att.get_id().as_u32(),
                    len: att.len(),
                    num_points,
                });
            }
        }
        Ok(num_points)
    }

    fn check_faces(faces: &[[PointIdx; 3]], num_points: usize) -> Result<(), Err> {
        for (face_idx, face) in faces.iter().enumerate() {
            if let Some(&point) = face.iter().find(|&&p| p >= num_points) {
                return Err(Err::IndexOutOfRange { face: face_idx, point, num_points });
            }
        }
        Ok(())
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Attribute {id} has {len} values, but the geometry has {num_points} points")]
    AttributeLengthMismatch { id: u32, len: usize, num_points: usize },
    #[error("A point cloud cannot have faces, but {0} faces were given")]
    FacesInPointCloud(usize),
    #[error("Face {face} refers to point {point}, but the geometry has {num_points} points")]
    IndexOutOfRange { face: usize, point: usize, num_points: usize },
}
