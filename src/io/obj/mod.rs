// use tobj to load the obj file and convert it to our internal mesh representation
use std::fmt::Debug;
use std::path::Path;

use crate::core::attribute::AttributeType;
use crate::core::mesh::builder::MeshBuilder;
use crate::core::mesh::Mesh;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Failed to load OBJ file: {0}")]
    LoadError(#[from] tobj::LoadError),
    #[error("Mesh Builder Error: {0}")]
    MeshBuilderError(#[from] crate::core::mesh::builder::Err),
    #[error("OBJ file has no geometry")]
    NoModels,
}

/// Loads every model of an OBJ file into one triangle mesh.
/// Normals and texture coordinates are kept only if every model has them.
pub fn load_obj<P: AsRef<Path> + Debug>(path: P) -> Result<Mesh, Err> {
    let op = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj(path, &op)?;
    if models.is_empty() {
        return Err(Err::NoModels);
    }

    let has_normals = models.iter()
        .all(|m| !m.mesh.normals.is_empty() && m.mesh.normals.len() == m.mesh.positions.len());
    let has_tex_coords = models.iter()
        .all(|m| !m.mesh.texcoords.is_empty() && m.mesh.texcoords.len() / 2 == m.mesh.positions.len() / 3);

    let mut pos = Vec::new();
    let mut normals = Vec::new();
    let mut tex_coords = Vec::new();
    let mut faces = Vec::new();
    for model in &models {
        let offset = pos.len();
        let mesh = &model.mesh;
        pos.extend(mesh.positions.chunks_exact(3).map(|x| [x[0], x[1], x[2]]));
        if has_normals {
            normals.extend(mesh.normals.chunks_exact(3).map(|x| [x[0], x[1], x[2]]));
        }
        if has_tex_coords {
            tex_coords.extend(mesh.texcoords.chunks_exact(2).map(|x| [x[0], x[1]]));
        }
        faces.extend(mesh.indices.chunks_exact(3)
            .map(|x| [offset + x[0] as usize, offset + x[1] as usize, offset + x[2] as usize]));
    }

    let mut builder = MeshBuilder::new();
    builder.set_faces(faces);
    builder.add_attribute::<f32, 3>(AttributeType::Position, &pos);
    if has_normals {
        builder.add_attribute::<f32, 3>(AttributeType::Normal, &normals);
    }
    if has_tex_coords {
        builder.add_attribute::<f32, 2>(AttributeType::TextureCoordinate, &tex_coords);
    }

    Ok(builder.build()?)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn position(mesh: &Mesh, point: usize) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        assert!(mesh.named_attribute(AttributeType::Position).unwrap().convert_value(point, &mut out));
        out
    }

    #[test]
    fn tetrahedron() {
        let mesh = load_obj("tests/data/tetrahedron.obj").unwrap();
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_points(), 4);
        assert_eq!(mesh.get_attributes().len(), 1);
        assert_eq!(mesh.get_attributes()[0].get_attribute_type(), AttributeType::Position);
        assert_eq!(mesh.get_attributes()[0].get_num_components(), 3);

        // the first face is the triangle on the z = 0 plane
        let first = mesh.get_faces()[0].map(|p| position(&mesh, p));
        assert_eq!(first, [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn quad_with_normals_is_triangulated() {
        let mesh = load_obj("tests/data/quad.obj").unwrap();
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_points(), 4);
        assert!(mesh.named_attribute(AttributeType::Normal).is_some());
        assert!(mesh.named_attribute(AttributeType::TextureCoordinate).is_some());
    }

    #[test]
    fn models_are_merged() {
        let mesh = load_obj("tests/data/two_triangles.obj").unwrap();
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_points(), 6);
        assert!(mesh.get_faces()[1].iter().all(|&p| p >= 3));
        assert_eq!(position(&mesh, mesh.get_faces()[1][0])[2], 5.0);
        // only one of the models has normals
        assert!(mesh.named_attribute(AttributeType::Normal).is_none());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(load_obj("tests/data/missing.obj"), Err(Err::LoadError(_))));
    }
}
