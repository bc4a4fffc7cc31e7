//! Validated triangle mesh input.

use crate::F;
use crate::error::{FieldError, Result};

/// Vertex positions plus triangular faces referencing them by 0-based index.
///
/// Every face index is guaranteed to be in bounds once constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<[F; 3]>,
    faces: Vec<[usize; 3]>,
}

impl Mesh {
    /// Build a mesh, rejecting non-finite positions and faces that reference missing vertices.
    pub fn new(vertices: Vec<[F; 3]>, faces: Vec<[usize; 3]>) -> Result<Self> {
        check_vertices(&vertices)?;
        check_faces(vertices.len(), &faces)?;
        Ok(Self { vertices, faces })
    }

    /// Build a mesh from polygon faces of any arity.
    ///
    /// Faces with more than three corners are split into a triangle fan around
    /// their first corner.
    pub fn from_polygons<P: AsRef<[usize]>>(vertices: Vec<[F; 3]>, polygons: &[P]) -> Result<Self> {
        check_vertices(&vertices)?;
        let mut faces = Vec::with_capacity(polygons.len());
        for (fi, poly) in polygons.iter().enumerate() {
            let poly = poly.as_ref();
            if poly.len() < 3 {
                return Err(FieldError::DegenerateFace {
                    face: fi,
                    corners: poly.len(),
                });
            }
            if let Some(&vertex) = poly.iter().find(|&&vi| vi >= vertices.len()) {
                return Err(FieldError::InvalidMesh {
                    face: fi,
                    vertex,
                    vertex_count: vertices.len(),
                });
            }
            faces.extend(poly[1..].windows(2).map(|w| [poly[0], w[0], w[1]]));
        }
        Ok(Self { vertices, faces })
    }

    #[inline]
    pub fn vertices(&self) -> &[[F; 3]] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

/// Check that every vertex coordinate is finite.
pub(crate) fn check_vertices(vertices: &[[F; 3]]) -> Result<()> {
    match vertices.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        Some(vertex) => Err(FieldError::NonFiniteVertex {
            vertex,
            position: vertices[vertex],
        }),
        None => Ok(()),
    }
}

/// Check that every face index is below `vertex_count`.
pub(crate) fn check_faces(vertex_count: usize, faces: &[[usize; 3]]) -> Result<()> {
    for (fi, f) in faces.iter().enumerate() {
        if let Some(&vertex) = f.iter().find(|&&vi| vi >= vertex_count) {
            return Err(FieldError::InvalidMesh {
                face: fi,
                vertex,
                vertex_count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<[F; 3]> {
        vec![[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]]
    }

    #[test]
    fn test_new_rejects_out_of_bounds() {
        let err = Mesh::new(quad_vertices(), vec![[0, 1, 2], [0, 2, 4]]).unwrap_err();
        assert!(matches!(
            err,
            FieldError::InvalidMesh {
                face: 1,
                vertex: 4,
                vertex_count: 4
            }
        ));
    }

    #[test]
    fn test_from_polygons_fans_quads() {
        let mesh = Mesh::from_polygons(quad_vertices(), &[vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(mesh.faces(), &[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.num_vertices(), 4);
    }

    #[test]
    fn test_from_polygons_rejects_degenerate() {
        let err = Mesh::from_polygons(quad_vertices(), &[vec![0, 1]]).unwrap_err();
        assert!(matches!(err, FieldError::DegenerateFace { face: 0, corners: 2 }));
    }

    #[test]
    fn test_rejects_non_finite_positions() {
        let mut vs = quad_vertices();
        vs[2] = [F::NAN, 0., 0.];
        let err = Mesh::new(vs.clone(), vec![[0, 1, 2]]).unwrap_err();
        assert!(matches!(err, FieldError::NonFiniteVertex { vertex: 2, .. }));

        vs[2] = [1., 1., 0.];
        vs[3] = [0., F::INFINITY, 0.];
        let err = Mesh::from_polygons(vs, &[vec![0, 1, 2, 3]]).unwrap_err();
        assert!(matches!(err, FieldError::NonFiniteVertex { vertex: 3, .. }));
    }

    #[test]
    fn test_isolated_vertices_allowed() {
        let mesh = Mesh::new(quad_vertices(), vec![[0, 1, 2]]).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 1);
    }
}
