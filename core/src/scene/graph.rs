use crate::math::{MatrixHelper, Vec3};
use crate::prelude::Rgb;
use ndarray::Array2;

/// Handle to a mesh under the scene root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Flat annulus in the local x-y plane.
    Ring { inner: f32, outer: f32, segments: u32 },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

/// Flat-shaded solid colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub double_sided: bool,
}

impl Material {
    pub fn flat(color: Rgb) -> Self {
        Self {
            color,
            double_sided: false,
        }
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

/// Position plus Euler rotation in radians, composed as `Rx * Ry * Rz`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    pub fn model_matrix(&self) -> Array2<f32> {
        let rotation = MatrixHelper::multiply(
            MatrixHelper::rotation_x(self.rotation.x).view(),
            MatrixHelper::multiply(
                MatrixHelper::rotation_y(self.rotation.y).view(),
                MatrixHelper::rotation_z(self.rotation.z).view(),
            )
            .view(),
        );
        MatrixHelper::multiply(
            MatrixHelper::translation(self.position).view(),
            rotation.view(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
}

/// Flat scene root. Removed slots stay empty so handles remain stable.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<Mesh>>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) -> NodeId {
        self.nodes.push(Some(mesh));
        NodeId(self.nodes.len() - 1)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Mesh> {
        self.nodes.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: NodeId) -> Option<&Mesh> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Mesh> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live meshes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Mesh)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.as_ref().map(|mesh| (NodeId(idx), mesh)))
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(name: &str) -> Mesh {
        Mesh {
            name: name.into(),
            geometry: Geometry::Sphere {
                radius: 3.0,
                width_segments: 16,
                height_segments: 16,
            },
            material: Material::flat(Rgb::from_hex(0x00ffff)),
            transform: Transform::default(),
        }
    }

    #[test]
    fn removal_keeps_other_handles_valid() {
        let mut graph = SceneGraph::new();
        let a = graph.add(sphere("a"));
        let b = graph.add(sphere("b"));
        assert!(graph.remove(a).is_some());
        assert!(graph.get(a).is_none());
        assert_eq!(graph.get(b).map(|m| m.name.as_str()), Some("b"));
        assert_eq!(graph.len(), 1);
        assert!(graph.remove(a).is_none());
    }

    #[test]
    fn model_matrix_applies_rotation_before_translation() {
        let transform = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0),
        };
        let p = MatrixHelper::transform_point(transform.model_matrix().view(), Vec3::UP);
        assert!((p[0] - 10.0).abs() < 1e-4);
        assert!(p[1].abs() < 1e-4);
        assert!((p[2] - 1.0).abs() < 1e-4);
    }
}
