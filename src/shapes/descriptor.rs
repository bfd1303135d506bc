use crate::bodies::BodyKind;
use crate::math::{Plane, Vector3};
use crate::shapes::MeshData;

/// What a drawable-object layer needs to know to render a body
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryDescriptor<'a> {
    pub kind: BodyKind,

    /// World-space center of the body
    pub center: Vector3,

    /// Bounding half-size of the body
    pub extent: Vector3,

    /// Sphere radius, for sphere bodies
    pub radius: Option<f32>,

    /// World-space plane, for plane bodies
    pub plane: Option<Plane>,

    /// Vertex and index data, for spring-mesh bodies
    pub mesh: Option<&'a MeshData>,
}
