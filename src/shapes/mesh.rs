use crate::math::Vector3;

/// Vertex positions and triangle indices carried by a spring-mesh body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// The vertices of the mesh
    positions: Vec<Vector3>,

    /// The triangle indices of the mesh
    indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_positions(&self) -> &[Vector3] {
        &self.positions
    }

    pub fn get_indices(&self) -> &[u32] {
        &self.indices
    }

    /// Replaces the vertex positions with `count` vectors read from `data`.
    ///
    /// `stride` is the distance, in floats, between the first components of
    /// consecutive vectors and must be at least 3. Returns false without
    /// modifying the mesh if `data` is too short.
    pub fn set_positions_strided(&mut self, data: &[f32], stride: usize, count: usize) -> bool {
        if stride < 3 {
            return false;
        }
        if count > 0 && data.len() < (count - 1) * stride + 3 {
            return false;
        }

        self.positions = (0..count)
            .map(|i| {
                let base = i * stride;
                Vector3::new(data[base], data[base + 1], data[base + 2])
            })
            .collect();
        true
    }

    pub fn set_indices(&mut self, indices: &[u32]) {
        self.indices = indices.to_vec();
    }

    /// Returns the center and half-size of the vertices' bounding box,
    /// or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = *self.positions.first()?;
        let (min, max) = self.positions.iter().fold((first, first), |(min, max), p| {
            (
                Vector3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vector3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Some(((min + max) * 0.5, (max - min) * 0.5))
    }
}
