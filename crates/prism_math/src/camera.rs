use glam::{Mat4, Vec3};

/// Look-at camera placement.
///
/// The renderer only consumes the view matrix; this type exists so hosts
/// and tests can build one from an eye point and a target.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Create a new camera with +Y up.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
        }
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Move both eye and target by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.target += offset;
    }
}
