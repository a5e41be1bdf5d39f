use glam::Mat4;

/// Render-side collaborator that consumes view transforms
pub trait ViewTarget {
    /// Upload a column-major 4x4 matrix as the active view uniform
    fn set_view_matrix(&mut self, view: Mat4);

    /// Get the fixed projection matrix computed at startup
    fn projection_matrix(&self) -> Mat4;
}
