//! Fixed look-at rig used by the pyramid exercise.

use glam::{Mat4, Vec3};

pub const FOV_Y_DEG: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

/// Height of both the eye and the look-at target.
pub const TARGET_HEIGHT: f32 = 0.5;

/// Eye at `(0, 0.5, distance)` looking at `(0, 0.5, 0)`, +Y up.
pub fn view_matrix(distance: f32) -> Mat4 {
    Mat4::look_at_rh(
        Vec3::new(0.0, TARGET_HEIGHT, distance),
        Vec3::new(0.0, TARGET_HEIGHT, 0.0),
        Vec3::Y,
    )
}

/// Right-handed perspective with a `[0, 1]` depth range.
///
/// A zero height (minimized window) falls back to an aspect of 1.
pub fn projection(width: u32, height: u32) -> Mat4 {
    let aspect = if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    };
    Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, Z_NEAR, Z_FAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn target_projects_to_screen_center() {
        let clip = projection(700, 700) * view_matrix(5.0) * Vec3::new(0.0, 0.5, 0.0).extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn farther_camera_shrinks_the_model() {
        let tip = Vec3::new(0.5, 0.5, 0.0).extend(1.0);
        let near = projection(700, 700) * view_matrix(2.0) * tip;
        let far = projection(700, 700) * view_matrix(10.0) * tip;
        assert!(near.x / near.w > far.x / far.w);
    }

    #[test]
    fn zero_height_does_not_produce_nan() {
        let m = projection(700, 0);
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
