//! Pixel to normalized device coordinate mapping.
//!
//! Pixel space has its origin at the top-left with +Y down. NDC spans
//! `[-1, 1]` on both axes with +Y up, so the Y axis is flipped.

use glam::DVec2;

/// Maps a pointer position in pixels to NDC.
///
/// `ndc_x = 2*px/width - 1`, `ndc_y = 1 - 2*py/height`.
///
/// Returns `None` for a zero-sized (e.g. minimized) surface.
#[inline]
pub fn pixel_to_ndc(px: f64, py: f64, width: f64, height: f64) -> Option<DVec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    Some(DVec2::new(2.0 * px / width - 1.0, 1.0 - 2.0 * py / height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_corner_maps_to_minus_one_plus_one() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, 700.0, 700.0), Some(DVec2::new(-1.0, 1.0)));
    }

    #[test]
    fn bottom_right_corner_maps_to_plus_one_minus_one() {
        assert_eq!(pixel_to_ndc(700.0, 700.0, 700.0, 700.0), Some(DVec2::new(1.0, -1.0)));
    }

    #[test]
    fn center_maps_to_origin() {
        assert_eq!(pixel_to_ndc(350.0, 200.0, 700.0, 400.0), Some(DVec2::ZERO));
    }

    #[test]
    fn y_axis_is_flipped() {
        let upper = pixel_to_ndc(10.0, 100.0, 700.0, 700.0).unwrap();
        let lower = pixel_to_ndc(10.0, 600.0, 700.0, 700.0).unwrap();
        assert!(upper.y > lower.y);
    }

    #[test]
    fn zero_sized_surface_has_no_mapping() {
        assert_eq!(pixel_to_ndc(1.0, 1.0, 0.0, 700.0), None);
        assert_eq!(pixel_to_ndc(1.0, 1.0, 700.0, 0.0), None);
    }
}
