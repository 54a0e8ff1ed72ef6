use glam::{Mat4, Vec3};

use crate::coords::{Vec2, Viewport};

/// Off-center orthographic projection for screen-space drawing.
///
/// Maps logical pixels to clip space with the window's top-left at (-1, +1)
/// and bottom-right at (+1, -1): top/bottom are swapped relative to the
/// conventional ortho so that +Y points down, matching cursor coordinates.
/// Depth range is -1..1 in view space, mapped to wgpu's 0..1 clip range.
///
/// Rebuilt every frame from the current viewport so resizes take effect
/// immediately.
pub fn screen_projection(viewport: Viewport) -> Mat4 {
    Mat4::orthographic_rh(
        0.0,
        viewport.width,
        viewport.height,
        0.0,
        -1.0,
        1.0,
    )
}

/// World matrix for the quad: a pure translation to the cursor position.
pub fn cursor_translation(cursor: Vec2) -> Mat4 {
    Mat4::from_translation(Vec3::new(cursor.x, cursor.y, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn project(m: Mat4, x: f32, y: f32) -> (f32, f32) {
        let clip = m * Vec4::new(x, y, 0.0, 1.0);
        (clip.x, clip.y)
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn origin_maps_to_top_left_clip_corner() {
        let m = screen_projection(Viewport::new(960.0, 540.0));
        let (x, y) = project(m, 0.0, 0.0);
        assert!((x - -1.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn extent_maps_to_bottom_right_clip_corner() {
        for (w, h) in [(960.0, 540.0), (1.0, 1.0), (1920.0, 1080.0)] {
            let m = screen_projection(Viewport::new(w, h));
            let (x, y) = project(m, w, h);
            assert!((x - 1.0).abs() < 1e-6, "{w}x{h}");
            assert!((y - -1.0).abs() < 1e-6, "{w}x{h}");
        }
    }

    #[test]
    fn center_maps_to_clip_origin() {
        let m = screen_projection(Viewport::new(800.0, 600.0));
        let (x, y) = project(m, 400.0, 300.0);
        assert!(x.abs() < 1e-6);
        assert!(y.abs() < 1e-6);
    }

    #[test]
    fn y_axis_points_down() {
        let m = screen_projection(Viewport::new(100.0, 100.0));
        let (_, y_top) = project(m, 0.0, 10.0);
        let (_, y_bottom) = project(m, 0.0, 90.0);
        assert!(y_top > y_bottom);
    }

    // ── world translation ─────────────────────────────────────────────────

    #[test]
    fn translation_moves_origin_to_cursor() {
        let m = cursor_translation(Vec2::new(100.0, 50.0));
        let p = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!((p.x, p.y, p.z), (100.0, 50.0, 0.0));
    }

    #[test]
    fn translation_offsets_every_point() {
        let m = cursor_translation(Vec2::new(-20.0, 35.0));
        let p = m * Vec4::new(200.0, 200.0, 0.0, 1.0);
        assert_eq!((p.x, p.y), (180.0, 235.0));
    }

    #[test]
    fn translation_preserves_directions() {
        // A pure translation must not scale or rotate: direction vectors
        // (w = 0) pass through unchanged.
        let m = cursor_translation(Vec2::new(12.0, -7.0));
        let d = m * Vec4::new(1.0, 2.0, 0.0, 0.0);
        assert_eq!((d.x, d.y, d.z), (1.0, 2.0, 0.0));
    }
}
