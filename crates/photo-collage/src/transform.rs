//! Photo view transform
//!
//! Computes where a photo is drawn inside its frame: the cover-fit base
//! scale, the user zoom on top of it, and the pan offset bounded so the
//! frame is never left with a visible gap.

use crate::types::{clamp, Photo, Rect};

/// Minimal scale at which the photo fully covers the frame (the larger of
/// the two axis ratios).
pub fn cover_scale(photo: &Photo, frame: &Rect) -> f32 {
    let scale_w = frame.width / photo.natural_width as f32;
    let scale_h = frame.height / photo.natural_height as f32;
    scale_w.max(scale_h)
}

/// The rectangle the photo occupies on the canvas: centered in its frame at
/// cover scale times the user zoom, then shifted by the user offset.
pub fn draw_rect(photo: &Photo, frame: &Rect) -> Rect {
    let total_scale = cover_scale(photo, frame) * photo.scale;
    let draw_width = photo.natural_width as f32 * total_scale;
    let draw_height = photo.natural_height as f32 * total_scale;

    Rect::new(
        frame.x + (frame.width - draw_width) / 2.0 + photo.offset_x,
        frame.y + (frame.height - draw_height) / 2.0 + photo.offset_y,
        draw_width,
        draw_height,
    )
}

/// Largest legal pan offset per axis for the photo's current zoom.
///
/// Zero when the drawn image does not exceed the frame on an axis, which
/// pins the photo centered there.
pub fn max_offsets(photo: &Photo, frame: &Rect) -> (f32, f32) {
    let total_scale = cover_scale(photo, frame) * photo.scale;
    let draw_width = photo.natural_width as f32 * total_scale;
    let draw_height = photo.natural_height as f32 * total_scale;

    (
        ((draw_width - frame.width) / 2.0).max(0.0),
        ((draw_height - frame.height) / 2.0).max(0.0),
    )
}

/// Clamp the photo's offsets so the drawn image always covers the frame.
///
/// Must run after layout recomputation, after any scale change, and after
/// any offset mutation. Idempotent.
pub fn clamp_offset(photo: &mut Photo, frame: &Rect) {
    let (max_x, max_y) = max_offsets(photo, frame);
    photo.offset_x = clamp(photo.offset_x, -max_x, max_x);
    photo.offset_y = clamp(photo.offset_y, -max_y, max_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ZOOM, MIN_ZOOM};
    use crate::layout::compute_layout;

    const EPS: f32 = 0.1;

    fn contains(outer: &Rect, inner: &Rect) -> bool {
        outer.x <= inner.x + EPS
            && outer.y <= inner.y + EPS
            && outer.right() >= inner.right() - EPS
            && outer.bottom() >= inner.bottom() - EPS
    }

    #[test]
    fn test_cover_scale_uses_larger_ratio() {
        let frame = Rect::new(0.0, 0.0, 400.0, 300.0);
        let wide = Photo::new(800, 200);
        let tall = Photo::new(200, 800);

        // Wide photo: height ratio dominates (300/200 = 1.5).
        assert!((cover_scale(&wide, &frame) - 1.5).abs() < 0.001);
        // Tall photo: width ratio dominates (400/200 = 2.0).
        assert!((cover_scale(&tall, &frame) - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_draw_rect_centered_by_default() {
        let frame = Rect::new(100.0, 50.0, 400.0, 300.0);
        let photo = Photo::new(800, 600);
        let rect = draw_rect(&photo, &frame);

        // 4:3 photo in a 4:3 frame at zoom 1 fills it exactly.
        assert!((rect.x - frame.x).abs() < EPS);
        assert!((rect.y - frame.y).abs() < EPS);
        assert!((rect.width - frame.width).abs() < EPS);
        assert!((rect.height - frame.height).abs() < EPS);
    }

    #[test]
    fn test_clamped_draw_rect_always_covers_frame() {
        let frames = compute_layout(4);
        let frame = frames[1];

        for natural in [(800u32, 600u32), (600, 800), (3000, 1000), (500, 500)] {
            let mut scale = MIN_ZOOM;
            while scale <= MAX_ZOOM + 0.001 {
                let mut photo = Photo::new(natural.0, natural.1);
                photo.scale = scale;
                photo.offset_x = 10_000.0;
                photo.offset_y = -10_000.0;
                clamp_offset(&mut photo, &frame);

                let rect = draw_rect(&photo, &frame);
                assert!(
                    contains(&rect, &frame),
                    "gap for natural {natural:?} at zoom {scale}"
                );
                scale += 0.1;
            }
        }
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let frames = compute_layout(5);
        let frame = frames[0];
        let mut photo = Photo::new(1200, 900);
        photo.scale = 1.7;
        photo.offset_x = 5000.0;
        photo.offset_y = 31.0;

        clamp_offset(&mut photo, &frame);
        let once = (photo.offset_x, photo.offset_y);
        clamp_offset(&mut photo, &frame);
        assert_eq!(once, (photo.offset_x, photo.offset_y));
    }

    #[test]
    fn test_degenerate_axis_pins_centered() {
        // Force draw size == frame size: offsets are pinned to zero.
        let frame = Rect::new(0.0, 0.0, 400.0, 300.0);
        let mut photo = Photo::new(400, 300);
        photo.offset_x = 50.0;
        photo.offset_y = -50.0;

        clamp_offset(&mut photo, &frame);
        assert_eq!(photo.offset_x, 0.0);
        assert_eq!(photo.offset_y, 0.0);
    }

    #[test]
    fn test_four_photo_scenario_offset_bound() {
        // Four 800x600 photos: frames are 328.75x774, cover scale 774/600,
        // draw width 800 * 1.29 = 1032, so the offset bound is about 351.6.
        let frames = compute_layout(4);
        let mut photo = Photo::new(800, 600);

        let base = cover_scale(&photo, &frames[0]);
        assert!((base - 774.0 / 600.0).abs() < 0.001);

        let rect = draw_rect(&photo, &frames[0]);
        assert!((rect.width - 1032.0).abs() < EPS);

        photo.offset_x = 1000.0;
        clamp_offset(&mut photo, &frames[0]);
        assert!((photo.offset_x - 351.625).abs() < EPS);
    }
}
