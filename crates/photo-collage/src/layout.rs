//! Frame layout calculation
//!
//! This module computes the grid of frames for a given photo count. The
//! geometry is fully determined by the count alone: there is no packing
//! search and no aspect-ratio-aware placement.

use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, EDGE_GAP, INNER_GAP, MIN_PHOTOS};
use crate::types::Rect;

/// Compute the frame layout for `photo_count` photos.
///
/// Returns one frame per photo, in slot order. Fewer than three photos have
/// no composable layout and yield an empty vector.
///
/// - 3 to 5 photos: a single row of equal-width, full-height frames.
/// - 6 to 12 photos: two rows sharing one frame width sized for the wider
///   row; with an odd count the bottom row holds the extra photo. Each row
///   is centered independently.
pub fn compute_layout(photo_count: usize) -> Vec<Rect> {
    if photo_count < MIN_PHOTOS {
        return Vec::new();
    }

    if photo_count <= 5 {
        single_row(photo_count)
    } else {
        double_row(photo_count)
    }
}

fn single_row(count: usize) -> Vec<Rect> {
    let columns = count as f32;
    let frame_width = (CANVAS_WIDTH - EDGE_GAP * 2.0 - INNER_GAP * (columns - 1.0)) / columns;
    let frame_height = CANVAS_HEIGHT - EDGE_GAP * 2.0;

    (0..count)
        .map(|i| {
            Rect::new(
                EDGE_GAP + i as f32 * (frame_width + INNER_GAP),
                EDGE_GAP,
                frame_width,
                frame_height,
            )
        })
        .collect()
}

fn double_row(count: usize) -> Vec<Rect> {
    // The bottom row receives the extra photo for odd counts.
    let top_count = count / 2;
    let bottom_count = count - top_count;
    let max_cols = top_count.max(bottom_count) as f32;

    let frame_width = (CANVAS_WIDTH - EDGE_GAP * 2.0 - INNER_GAP * (max_cols - 1.0)) / max_cols;
    let frame_height = (CANVAS_HEIGHT - EDGE_GAP * 2.0 - INNER_GAP) / 2.0;
    let top_y = EDGE_GAP;
    let bottom_y = top_y + frame_height + INNER_GAP;

    let mut frames = Vec::with_capacity(count);
    frames.extend(row(top_count, frame_width, frame_height, top_y));
    frames.extend(row(bottom_count, frame_width, frame_height, bottom_y));
    frames
}

/// Build one horizontally centered row of `count` frames.
fn row(count: usize, frame_width: f32, frame_height: f32, y: f32) -> Vec<Rect> {
    let row_width = count as f32 * frame_width + (count as f32 - 1.0) * INNER_GAP;
    let start_x = (CANVAS_WIDTH - row_width) / 2.0;

    (0..count)
        .map(|i| {
            Rect::new(
                start_x + i as f32 * (frame_width + INNER_GAP),
                y,
                frame_width,
                frame_height,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.01;

    fn overlaps(a: &Rect, b: &Rect) -> bool {
        a.x < b.right() - EPS
            && b.x < a.right() - EPS
            && a.y < b.bottom() - EPS
            && b.y < a.bottom() - EPS
    }

    #[test]
    fn test_below_minimum_is_empty() {
        for n in 0..3 {
            assert!(compute_layout(n).is_empty(), "count {n} should be empty");
        }
    }

    #[test]
    fn test_frame_count_matches_photo_count() {
        for n in 3..=12 {
            assert_eq!(compute_layout(n).len(), n);
        }
    }

    #[test]
    fn test_all_frames_have_positive_size() {
        for n in 3..=12 {
            for frame in compute_layout(n) {
                assert!(frame.width > 0.0);
                assert!(frame.height > 0.0);
            }
        }
    }

    #[test]
    fn test_no_frames_overlap() {
        for n in 3..=12 {
            let frames = compute_layout(n);
            for i in 0..frames.len() {
                for j in (i + 1)..frames.len() {
                    assert!(
                        !overlaps(&frames[i], &frames[j]),
                        "frames {i} and {j} overlap for count {n}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_single_row_equal_width_full_height() {
        for n in 3..=5 {
            let frames = compute_layout(n);
            let expected_height = CANVAS_HEIGHT - 2.0 * EDGE_GAP;
            let first_width = frames[0].width;
            for frame in &frames {
                assert!((frame.width - first_width).abs() < EPS);
                assert!((frame.height - expected_height).abs() < EPS);
                assert!((frame.y - EDGE_GAP).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_rows_end_at_canvas_edge() {
        // The last frame of each row must land at CANVAS_WIDTH - EDGE_GAP for
        // the single-row layouts, which start at the left edge margin.
        for n in 3..=5 {
            let frames = compute_layout(n);
            let last = frames.last().unwrap();
            assert!(
                (last.right() - (CANVAS_WIDTH - EDGE_GAP)).abs() < EPS,
                "count {n}: right edge {} != {}",
                last.right(),
                CANVAS_WIDTH - EDGE_GAP
            );
        }
    }

    #[test]
    fn test_double_row_split() {
        for n in 6..=12 {
            let frames = compute_layout(n);
            let top: Vec<_> = frames.iter().filter(|f| f.y < CANVAS_HEIGHT / 2.0).collect();
            let bottom: Vec<_> = frames.iter().filter(|f| f.y >= CANVAS_HEIGHT / 2.0).collect();

            assert_eq!(top.len(), n / 2);
            assert_eq!(bottom.len(), n - n / 2);

            // Both rows share one width.
            let width = frames[0].width;
            for frame in &frames {
                assert!((frame.width - width).abs() < EPS);
            }

            // The two rows split the height evenly minus one gutter.
            let expected_height = (CANVAS_HEIGHT - 2.0 * EDGE_GAP - INNER_GAP) / 2.0;
            for frame in &frames {
                assert!((frame.height - expected_height).abs() < EPS);
            }
            assert!((bottom[0].y - (EDGE_GAP + expected_height + INNER_GAP)).abs() < EPS);
        }
    }

    #[test]
    fn test_wider_row_spans_edge_to_edge() {
        for n in 6..=12 {
            let frames = compute_layout(n);
            let bottom_count = n - n / 2;
            // The bottom row is always the wider (or equal) row; when it has
            // max_cols frames it spans from EDGE_GAP to CANVAS_WIDTH - EDGE_GAP.
            if bottom_count >= n / 2 {
                let last = frames.last().unwrap();
                let first_bottom = &frames[n / 2];
                let row_width = last.right() - first_bottom.x;
                let expected = bottom_count as f32 * frames[0].width
                    + (bottom_count as f32 - 1.0) * INNER_GAP;
                assert!((row_width - expected).abs() < EPS);
                assert!((last.right() - (CANVAS_WIDTH - EDGE_GAP)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_seven_photos_rows_of_three_and_four() {
        let frames = compute_layout(7);
        let top: Vec<_> = frames.iter().filter(|f| f.y < CANVAS_HEIGHT / 2.0).collect();
        let bottom: Vec<_> = frames.iter().filter(|f| f.y >= CANVAS_HEIGHT / 2.0).collect();

        assert_eq!(top.len(), 3);
        assert_eq!(bottom.len(), 4);

        // Width is sized to fit the four-column row.
        let expected_width = (CANVAS_WIDTH - 2.0 * EDGE_GAP - 3.0 * INNER_GAP) / 4.0;
        assert!((frames[0].width - expected_width).abs() < EPS);

        // The three-frame top row is centered, so it starts right of EDGE_GAP.
        assert!(top[0].x > EDGE_GAP);
    }

    #[test]
    fn test_four_photo_frame_dimensions() {
        let frames = compute_layout(4);
        // (1365 - 20 - 30) / 4 = 328.75
        assert!((frames[0].width - 328.75).abs() < EPS);
        assert!((frames[0].height - 774.0).abs() < EPS);
    }
}
