//! Composition state and the pointer/wheel interaction controller
//!
//! The board owns the photo sequence, the derived frame layout, and the
//! selection. All mutation goes through the entry points here; each one
//! leaves the board with its invariants intact (frame count matches photo
//! count, every offset clamped, every zoom in range).

use crate::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, MAX_PHOTOS, MIN_PHOTOS, WHEEL_ZOOM_STEP,
};
use crate::layout::compute_layout;
use crate::transform::clamp_offset;
use crate::types::{clamp_zoom, Background, BackgroundColor, CollageError, Photo, Rect, Result};

/// An in-progress drag of one photo.
///
/// `last_x`/`last_y` hold the pointer position of the previous event in
/// canvas coordinates; each move applies the delta since then.
#[derive(Debug, Clone, Copy)]
pub struct DragState {
    pub index: usize,
    pub last_x: f32,
    pub last_y: f32,
}

/// The collage composition: photos, their frames, and the selection.
#[derive(Debug, Clone, Default)]
pub struct CollageBoard {
    photos: Vec<Photo>,
    frames: Vec<Rect>,
    selected: Option<usize>,
    drag: Option<DragState>,
    background: Background,
}

impl CollageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Queries ---

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn frames(&self) -> &[Rect] {
        &self.frames
    }

    /// The currently selected slot, if any.
    pub fn selection(&self) -> Option<usize> {
        self.selected
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Whether enough photos are loaded to draw and export a composite.
    pub fn is_composable(&self) -> bool {
        self.photos.len() >= MIN_PHOTOS
    }

    /// How many more photos fit on the board.
    pub fn remaining_capacity(&self) -> usize {
        MAX_PHOTOS - self.photos.len()
    }

    /// The topmost frame under the point, if any.
    ///
    /// Frames are tested in reverse slot order so the last-added slot wins,
    /// though frames never overlap in this layout.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find(|(_, frame)| frame.contains(x, y))
            .map(|(i, _)| i)
    }

    // --- Photo lifecycle ---

    /// Append a decoded photo and recompute the layout.
    ///
    /// Returns the slot it was placed in. The first photo added to an empty
    /// selection becomes selected.
    pub fn add_photo(&mut self, natural_width: u32, natural_height: u32) -> Result<usize> {
        if self.photos.len() >= MAX_PHOTOS {
            return Err(CollageError::BoardFull(MAX_PHOTOS));
        }

        let slot = self.photos.len();
        self.photos.push(Photo::new(natural_width, natural_height));
        if self.selected.is_none() {
            self.selected = Some(0);
        }
        self.relayout();
        Ok(slot)
    }

    /// Remove every photo and reset selection and drag state.
    pub fn clear(&mut self) {
        self.photos.clear();
        self.frames.clear();
        self.selected = None;
        self.drag = None;
    }

    // --- Background ---

    pub fn set_background_color(&mut self, color: BackgroundColor) {
        self.background.color = color;
    }

    /// Set or clear the background image, given its natural size.
    pub fn set_background_image(&mut self, natural_size: Option<(u32, u32)>) {
        self.background.image = natural_size;
    }

    // --- Zoom ---

    /// Bind a zoom-slider value to the selected photo.
    pub fn set_zoom(&mut self, value: f32) {
        let Some(index) = self.selected else {
            return;
        };
        let frame = self.frames.get(index).copied();
        if let Some(photo) = self.photos.get_mut(index) {
            photo.scale = clamp_zoom(value);
            if let Some(frame) = frame {
                clamp_offset(photo, &frame);
            }
        }
    }

    // --- Pointer events (canvas coordinates) ---

    /// Begin a drag on the frame under the pointer, or clear the selection
    /// on a miss.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.frames.is_empty() {
            return;
        }

        match self.hit_test(x, y) {
            None => {
                self.selected = None;
            }
            Some(index) => {
                self.selected = Some(index);
                self.drag = Some(DragState {
                    index,
                    last_x: x,
                    last_y: y,
                });
            }
        }
    }

    /// Apply a pointer move. Returns true when the board changed.
    ///
    /// Outside a drag this mutates nothing; callers wanting a hover cursor
    /// use [`CollageBoard::hit_test`] directly.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(drag) = &mut self.drag else {
            return false;
        };

        let dx = x - drag.last_x;
        let dy = y - drag.last_y;
        drag.last_x = x;
        drag.last_y = y;

        let index = drag.index;
        let frame = self.frames[index];
        let photo = &mut self.photos[index];
        photo.offset_x += dx;
        photo.offset_y += dy;
        clamp_offset(photo, &frame);
        true
    }

    /// End any drag. The selection is preserved. Also used for pointer-leave.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Apply a wheel tick at the pointer position.
    ///
    /// Selects the frame under the pointer and steps its zoom (scrolling up
    /// zooms in). Returns true when the event was consumed, so the host can
    /// let an unconsumed wheel scroll the page. Independent of any active
    /// drag.
    pub fn wheel(&mut self, x: f32, y: f32, delta_y: f32) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        let Some(index) = self.hit_test(x, y) else {
            return false;
        };

        self.selected = Some(index);
        let step = if delta_y < 0.0 {
            WHEEL_ZOOM_STEP
        } else {
            -WHEEL_ZOOM_STEP
        };

        let frame = self.frames[index];
        let photo = &mut self.photos[index];
        photo.scale = clamp_zoom(photo.scale + step);
        clamp_offset(photo, &frame);
        true
    }

    // --- Layout maintenance ---

    /// Regenerate all frames from the current photo count and reclamp every
    /// photo against its (possibly resized) frame.
    fn relayout(&mut self) {
        self.frames = compute_layout(self.photos.len());
        for (photo, frame) in self.photos.iter_mut().zip(self.frames.iter()) {
            clamp_offset(photo, frame);
        }
    }
}

/// Map a pointer position in display pixels to canvas coordinates.
///
/// The canvas may be shown at a different size than its logical 1365x794
/// buffer; hit testing needs logical coordinates.
pub fn map_display_point(x: f32, y: f32, displayed_width: f32, displayed_height: f32) -> (f32, f32) {
    (
        x * (CANVAS_WIDTH / displayed_width),
        y * (CANVAS_HEIGHT / displayed_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ZOOM, MIN_ZOOM};
    use crate::transform::max_offsets;

    fn board_with(count: usize) -> CollageBoard {
        let mut board = CollageBoard::new();
        for _ in 0..count {
            board.add_photo(800, 600).unwrap();
        }
        board
    }

    fn center_of(rect: &Rect) -> (f32, f32) {
        (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    #[test]
    fn test_add_photo_selects_first() {
        let mut board = CollageBoard::new();
        assert_eq!(board.selection(), None);
        board.add_photo(800, 600).unwrap();
        assert_eq!(board.selection(), Some(0));
        board.add_photo(800, 600).unwrap();
        assert_eq!(board.selection(), Some(0));
    }

    #[test]
    fn test_board_capacity() {
        let mut board = board_with(12);
        assert_eq!(board.remaining_capacity(), 0);
        assert!(matches!(
            board.add_photo(100, 100),
            Err(CollageError::BoardFull(12))
        ));
        assert_eq!(board.photos().len(), 12);
    }

    #[test]
    fn test_frames_track_photo_count() {
        let mut board = CollageBoard::new();
        board.add_photo(800, 600).unwrap();
        board.add_photo(800, 600).unwrap();
        assert!(board.frames().is_empty());
        assert!(!board.is_composable());

        board.add_photo(800, 600).unwrap();
        assert_eq!(board.frames().len(), 3);
        assert!(board.is_composable());
    }

    #[test]
    fn test_pointer_down_selects_and_miss_clears() {
        let mut board = board_with(4);
        let (x, y) = center_of(&board.frames()[2]);
        board.pointer_down(x, y);
        assert_eq!(board.selection(), Some(2));

        // A click in the edge margin misses every frame.
        board.pointer_down(1.0, 1.0);
        assert_eq!(board.selection(), None);
    }

    #[test]
    fn test_drag_moves_and_clamps() {
        let mut board = board_with(4);
        // Zoom in so there is room to pan.
        let (x, y) = center_of(&board.frames()[1]);
        for _ in 0..10 {
            board.wheel(x, y, -1.0);
        }

        board.pointer_down(x, y);
        assert!(board.pointer_move(x + 40.0, y + 15.0));

        let photo = board.photos()[1];
        assert!((photo.offset_x - 40.0).abs() < 0.001);
        assert!((photo.offset_y - 15.0).abs() < 0.001);

        // A huge move is bounded by the clamp.
        board.pointer_move(x + 100_000.0, y);
        let photo = board.photos()[1];
        let (max_x, _) = max_offsets(&photo, &board.frames()[1]);
        assert!((photo.offset_x - max_x).abs() < 0.001);
    }

    #[test]
    fn test_pointer_up_keeps_selection() {
        let mut board = board_with(3);
        let (x, y) = center_of(&board.frames()[1]);
        board.pointer_down(x, y);
        board.pointer_up();
        assert_eq!(board.selection(), Some(1));
        // No further moves are applied once the drag ended.
        assert!(!board.pointer_move(x + 50.0, y));
        assert_eq!(board.photos()[1].offset_x, 0.0);
    }

    #[test]
    fn test_wheel_zoom_steps_and_caps() {
        let mut board = board_with(4);
        let (x, y) = center_of(&board.frames()[2]);

        for _ in 0..5 {
            assert!(board.wheel(x, y, -120.0));
        }
        assert_eq!(board.selection(), Some(2));
        assert!((board.photos()[2].scale - 1.15).abs() < 0.001);

        // Stepping past the limit caps at MAX_ZOOM instead of overshooting.
        board.set_zoom(2.1);
        for _ in 0..5 {
            board.wheel(x, y, -120.0);
        }
        assert!((board.photos()[2].scale - MAX_ZOOM).abs() < 0.001);

        // And scrolling down never goes below MIN_ZOOM.
        for _ in 0..100 {
            board.wheel(x, y, 120.0);
        }
        assert!((board.photos()[2].scale - MIN_ZOOM).abs() < 0.001);
    }

    #[test]
    fn test_wheel_miss_is_unhandled() {
        let mut board = board_with(3);
        assert!(!board.wheel(1.0, 1.0, -120.0));
        // An empty board never consumes wheel events.
        let mut empty = CollageBoard::new();
        assert!(!empty.wheel(100.0, 100.0, -120.0));
    }

    #[test]
    fn test_relayout_reclamps_offsets() {
        let mut board = board_with(5);
        let (x, y) = center_of(&board.frames()[0]);

        // Zoom and pan the first photo out to its bound.
        for _ in 0..40 {
            board.wheel(x, y, -1.0);
        }
        board.pointer_down(x, y);
        board.pointer_move(x + 100_000.0, y);
        let before = board.photos()[0].offset_x;
        assert!(before > 0.0);

        // A sixth photo switches to the two-row layout with much shorter
        // frames; the smaller draw rect shrinks the offset bound and the
        // stored offset must be pulled back inside it.
        board.add_photo(800, 600).unwrap();
        let photo = board.photos()[0];
        let (max_x, _) = max_offsets(&photo, &board.frames()[0]);
        assert!(photo.offset_x <= max_x + 0.001);
        assert!(photo.offset_x < before);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut board = board_with(5);
        board.pointer_down(100.0, 100.0);
        board.clear();
        assert!(board.photos().is_empty());
        assert!(board.frames().is_empty());
        assert_eq!(board.selection(), None);
        assert!(!board.pointer_move(10.0, 10.0));
    }

    #[test]
    fn test_set_zoom_clamps_range() {
        let mut board = board_with(3);
        board.set_zoom(99.0);
        assert_eq!(board.photos()[0].scale, MAX_ZOOM);
        board.set_zoom(0.1);
        assert_eq!(board.photos()[0].scale, MIN_ZOOM);
    }

    #[test]
    fn test_map_display_point_scales_both_axes() {
        // Canvas shown at half size: display coordinates double back up.
        let (x, y) = map_display_point(100.0, 50.0, CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        assert!((x - 200.0).abs() < 0.001);
        assert!((y - 100.0).abs() < 0.001);
    }
}
