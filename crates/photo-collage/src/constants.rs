//! Shared constants for the collage compositor
//!
//! This module centralizes the magic numbers of the composition surface
//! and the interaction limits.

// =============================================================================
// Canvas Geometry
// =============================================================================

/// Logical canvas width in pixels
pub const CANVAS_WIDTH: f32 = 1365.0;

/// Logical canvas height in pixels
pub const CANVAS_HEIGHT: f32 = 794.0;

/// Margin between the outermost frames and the canvas edge (pixels)
pub const EDGE_GAP: f32 = 10.0;

/// Gutter between adjacent frames (pixels)
pub const INNER_GAP: f32 = 10.0;

// =============================================================================
// Photo Limits
// =============================================================================

/// Minimum number of photos for a composable layout
pub const MIN_PHOTOS: usize = 3;

/// Maximum number of photos on the board
pub const MAX_PHOTOS: usize = 12;

// =============================================================================
// Zoom
// =============================================================================

/// Lower bound of the per-photo user zoom factor
pub const MIN_ZOOM: f32 = 1.0;

/// Upper bound of the per-photo user zoom factor
pub const MAX_ZOOM: f32 = 2.2;

/// Zoom change applied per wheel tick
pub const WHEEL_ZOOM_STEP: f32 = 0.03;

// =============================================================================
// Background
// =============================================================================

/// Blur radius for the background image (pixels)
pub const BACKGROUND_BLUR_RADIUS: f32 = 18.0;

/// Bleed around the canvas when drawing a blurred background, so the blur
/// never samples past the image edge into visible area (pixels)
pub const BACKGROUND_BLEED: f32 = 28.0;

// =============================================================================
// Export
// =============================================================================

/// JPEG quality for exported composites (0-100)
pub const EXPORT_JPEG_QUALITY: u8 = 92;

/// Default file stem suggested for exports
pub const DEFAULT_EXPORT_STEM: &str = "composition-1365x794";
