//! Rendering of the composition
//!
//! Two consumers share the same scene description: the GUI paints the
//! [`DrawCommand`] list live, and [`compose`] rasterizes it with the `image`
//! crate for JPEG export. The board itself never draws; it only emits state.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, Rgba, RgbaImage};

use crate::board::CollageBoard;
use crate::constants::{
    BACKGROUND_BLEED, BACKGROUND_BLUR_RADIUS, CANVAS_HEIGHT, CANVAS_WIDTH, MIN_PHOTOS,
};
use crate::transform::draw_rect;
use crate::types::{Background, CollageError, Rect, Result};

/// Stroke color for the selected frame
const SELECTED_STROKE: Rgba<u8> = Rgba([0x31, 0x5b, 0x7c, 0xff]);

/// Stroke color for unselected frames (18% black)
const FRAME_STROKE: Rgba<u8> = Rgba([30, 30, 30, 46]);

/// Stroke width for the selected frame (pixels)
const SELECTED_STROKE_WIDTH: u32 = 3;

/// Stroke width for unselected frames (pixels)
const FRAME_STROKE_WIDTH: u32 = 1;

/// One drawing instruction for a rendering surface.
///
/// Every photo is drawn clipped to its frame, then the frame border is
/// stroked on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Clear the whole surface.
    Clear,
    /// Fill the surface with a flat color.
    FillColor([u8; 3]),
    /// Draw the prepared blurred background composite (see
    /// [`compose_background`]); emitted instead of [`DrawCommand::FillColor`]
    /// when a background image is set.
    BlurredCover,
    /// Begin clipping to a rectangle.
    Clip(Rect),
    /// Draw the photo in `slot` into its transform rectangle.
    DrawPhoto { slot: usize, rect: Rect },
    /// End the current clip.
    Unclip,
    /// Stroke a frame border.
    StrokeFrame { rect: Rect, selected: bool },
}

/// Emit the draw command sequence for the board's current state.
pub fn draw_commands(board: &CollageBoard) -> Vec<DrawCommand> {
    let mut commands = vec![DrawCommand::Clear];

    let background = board.background();
    if background.image.is_some() {
        commands.push(DrawCommand::BlurredCover);
    } else {
        commands.push(DrawCommand::FillColor(background.color.rgb()));
    }

    let selection = board.selection();
    for (slot, (photo, frame)) in board.photos().iter().zip(board.frames()).enumerate() {
        commands.push(DrawCommand::Clip(*frame));
        commands.push(DrawCommand::DrawPhoto {
            slot,
            rect: draw_rect(photo, frame),
        });
        commands.push(DrawCommand::Unclip);
        commands.push(DrawCommand::StrokeFrame {
            rect: *frame,
            selected: selection == Some(slot),
        });
    }

    commands
}

/// Rasterize the canvas background.
///
/// Without an image this is a flat fill. With one, the image is cover-fit
/// over the canvas plus bleed, blurred, and center-cropped back to the
/// canvas so the blur never reveals an empty edge.
pub fn compose_background(background: Background, image: Option<&RgbaImage>) -> RgbaImage {
    let width = CANVAS_WIDTH as u32;
    let height = CANVAS_HEIGHT as u32;

    let Some(image) = image.filter(|_| background.image.is_some()) else {
        let [r, g, b] = background.color.rgb();
        return RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0xff]));
    };

    let bleed_width = CANVAS_WIDTH + 2.0 * BACKGROUND_BLEED;
    let bleed_height = CANVAS_HEIGHT + 2.0 * BACKGROUND_BLEED;
    let scale = (bleed_width / image.width() as f32).max(bleed_height / image.height() as f32);
    let scaled_width = (image.width() as f32 * scale).round().max(1.0) as u32;
    let scaled_height = (image.height() as f32 * scale).round().max(1.0) as u32;

    let scaled = imageops::resize(
        image,
        scaled_width,
        scaled_height,
        imageops::FilterType::Triangle,
    );
    let blurred = imageops::fast_blur(&scaled, BACKGROUND_BLUR_RADIUS);

    let crop_x = (scaled_width.saturating_sub(width)) / 2;
    let crop_y = (scaled_height.saturating_sub(height)) / 2;
    imageops::crop_imm(&blurred, crop_x, crop_y, width, height).to_image()
}

/// Rasterize the full composite at canvas resolution.
///
/// `photo_images` supplies the decoded pixels slot by slot; the board only
/// knows natural sizes. `background_image` supplies the background pixels
/// when one is set on the board.
pub fn compose(
    board: &CollageBoard,
    photo_images: &[RgbaImage],
    background_image: Option<&RgbaImage>,
) -> Result<RgbaImage> {
    if !board.is_composable() {
        return Err(CollageError::NotComposable {
            got: board.photos().len(),
            needed: MIN_PHOTOS,
        });
    }
    if photo_images.len() != board.photos().len() {
        return Err(CollageError::Config(format!(
            "{} photo images supplied for {} photos",
            photo_images.len(),
            board.photos().len()
        )));
    }

    let mut canvas = compose_background(board.background(), background_image);

    let selection = board.selection();
    for (slot, (photo, frame)) in board.photos().iter().zip(board.frames()).enumerate() {
        let source = &photo_images[slot];
        if source.width() != photo.natural_width || source.height() != photo.natural_height {
            return Err(CollageError::PhotoMismatch(slot));
        }

        let rect = draw_rect(photo, frame);
        blit_covered(&mut canvas, source, &rect, frame);
        stroke_rect(
            &mut canvas,
            frame,
            if selection == Some(slot) {
                SELECTED_STROKE_WIDTH
            } else {
                FRAME_STROKE_WIDTH
            },
            if selection == Some(slot) {
                SELECTED_STROKE
            } else {
                FRAME_STROKE
            },
        );
    }

    Ok(canvas)
}

/// Draw `source` scaled into `draw`, clipped to `clip`.
fn blit_covered(canvas: &mut RgbaImage, source: &RgbaImage, draw: &Rect, clip: &Rect) {
    let scaled_width = draw.width.round().max(1.0) as u32;
    let scaled_height = draw.height.round().max(1.0) as u32;
    let scaled = imageops::resize(
        source,
        scaled_width,
        scaled_height,
        imageops::FilterType::Triangle,
    );

    let x0 = clip.x.round().max(0.0) as u32;
    let y0 = clip.y.round().max(0.0) as u32;
    let x1 = (clip.right().round() as u32).min(canvas.width());
    let y1 = (clip.bottom().round() as u32).min(canvas.height());
    let draw_x = draw.x.round() as i64;
    let draw_y = draw.y.round() as i64;

    for y in y0..y1 {
        // Rounding can leave the draw rect a pixel short of the clip edge;
        // repeating the edge pixel keeps the frame gap-free.
        let src_y = (y as i64 - draw_y).clamp(0, scaled_height as i64 - 1) as u32;
        for x in x0..x1 {
            let src_x = (x as i64 - draw_x).clamp(0, scaled_width as i64 - 1) as u32;
            canvas.put_pixel(x, y, *scaled.get_pixel(src_x, src_y));
        }
    }
}

/// Stroke a rectangle border with a band of `width` pixels inside its edges.
fn stroke_rect(canvas: &mut RgbaImage, rect: &Rect, width: u32, color: Rgba<u8>) {
    let x0 = rect.x.round().max(0.0) as u32;
    let y0 = rect.y.round().max(0.0) as u32;
    let x1 = (rect.right().round() as u32).min(canvas.width());
    let y1 = (rect.bottom().round() as u32).min(canvas.height());
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for y in y0..y1 {
        let edge_row = y < y0 + width || y + width >= y1;
        if edge_row {
            for x in x0..x1 {
                blend_pixel(canvas, x, y, color);
            }
        } else {
            for x in (x0..(x0 + width).min(x1)).chain(x1.saturating_sub(width)..x1) {
                blend_pixel(canvas, x, y, color);
            }
        }
    }
}

/// Source-over blend of one pixel.
fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let alpha = color.0[3] as u32;
    if alpha == 0 {
        return;
    }
    let dest = canvas.get_pixel_mut(x, y);
    for channel in 0..3 {
        let src = color.0[channel] as u32;
        let dst = dest.0[channel] as u32;
        dest.0[channel] = ((src * alpha + dst * (255 - alpha)) / 255) as u8;
    }
}

/// Encode a composite as JPEG bytes at the given quality.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(&rgb)?;
    Ok(bytes)
}

/// Encode and write a composite to disk.
pub async fn save_jpeg(image: RgbaImage, quality: u8, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || encode_jpeg(&image, quality)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Load and decode an image file into RGBA pixels.
pub async fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image =
        tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(image.to_rgba8())
}

/// Sanitize a user-entered file stem for the filesystem.
///
/// Runs of reserved characters collapse into a single underscore; an empty
/// result falls back to `fallback`.
pub fn sanitize_file_name(name: &str, fallback: &str) -> String {
    const RESERVED: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

    let mut cleaned = String::new();
    let mut in_run = false;
    for ch in name.trim().chars() {
        if RESERVED.contains(&ch) {
            if !in_run {
                cleaned.push('_');
                in_run = true;
            }
        } else {
            cleaned.push(ch);
            in_run = false;
        }
    }

    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned
    }
}
