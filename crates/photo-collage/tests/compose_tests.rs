use image::{Rgba, RgbaImage};
use photo_collage::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use photo_collage::*;

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

#[test]
fn test_full_interaction_then_compose() {
    let mut board = CollageBoard::new();
    let mut images = Vec::new();
    for rgb in [[200, 30, 30], [30, 200, 30], [30, 30, 200], [220, 220, 40]] {
        board.add_photo(640, 480).unwrap();
        images.push(solid(640, 480, rgb));
    }

    // Zoom into the second photo and drag it sideways.
    let frame = board.frames()[1];
    let (cx, cy) = (frame.x + frame.width / 2.0, frame.y + frame.height / 2.0);
    for _ in 0..8 {
        assert!(board.wheel(cx, cy, -120.0));
    }
    board.pointer_down(cx, cy);
    board.pointer_move(cx + 500.0, cy);
    board.pointer_up();

    let canvas = compose(&board, &images, None).unwrap();
    assert_eq!(canvas.width(), CANVAS_WIDTH as u32);
    assert_eq!(canvas.height(), CANVAS_HEIGHT as u32);

    // Every frame center shows its own photo, zoomed and panned or not.
    for (slot, frame) in board.frames().iter().enumerate() {
        let pixel = canvas.get_pixel(
            (frame.x + frame.width / 2.0) as u32,
            (frame.y + frame.height / 2.0) as u32,
        );
        let expected = images[slot].get_pixel(0, 0);
        assert_eq!(pixel.0[..3], expected.0[..3], "wrong photo in slot {slot}");
    }
}

#[test]
fn test_draw_commands_match_raster_inputs() {
    let mut board = CollageBoard::new();
    for _ in 0..7 {
        board.add_photo(1024, 768).unwrap();
    }

    let commands = draw_commands(&board);
    let photo_rects: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawPhoto { slot, rect } => Some((*slot, *rect)),
            _ => None,
        })
        .collect();

    assert_eq!(photo_rects.len(), 7);
    for (slot, rect) in photo_rects {
        let frame = board.frames()[slot];
        // Each emitted draw rect covers its frame with no gap.
        assert!(rect.x <= frame.x + 0.01);
        assert!(rect.y <= frame.y + 0.01);
        assert!(rect.right() >= frame.right() - 0.01);
        assert!(rect.bottom() >= frame.bottom() - 0.01);
    }
}

#[tokio::test]
async fn test_export_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let stem = sanitize_file_name("trip: day 1/2", constants::DEFAULT_EXPORT_STEM);
    assert_eq!(stem, "trip_ day 1_2");
    let path = dir.path().join(format!("{stem}.jpg"));

    let mut board = CollageBoard::new();
    let mut images = Vec::new();
    for _ in 0..3 {
        board.add_photo(320, 240).unwrap();
        images.push(solid(320, 240, [90, 140, 60]));
    }

    let canvas = compose(&board, &images, None).unwrap();
    save_jpeg(canvas, constants::EXPORT_JPEG_QUALITY, &path)
        .await
        .unwrap();

    let loaded = load_image(&path).await.unwrap();
    assert_eq!(loaded.width(), CANVAS_WIDTH as u32);
    assert_eq!(loaded.height(), CANVAS_HEIGHT as u32);
}

#[tokio::test]
async fn test_load_image_rejects_non_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-an-image.jpg");
    tokio::fs::write(&path, b"plain text").await.unwrap();

    assert!(matches!(
        load_image(&path).await,
        Err(CollageError::Image(_))
    ));
}
