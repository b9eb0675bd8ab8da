use image::RgbaImage;
use media_async_runtime::{CollageBoard, MediaUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Worker-side pixel store for the collage photos.
///
/// Slot order mirrors the UI board: the UI appends a board slot for every
/// `CollagePhotoLoaded` update, so the two stay aligned.
pub struct CollageStore {
    photos: Vec<RgbaImage>,
    background: Option<RgbaImage>,
}

impl CollageStore {
    pub fn new() -> Self {
        Self {
            photos: Vec::new(),
            background: None,
        }
    }

    pub fn clear_photos(&mut self) {
        self.photos.clear();
    }
}

pub async fn handle_add_photos(
    paths: Vec<PathBuf>,
    store: &mut CollageStore,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    let total = paths.len();
    for (index, path) in paths.into_iter().enumerate() {
        // The view slices batches to the board's capacity, but batches queued
        // back-to-back could still overshoot; the store is the backstop.
        if store.photos.len() >= photo_collage::constants::MAX_PHOTOS {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!(
                    "Photo limit of {} reached, skipping the rest",
                    photo_collage::constants::MAX_PHOTOS
                ),
            });
            break;
        }

        let _ = update_tx.send(MediaUpdate::Progress {
            operation: "Loading photos".to_string(),
            current: index,
            total,
        });

        match photo_collage::load_image(&path).await {
            Ok(image) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let _ = update_tx.send(MediaUpdate::CollagePhotoLoaded {
                    name,
                    width: image.width(),
                    height: image.height(),
                    rgba_data: image.as_raw().clone(),
                });
                store.photos.push(image);
            }
            Err(e) => {
                // A failed decode is reported and skipped; loaded photos are
                // untouched.
                let _ = update_tx.send(MediaUpdate::Error {
                    message: format!("Failed to load {}: {e}", path.display()),
                });
            }
        }
    }
}

pub async fn handle_set_background(
    path: Option<PathBuf>,
    store: &mut CollageStore,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    let Some(path) = path else {
        store.background = None;
        let _ = update_tx.send(MediaUpdate::CollageBackgroundCleared);
        return;
    };

    match photo_collage::load_image(&path).await {
        Ok(image) => {
            // The UI paints the prepared composite; blurring in the preview
            // itself is not possible.
            let background = photo_collage::Background {
                color: photo_collage::BackgroundColor::default(),
                image: Some((image.width(), image.height())),
            };
            let composite = photo_collage::compose_background(background, Some(&image));
            store.background = Some(image);
            let _ = update_tx.send(MediaUpdate::CollageBackgroundLoaded {
                width: composite.width(),
                height: composite.height(),
                rgba_data: composite.into_raw(),
            });
        }
        Err(e) => {
            store.background = None;
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to load background image: {e}"),
            });
            let _ = update_tx.send(MediaUpdate::CollageBackgroundCleared);
        }
    }
}

pub async fn handle_export(
    board: CollageBoard,
    path: PathBuf,
    store: &CollageStore,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    let _ = update_tx.send(MediaUpdate::Progress {
        operation: "Composing".to_string(),
        current: 0,
        total: 2,
    });

    let photos = store.photos.clone();
    let background = store.background.clone();
    let composed = tokio::task::spawn_blocking(move || {
        photo_collage::compose(&board, &photos, background.as_ref())
    })
    .await;

    let canvas = match composed {
        Ok(Ok(canvas)) => canvas,
        Ok(Err(e)) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to compose collage: {e}"),
            });
            return;
        }
        Err(e) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Task join error: {e}"),
            });
            return;
        }
    };

    let _ = update_tx.send(MediaUpdate::Progress {
        operation: "Saving JPEG".to_string(),
        current: 1,
        total: 2,
    });

    match photo_collage::save_jpeg(
        canvas,
        photo_collage::constants::EXPORT_JPEG_QUALITY,
        &path,
    )
    .await
    {
        Ok(()) => {
            let _ = update_tx.send(MediaUpdate::CollageExported { path });
        }
        Err(e) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to save collage: {e}"),
            });
        }
    }
}
