use media_async_runtime::MediaUpdate;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[cfg(feature = "pdf-preview")]
use media_async_runtime::PageThumbnail;

pub async fn handle_add_files(paths: Vec<PathBuf>, update_tx: &mpsc::UnboundedSender<MediaUpdate>) {
    let total = paths.len();
    for (index, path) in paths.into_iter().enumerate() {
        let _ = update_tx.send(MediaUpdate::Progress {
            operation: "Loading PDFs".to_string(),
            current: index,
            total,
        });

        match pdf_merge::load_pdf(&path).await {
            Ok(doc) => {
                let page_count = doc.get_pages().len();
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let thumbnail = render_thumbnail(&path).await;
                let _ = update_tx.send(MediaUpdate::MergeFileLoaded {
                    path,
                    name,
                    page_count,
                    thumbnail,
                });
            }
            Err(e) => {
                let _ = update_tx.send(MediaUpdate::Error {
                    message: format!("Failed to load {}: {e}", path.display()),
                });
            }
        }
    }
}

#[cfg(feature = "pdf-preview")]
async fn render_thumbnail(path: &PathBuf) -> Option<PageThumbnail> {
    match pdf_to_jpg::render_page(path, 0, pdf_to_jpg::THUMBNAIL_SCALE).await {
        Ok(image) => Some(PageThumbnail {
            width: image.width(),
            height: image.height(),
            rgba_data: image.into_raw(),
        }),
        Err(e) => {
            // The entry simply shows without a thumbnail.
            log::warn!("Failed to render thumbnail for {}: {e}", path.display());
            None
        }
    }
}

#[cfg(not(feature = "pdf-preview"))]
async fn render_thumbnail(_path: &PathBuf) -> Option<media_async_runtime::PageThumbnail> {
    None
}

pub async fn handle_generate(
    paths: Vec<PathBuf>,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    if paths.len() < 2 {
        let _ = update_tx.send(MediaUpdate::Error {
            message: "A merge needs at least two documents".to_string(),
        });
        return;
    }

    let _ = update_tx.send(MediaUpdate::Progress {
        operation: "Loading PDFs".to_string(),
        current: 0,
        total: 3,
    });

    let documents = match pdf_merge::load_multiple_pdfs(&paths).await {
        Ok(docs) => docs,
        Err(e) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to load PDFs: {e}"),
            });
            return;
        }
    };

    let _ = update_tx.send(MediaUpdate::Progress {
        operation: "Merging pages".to_string(),
        current: 1,
        total: 3,
    });

    let merged = match pdf_merge::merge(&documents).await {
        Ok(doc) => doc,
        Err(e) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to merge PDFs: {e}"),
            });
            return;
        }
    };
    let page_count = merged.get_pages().len();

    let _ = update_tx.send(MediaUpdate::Progress {
        operation: "Saving PDF".to_string(),
        current: 2,
        total: 3,
    });

    if let Err(e) = pdf_merge::save_pdf(merged, &output_path).await {
        let _ = update_tx.send(MediaUpdate::Error {
            message: format!("Failed to save merged PDF: {e}"),
        });
        return;
    }

    let _ = update_tx.send(MediaUpdate::MergeComplete {
        path: output_path,
        page_count,
    });
}
