use media_async_runtime::MediaUpdate;
use tokio::sync::mpsc;

#[cfg(feature = "pdf-preview")]
use media_async_runtime::{DocumentId, Quality};
#[cfg(feature = "pdf-preview")]
use std::collections::HashMap;
#[cfg(feature = "pdf-preview")]
use std::path::PathBuf;
#[cfg(feature = "pdf-preview")]
use std::sync::atomic::{AtomicU64, Ordering};

/// Worker-side registry of documents opened for extraction.
#[cfg(feature = "pdf-preview")]
pub struct ExtractDocs {
    documents: HashMap<DocumentId, PathBuf>,
    next_doc_id: AtomicU64,
}

#[cfg(feature = "pdf-preview")]
impl ExtractDocs {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            next_doc_id: AtomicU64::new(0),
        }
    }

    fn register(&mut self, path: PathBuf) -> DocumentId {
        let doc_id = DocumentId(self.next_doc_id.fetch_add(1, Ordering::SeqCst));
        self.documents.insert(doc_id, path);
        doc_id
    }

    fn get(&self, doc_id: &DocumentId) -> Option<&PathBuf> {
        self.documents.get(doc_id)
    }
}

/// Load a document, report its page count, then render every page preview.
#[cfg(feature = "pdf-preview")]
pub async fn handle_load(
    path: PathBuf,
    docs: &mut ExtractDocs,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    let page_count = match pdf_to_jpg::page_count(&path).await {
        Ok(count) => count,
        Err(e) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to load PDF: {e}"),
            });
            return;
        }
    };

    let doc_id = docs.register(path.clone());
    let _ = update_tx.send(MediaUpdate::ExtractLoaded {
        doc_id,
        path: path.clone(),
        page_count,
    });

    for page_index in 0..page_count {
        let _ = update_tx.send(MediaUpdate::Progress {
            operation: "Rendering previews".to_string(),
            current: page_index,
            total: page_count,
        });

        match pdf_to_jpg::render_page(&path, page_index, pdf_to_jpg::PREVIEW_SCALE).await {
            Ok(image) => {
                let _ = update_tx.send(MediaUpdate::ExtractPreviewRendered {
                    doc_id,
                    page_index,
                    width: image.width(),
                    height: image.height(),
                    rgba_data: image.into_raw(),
                });
            }
            Err(e) => {
                let _ = update_tx.send(MediaUpdate::Error {
                    message: format!("Failed to render page {}: {e}", page_index + 1),
                });
                return;
            }
        }
    }
}

#[cfg(feature = "pdf-preview")]
pub async fn handle_extract(
    doc_id: DocumentId,
    page_indices: Vec<usize>,
    quality: Quality,
    out_dir: PathBuf,
    docs: &ExtractDocs,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    let Some(path) = docs.get(&doc_id).cloned() else {
        let _ = update_tx.send(MediaUpdate::Error {
            message: format!("Document not found: {doc_id:?}"),
        });
        return;
    };

    let _ = update_tx.send(MediaUpdate::Progress {
        operation: "Exporting pages".to_string(),
        current: 0,
        total: page_indices.len(),
    });

    match pdf_to_jpg::extract_pages(&path, &page_indices, quality, &out_dir).await {
        Ok(written) => {
            let _ = update_tx.send(MediaUpdate::ExtractComplete {
                dir: out_dir,
                page_count: written.len(),
            });
        }
        Err(e) => {
            let _ = update_tx.send(MediaUpdate::Error {
                message: format!("Failed to export pages: {e}"),
            });
        }
    }
}

#[cfg(not(feature = "pdf-preview"))]
pub async fn handle_extract_unavailable(update_tx: &mpsc::UnboundedSender<MediaUpdate>) {
    let _ = update_tx.send(MediaUpdate::Error {
        message: "PDF preview not available (pdf-preview feature disabled)".to_string(),
    });
}
