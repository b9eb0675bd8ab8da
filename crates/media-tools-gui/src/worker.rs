use media_async_runtime::{MediaCommand, MediaUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes media commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<MediaCommand>,
    update_tx: mpsc::UnboundedSender<MediaUpdate>,
) {
    let mut collage_store = handlers::collage::CollageStore::new();

    #[cfg(feature = "pdf-preview")]
    let mut extract_docs = handlers::extract::ExtractDocs::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(
            cmd,
            &mut collage_store,
            #[cfg(feature = "pdf-preview")]
            &mut extract_docs,
            &mut command_rx,
            &update_tx,
        )
        .await;
    }
}

async fn process_command(
    cmd: MediaCommand,
    collage_store: &mut handlers::collage::CollageStore,
    #[cfg(feature = "pdf-preview")] extract_docs: &mut handlers::extract::ExtractDocs,
    command_rx: &mut mpsc::UnboundedReceiver<MediaCommand>,
    update_tx: &mpsc::UnboundedSender<MediaUpdate>,
) {
    match cmd {
        MediaCommand::CollageAddPhotos { paths } => {
            handlers::collage::handle_add_photos(paths, collage_store, update_tx).await;
        }
        MediaCommand::CollageSetBackgroundImage { path } => {
            handlers::collage::handle_set_background(path, collage_store, update_tx).await;
        }
        MediaCommand::CollageClear => {
            collage_store.clear_photos();
        }
        MediaCommand::CollageExport { board, path } => {
            handlers::collage::handle_export(board, path, collage_store, update_tx).await;
        }
        MediaCommand::MergeAddFiles { paths } => {
            handlers::merge::handle_add_files(paths, update_tx).await;
        }
        MediaCommand::MergeGenerate { paths, output_path } => {
            handlers::merge::handle_generate(paths, output_path, update_tx).await;
        }
        #[cfg(feature = "pdf-preview")]
        MediaCommand::ExtractLoad { mut path } => {
            // Rendering every preview is slow; drain queued loads and keep
            // only the most recent one.
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let MediaCommand::ExtractLoad { path: newer } = next_cmd {
                    log::debug!("Discarding queued extract load, using newer request");
                    path = newer;
                } else {
                    // Non-load command found; since we can't put it back,
                    // process it now before the load.
                    Box::pin(process_command(
                        next_cmd,
                        collage_store,
                        extract_docs,
                        command_rx,
                        update_tx,
                    ))
                    .await;
                }
            }

            handlers::extract::handle_load(path, extract_docs, update_tx).await;
        }
        #[cfg(feature = "pdf-preview")]
        MediaCommand::ExtractPages {
            doc_id,
            page_indices,
            quality,
            out_dir,
        } => {
            handlers::extract::handle_extract(
                doc_id,
                page_indices,
                quality,
                out_dir,
                extract_docs,
                update_tx,
            )
            .await;
        }
        #[cfg(not(feature = "pdf-preview"))]
        MediaCommand::ExtractLoad { .. } | MediaCommand::ExtractPages { .. } => {
            handlers::extract::handle_extract_unavailable(update_tx).await;
        }
    }
}
