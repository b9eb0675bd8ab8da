use eframe::egui;
use media_async_runtime::{MediaCommand, MediaUpdate};
use tokio::sync::mpsc;

use crate::views::{show_collage, show_extract, show_merge, CollageState, ExtractState, MergeState};

#[derive(Default, PartialEq)]
enum Mode {
    #[default]
    Collage,
    Merge,
    Extract,
}

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct MediaToolsApp {
    mode: Mode,
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<MediaCommand>,
    update_rx: mpsc::UnboundedReceiver<MediaUpdate>,

    // Progress tracking
    progress: Option<ProgressState>,

    // Per-tool state
    collage: CollageState,
    merge: MergeState,
    extract: Option<ExtractState>,

    _tokio_handle: tokio::runtime::Handle,
}

impl MediaToolsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, tokio_handle: tokio::runtime::Handle) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            mode: Mode::default(),
            status: String::new(),
            command_tx,
            update_rx,
            progress: None,
            collage: CollageState::default(),
            merge: MergeState::default(),
            extract: None,
            _tokio_handle: tokio_handle,
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if dropped.is_empty() {
            return;
        }

        let (pdfs, images): (Vec<_>, Vec<_>) = dropped.into_iter().partition(|path| {
            path.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        });

        if !images.is_empty() {
            self.mode = Mode::Collage;
            crate::views::collage::add_photos(
                images,
                &mut self.collage,
                &self.command_tx,
                &mut self.status,
            );
        }

        if !pdfs.is_empty() {
            match self.mode {
                Mode::Extract => {
                    // Only one document at a time; the last drop wins.
                    if let Some(path) = pdfs.into_iter().next_back() {
                        let _ = self.command_tx.send(MediaCommand::ExtractLoad { path });
                        self.status = "Loading PDF...".to_string();
                    }
                }
                _ => {
                    self.mode = Mode::Merge;
                    self.status = format!("Loading {} PDF(s)...", pdfs.len());
                    let _ = self.command_tx.send(MediaCommand::MergeAddFiles { paths: pdfs });
                }
            }
        }
    }

    fn load_texture(
        ctx: &egui::Context,
        name: &str,
        width: u32,
        height: u32,
        rgba_data: &[u8],
    ) -> egui::TextureHandle {
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            rgba_data,
        );
        ctx.load_texture(name, color_image, egui::TextureOptions::default())
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                MediaUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint(); // Request another frame
                }
                MediaUpdate::CollagePhotoLoaded {
                    name,
                    width,
                    height,
                    rgba_data,
                } => match self.collage.board.add_photo(width, height) {
                    Ok(slot) => {
                        let texture = Self::load_texture(
                            ctx,
                            &format!("collage_photo_{slot}"),
                            width,
                            height,
                            &rgba_data,
                        );
                        self.collage.photo_textures.push(texture);
                        self.status = format!("{} photos loaded", self.collage.board.photos().len());
                    }
                    Err(e) => {
                        log::warn!("Dropped decoded photo {name}: {e}");
                    }
                },
                MediaUpdate::CollageBackgroundLoaded {
                    width,
                    height,
                    rgba_data,
                } => {
                    let texture =
                        Self::load_texture(ctx, "collage_background", width, height, &rgba_data);
                    self.collage.background_texture = Some(texture);
                    self.collage.board.set_background_image(Some((width, height)));
                    self.status = "Background image set".to_string();
                    self.progress = None;
                }
                MediaUpdate::CollageBackgroundCleared => {
                    self.collage.background_texture = None;
                    self.collage.board.set_background_image(None);
                    self.progress = None;
                }
                MediaUpdate::CollageExported { path } => {
                    self.status = format!("Exported collage → {}", path.display());
                    self.progress = None;
                }
                MediaUpdate::MergeFileLoaded {
                    path,
                    name,
                    page_count,
                    thumbnail,
                } => {
                    let id = self.merge.queue.add(&name, &path, page_count);
                    if let Some(thumb) = thumbnail {
                        let texture = Self::load_texture(
                            ctx,
                            &format!("merge_thumb_{id}"),
                            thumb.width,
                            thumb.height,
                            &thumb.rgba_data,
                        );
                        self.merge.thumbnails.insert(id, texture);
                    }
                    self.status = format!("{} PDF(s) queued", self.merge.queue.len());
                    self.progress = None;
                }
                MediaUpdate::MergeComplete { path, page_count } => {
                    self.status = format!(
                        "Merged {page_count} pages → {}",
                        path.display()
                    );
                    self.merge.queue.clear();
                    self.merge.thumbnails.clear();
                    self.progress = None;
                }
                MediaUpdate::ExtractLoaded {
                    doc_id,
                    path,
                    page_count,
                } => {
                    self.extract = Some(ExtractState::new(doc_id, path, page_count));
                    self.status = format!("Loaded PDF with {page_count} pages");
                }
                MediaUpdate::ExtractPreviewRendered {
                    doc_id,
                    page_index,
                    width,
                    height,
                    rgba_data,
                } => {
                    if let Some(state) = &mut self.extract {
                        if state.doc_id == doc_id && page_index < state.previews.len() {
                            let texture = Self::load_texture(
                                ctx,
                                &format!("extract_page_{page_index}"),
                                width,
                                height,
                                &rgba_data,
                            );
                            state.previews[page_index] = Some(texture);
                        }
                    }
                    if self
                        .extract
                        .as_ref()
                        .is_some_and(|s| s.previews.iter().all(Option::is_some))
                    {
                        self.progress = None;
                    }
                }
                MediaUpdate::ExtractComplete { dir, page_count } => {
                    self.status = format!("Exported {page_count} page(s) → {}", dir.display());
                    self.progress = None;
                }
                MediaUpdate::Error { message } => {
                    log::warn!("{message}");
                    self.status = format!("Error: {message}");
                    self.progress = None;
                }
            }
        }
    }
}

impl eframe::App for MediaToolsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.process_updates(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.mode, Mode::Collage, "🖼 Collage");
                ui.selectable_value(&mut self.mode, Mode::Merge, "📄 Merge");
                ui.selectable_value(&mut self.mode, Mode::Extract, "📑 Extract");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.mode {
                Mode::Collage => {
                    show_collage(ui, &mut self.collage, &self.command_tx, &mut self.status)
                }
                Mode::Merge => show_merge(ui, &mut self.merge, &self.command_tx, &mut self.status),
                Mode::Extract => {
                    show_extract(ui, &mut self.extract, &self.command_tx, &mut self.status)
                }
            }

            // Show progress bar
            if let Some(ref progress) = self.progress {
                ui.separator();
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
                ctx.request_repaint(); // Keep updating during operations
            }

            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });
    }
}
