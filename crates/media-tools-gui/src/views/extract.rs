use std::path::PathBuf;

use eframe::egui;
use media_async_runtime::{DocumentId, MediaCommand, PageSelection, Quality};
use tokio::sync::mpsc;

pub struct ExtractState {
    pub doc_id: DocumentId,
    pub path: PathBuf,
    pub page_count: usize,
    pub previews: Vec<Option<egui::TextureHandle>>,
    pub selection: PageSelection,
    pub quality: Quality,
}

impl ExtractState {
    pub fn new(doc_id: DocumentId, path: PathBuf, page_count: usize) -> Self {
        Self {
            doc_id,
            path,
            page_count,
            previews: vec![None; page_count],
            selection: PageSelection::new(),
            quality: Quality::default(),
        }
    }
}

pub fn show_extract(
    ui: &mut egui::Ui,
    extract_state: &mut Option<ExtractState>,
    command_tx: &mpsc::UnboundedSender<MediaCommand>,
    status: &mut String,
) {
    let close_requested = match extract_state {
        None => {
            show_open_prompt(ui, command_tx, status);
            return;
        }
        Some(state) => show_document(ui, state, command_tx, status),
    };

    if close_requested {
        *extract_state = None;
        status.clear();
    }
}

/// Toolbar and page grid for a loaded document. Returns true when the user
/// asked to close it.
fn show_document(
    ui: &mut egui::Ui,
    state: &mut ExtractState,
    command_tx: &mpsc::UnboundedSender<MediaCommand>,
    status: &mut String,
) -> bool {
    let mut close_requested = false;
    ui.horizontal(|ui| {
        ui.label(format!(
            "{} ({} pages)",
            state
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            state.page_count
        ));

        ui.separator();

        if ui.button("Select all").clicked() {
            state.selection.select_all(state.page_count);
        }
        if ui.button("Deselect all").clicked() {
            state.selection.clear();
        }

        ui.separator();
        ui.label("Quality:");
        ui.selectable_value(&mut state.quality, Quality::Low, "Low");
        ui.selectable_value(&mut state.quality, Quality::High, "High");

        let selected = state.selection.len();
        if ui
            .add_enabled(
                selected > 0,
                egui::Button::new(format!("Export ({selected})…")),
            )
            .clicked()
        {
            if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                let _ = command_tx.send(MediaCommand::ExtractPages {
                    doc_id: state.doc_id,
                    page_indices: state.selection.indices(),
                    quality: state.quality,
                    out_dir: dir,
                });
                *status = format!("Exporting {selected} page(s)...");
            }
        }

        ui.separator();
        if ui.button("Close PDF").clicked() {
            close_requested = true;
        }
    });

    if close_requested {
        return true;
    }

    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for page_index in 0..state.page_count {
                ui.vertical(|ui| {
                    match &state.previews[page_index] {
                        Some(texture) => {
                            let height = 180.0;
                            let size = texture.size_vec2();
                            let width = height * size.x / size.y.max(1.0);
                            let button =
                                egui::ImageButton::new((texture.id(), egui::vec2(width, height)))
                                    .selected(state.selection.contains(page_index));
                            if ui.add(button).clicked() {
                                state.selection.toggle(page_index);
                            }
                        }
                        None => {
                            ui.add_sized([130.0, 180.0], egui::Spinner::new());
                        }
                    }
                    ui.label(format!("{}", page_index + 1));
                });
            }
        });
    });

    false
}

fn show_open_prompt(
    ui: &mut egui::Ui,
    command_tx: &mpsc::UnboundedSender<MediaCommand>,
    status: &mut String,
) {
    ui.vertical_centered(|ui| {
        ui.add_space(50.0);
        ui.heading("PDF to JPG");
        ui.add_space(20.0);

        #[cfg(feature = "pdf-preview")]
        {
            ui.label("Drop a PDF file here or click to open");
            ui.add_space(10.0);

            if ui.button("Open PDF…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    let _ = command_tx.send(MediaCommand::ExtractLoad { path });
                    *status = "Loading PDF...".to_string();
                }
            }
        }

        #[cfg(not(feature = "pdf-preview"))]
        {
            let _ = (command_tx, status);
            ui.label("Page extraction not available (pdf-preview feature disabled)");
        }
    });
}
