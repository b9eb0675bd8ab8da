use std::collections::HashMap;

use eframe::egui;
use media_async_runtime::{MediaCommand, MergeQueue};
use photo_collage::sanitize_file_name;
use tokio::sync::mpsc;

const DEFAULT_MERGE_STEM: &str = "merged-document";

pub struct MergeState {
    pub queue: MergeQueue,
    pub thumbnails: HashMap<u64, egui::TextureHandle>,
    pub merge_name: String,
}

impl Default for MergeState {
    fn default() -> Self {
        Self {
            queue: MergeQueue::new(),
            thumbnails: HashMap::new(),
            merge_name: DEFAULT_MERGE_STEM.to_string(),
        }
    }
}

enum RowAction {
    MoveUp(usize),
    MoveDown(usize),
    Remove(u64),
}

pub fn show_merge(
    ui: &mut egui::Ui,
    state: &mut MergeState,
    command_tx: &mpsc::UnboundedSender<MediaCommand>,
    status: &mut String,
) {
    ui.horizontal(|ui| {
        if ui.button("Add PDFs…").clicked() {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("PDF", &["pdf"])
                .pick_files()
            {
                *status = format!("Loading {} PDF(s)...", paths.len());
                let _ = command_tx.send(MediaCommand::MergeAddFiles { paths });
            }
        }

        if ui.button("Clear all").clicked() {
            state.queue.clear();
            state.thumbnails.clear();
        }

        ui.separator();
        ui.label("Merge as:");
        ui.add(egui::TextEdit::singleline(&mut state.merge_name).desired_width(180.0));

        if ui
            .add_enabled(state.queue.can_merge(), egui::Button::new("Merge…"))
            .clicked()
        {
            let stem = sanitize_file_name(&state.merge_name, DEFAULT_MERGE_STEM);
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("PDF", &["pdf"])
                .set_file_name(format!("{stem}.pdf"))
                .save_file()
            {
                let _ = command_tx.send(MediaCommand::MergeGenerate {
                    paths: state.queue.paths(),
                    output_path: path,
                });
                *status = "Merging PDFs...".to_string();
            }
        }
    });

    ui.separator();

    if state.queue.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.heading("PDF Merger");
            ui.add_space(10.0);
            ui.label("Add two or more PDFs; they merge in list order.");
        });
        return;
    }

    let mut action: Option<RowAction> = None;
    let entry_count = state.queue.len();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (index, entry) in state.queue.entries().iter().enumerate() {
            ui.horizontal(|ui| {
                match state.thumbnails.get(&entry.id) {
                    Some(texture) => {
                        let height = 60.0;
                        let size = texture.size_vec2();
                        let width = height * size.x / size.y.max(1.0);
                        ui.image((texture.id(), egui::vec2(width, height)));
                    }
                    None => {
                        ui.add_sized([45.0, 60.0], egui::Label::new("📄"));
                    }
                }

                ui.vertical(|ui| {
                    ui.label(&entry.name);
                    ui.label(format!("{} page(s)", entry.page_count));
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        action = Some(RowAction::Remove(entry.id));
                    }
                    if ui
                        .add_enabled(index + 1 < entry_count, egui::Button::new("⬇"))
                        .clicked()
                    {
                        action = Some(RowAction::MoveDown(index));
                    }
                    if ui.add_enabled(index > 0, egui::Button::new("⬆")).clicked() {
                        action = Some(RowAction::MoveUp(index));
                    }
                });
            });
            ui.separator();
        }
    });

    match action {
        Some(RowAction::MoveUp(index)) => state.queue.reorder(index, index - 1),
        Some(RowAction::MoveDown(index)) => state.queue.reorder(index, index + 1),
        Some(RowAction::Remove(id)) => {
            state.queue.remove(id);
            state.thumbnails.remove(&id);
        }
        None => {}
    }
}
