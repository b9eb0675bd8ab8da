use eframe::egui;
use media_async_runtime::MediaCommand;
use photo_collage::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_EXPORT_STEM, MAX_ZOOM, MIN_PHOTOS, MIN_ZOOM,
};
use photo_collage::{
    draw_commands, map_display_point, sanitize_file_name, BackgroundColor, CollageBoard,
    DrawCommand,
};
use tokio::sync::mpsc;

pub struct CollageState {
    pub board: CollageBoard,
    pub photo_textures: Vec<egui::TextureHandle>,
    pub background_texture: Option<egui::TextureHandle>,
    pub export_name: String,
}

impl Default for CollageState {
    fn default() -> Self {
        Self {
            board: CollageBoard::new(),
            photo_textures: Vec::new(),
            background_texture: None,
            export_name: DEFAULT_EXPORT_STEM.to_string(),
        }
    }
}

pub fn show_collage(
    ui: &mut egui::Ui,
    state: &mut CollageState,
    command_tx: &mpsc::UnboundedSender<MediaCommand>,
    status: &mut String,
) {
    ui.horizontal(|ui| {
        if ui.button("Add photos…").clicked() {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp", "gif"])
                .pick_files()
            {
                add_photos(paths, state, command_tx, status);
            }
        }

        if ui.button("Background image…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png", "webp", "bmp", "gif"])
                .pick_file()
            {
                let _ = command_tx.send(MediaCommand::CollageSetBackgroundImage {
                    path: Some(path),
                });
                *status = "Loading background image...".to_string();
            }
        }

        if state.board.background().image.is_some() && ui.button("Clear background").clicked() {
            let _ = command_tx.send(MediaCommand::CollageSetBackgroundImage { path: None });
        }

        if ui.button("Reset").clicked() {
            state.board.clear();
            state.photo_textures.clear();
            let _ = command_tx.send(MediaCommand::CollageClear);
            *status = "Cleared all photos".to_string();
        }
    });

    ui.horizontal(|ui| {
        ui.label("Background:");
        let current = state.board.background().color;
        for preset in BackgroundColor::PRESETS {
            let [r, g, b] = preset.rgb();
            let color = egui::Color32::from_rgb(r, g, b);
            let size = egui::vec2(22.0, 22.0);
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            ui.painter().rect_filled(rect, egui::CornerRadius::same(3), color);
            if preset == current {
                ui.painter().rect_stroke(
                    rect,
                    egui::CornerRadius::same(3),
                    egui::Stroke::new(2.0, egui::Color32::DARK_BLUE),
                    egui::StrokeKind::Inside,
                );
            }
            if response.clicked() {
                state.board.set_background_color(preset);
            }
        }
    });

    ui.horizontal(|ui| {
        match state.board.selection() {
            Some(index) => {
                let mut zoom = state.board.photos()[index].scale;
                let slider = egui::Slider::new(&mut zoom, MIN_ZOOM..=MAX_ZOOM)
                    .text(format!("Photo {} zoom", index + 1));
                if ui.add(slider).changed() {
                    state.board.set_zoom(zoom);
                }
            }
            None => {
                ui.label("Select a photo in the preview to adjust its zoom.");
            }
        }

        ui.separator();
        ui.label("Export as:");
        ui.add(egui::TextEdit::singleline(&mut state.export_name).desired_width(180.0));

        let can_export = state.board.is_composable();
        if ui
            .add_enabled(can_export, egui::Button::new("Export JPEG…"))
            .clicked()
        {
            let stem = sanitize_file_name(&state.export_name, DEFAULT_EXPORT_STEM);
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JPEG", &["jpg"])
                .set_file_name(format!("{stem}.jpg"))
                .save_file()
            {
                let _ = command_tx.send(MediaCommand::CollageExport {
                    board: state.board.clone(),
                    path,
                });
                *status = "Exporting collage...".to_string();
            }
        }
        if !can_export {
            let missing = MIN_PHOTOS.saturating_sub(state.board.photos().len());
            if missing > 0 {
                ui.label(format!("{missing} more photo(s) needed to compose"));
            }
        }
    });

    ui.separator();
    show_canvas(ui, state);
}

/// Queue a batch of photos for decoding, honoring the board's capacity.
pub fn add_photos(
    paths: Vec<std::path::PathBuf>,
    state: &mut CollageState,
    command_tx: &mpsc::UnboundedSender<MediaCommand>,
    status: &mut String,
) {
    let capacity = state.board.remaining_capacity();
    if capacity == 0 {
        *status = "The board is full; reset to load other photos".to_string();
        return;
    }

    let skipped = paths.len().saturating_sub(capacity);
    let accepted: Vec<_> = paths.into_iter().take(capacity).collect();
    *status = if skipped > 0 {
        format!(
            "Loading {} image(s), skipping {skipped} over the limit",
            accepted.len()
        )
    } else {
        format!("Loading {} image(s)...", accepted.len())
    };
    let _ = command_tx.send(MediaCommand::CollageAddPhotos { paths: accepted });
}

fn show_canvas(ui: &mut egui::Ui, state: &mut CollageState) {
    let aspect = CANVAS_WIDTH / CANVAS_HEIGHT;
    let available = ui.available_size();
    let width = available.x.min(available.y * aspect).max(200.0);
    let size = egui::vec2(width, width / aspect);

    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

    let to_canvas = |pos: egui::Pos2| {
        map_display_point(
            pos.x - rect.left(),
            pos.y - rect.top(),
            rect.width(),
            rect.height(),
        )
    };

    if response.drag_started() || response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_canvas(pos);
            state.board.pointer_down(x, y);
        }
    }
    if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            let (x, y) = to_canvas(pos);
            state.board.pointer_move(x, y);
        }
    }
    if response.drag_stopped() || response.clicked() {
        state.board.pointer_up();
    }

    if response.hovered() {
        if let Some(pos) = response.hover_pos() {
            let (x, y) = to_canvas(pos);

            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                // egui reports wheel-up as positive; the board uses the DOM
                // convention where negative means up.
                state.board.wheel(x, y, -scroll);
            }

            if state.board.hit_test(x, y).is_some() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
            }
        }
    }

    paint_board(ui.painter(), rect, state);
}

fn paint_board(painter: &egui::Painter, rect: egui::Rect, state: &CollageState) {
    let scale_x = rect.width() / CANVAS_WIDTH;
    let scale_y = rect.height() / CANVAS_HEIGHT;
    let to_screen = |r: photo_collage::Rect| {
        egui::Rect::from_min_size(
            rect.left_top() + egui::vec2(r.x * scale_x, r.y * scale_y),
            egui::vec2(r.width * scale_x, r.height * scale_y),
        )
    };
    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

    let mut clip: Option<egui::Rect> = None;
    for command in draw_commands(&state.board) {
        match command {
            DrawCommand::Clear => {
                painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::WHITE);
            }
            DrawCommand::FillColor([r, g, b]) => {
                painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::from_rgb(r, g, b));
            }
            DrawCommand::BlurredCover => match &state.background_texture {
                Some(texture) => {
                    painter.image(texture.id(), rect, uv, egui::Color32::WHITE);
                }
                None => {
                    let [r, g, b] = state.board.background().color.rgb();
                    painter.rect_filled(rect, egui::CornerRadius::ZERO, egui::Color32::from_rgb(r, g, b));
                }
            },
            DrawCommand::Clip(clip_rect) => {
                clip = Some(to_screen(clip_rect));
            }
            DrawCommand::DrawPhoto { slot, rect: draw } => {
                if let Some(texture) = state.photo_textures.get(slot) {
                    let clipped = match clip {
                        Some(clip_rect) => painter.with_clip_rect(clip_rect),
                        None => painter.clone(),
                    };
                    clipped.image(texture.id(), to_screen(draw), uv, egui::Color32::WHITE);
                }
            }
            DrawCommand::Unclip => {
                clip = None;
            }
            DrawCommand::StrokeFrame {
                rect: frame,
                selected,
            } => {
                let (width, color) = if selected {
                    (3.0, egui::Color32::from_rgb(0x31, 0x5b, 0x7c))
                } else {
                    (1.0, egui::Color32::from_rgba_unmultiplied(30, 30, 30, 46))
                };
                painter.rect_stroke(
                    to_screen(frame),
                    egui::CornerRadius::ZERO,
                    egui::Stroke::new(width, color),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }
}
