pub mod constants;

mod board;
mod layout;
mod options;
mod render;
mod transform;
mod types;

pub use board::{map_display_point, CollageBoard, DragState};
pub use layout::compute_layout;
pub use options::CollageOptions;
pub use render::{
    compose, compose_background, draw_commands, encode_jpeg, load_image, sanitize_file_name,
    save_jpeg, DrawCommand,
};
pub use transform::{clamp_offset, cover_scale, draw_rect, max_offsets};
pub use types::*;
