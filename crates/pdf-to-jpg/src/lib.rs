mod render;
mod selection;
mod types;

pub use render::{
    bind_pdfium, extract_pages, page_count, page_file_name, render_page, PREVIEW_SCALE,
    THUMBNAIL_SCALE,
};
pub use selection::PageSelection;
pub use types::*;
