mod merge;
mod queue;
mod types;

pub use merge::{load_multiple_pdfs, load_pdf, merge, save_pdf};
pub use queue::{MergeEntry, MergeQueue};
pub use types::*;
