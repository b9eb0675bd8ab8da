pub mod collage;
pub mod extract;
pub mod merge;

pub use collage::{show_collage, CollageState};
pub use extract::{show_extract, ExtractState};
pub use merge::{show_merge, MergeState};
