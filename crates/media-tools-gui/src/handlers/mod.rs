pub mod collage;
pub mod extract;
pub mod merge;
