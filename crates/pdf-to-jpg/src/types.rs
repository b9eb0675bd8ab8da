use pdfium_render::prelude::PdfiumError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF render error: {0}")]
    Pdfium(#[from] PdfiumError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Page {index} does not exist, the document has {count} pages")]
    PageOutOfRange { index: usize, count: usize },
    #[error("Page {page} failed: {source}")]
    PageFailed {
        page: usize,
        source: Box<ExtractError>,
    },
    #[error("No pages selected")]
    NoPagesSelected,
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Export quality preset
///
/// Controls both the render resolution and the JPEG compression level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Render at 2x page size, JPEG quality 92
    #[default]
    High,
    /// Render at page size, JPEG quality 75
    Low,
}

impl Quality {
    /// Scale factor applied to the page's natural size when rendering
    pub fn render_scale(self) -> f32 {
        match self {
            Quality::High => 2.0,
            Quality::Low => 1.0,
        }
    }

    /// JPEG quality (0-100) for the exported pages
    pub fn jpeg_quality(self) -> u8 {
        match self {
            Quality::High => 92,
            Quality::Low => 75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_presets() {
        assert_eq!(Quality::High.render_scale(), 2.0);
        assert_eq!(Quality::High.jpeg_quality(), 92);
        assert_eq!(Quality::Low.render_scale(), 1.0);
        assert_eq!(Quality::Low.jpeg_quality(), 75);
        assert_eq!(Quality::default(), Quality::High);
    }
}
