//! Page rasterization via Pdfium
//!
//! Every operation opens the document inside a blocking task; Pdfium
//! bindings are not shared across threads.

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;
use pdfium_render::prelude::*;

use crate::types::{ExtractError, Quality, Result};

/// Render scale for the preview grid (half the page's natural size)
pub const PREVIEW_SCALE: f32 = 0.5;

/// Render scale for file-list thumbnails
pub const THUMBNAIL_SCALE: f32 = 0.3;

/// Bind Pdfium, trying the vendored library first, then the system one.
pub fn bind_pdfium() -> std::result::Result<Pdfium, PdfiumError> {
    let vendor_path = std::env::current_dir().ok().and_then(|mut p| {
        p.push("vendor/pdfium/lib");
        if p.exists() { Some(p) } else { None }
    });

    if let Some(vendor_path) = vendor_path {
        if let Ok(binding) =
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&vendor_path))
        {
            return Ok(Pdfium::new(binding));
        }
    }

    Pdfium::bind_to_system_library().map(Pdfium::new)
}

/// Number of pages in the document.
pub async fn page_count(path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref().to_owned();
    let count = tokio::task::spawn_blocking(move || {
        let pdfium = bind_pdfium()?;
        let document = pdfium.load_pdf_from_file(&path, None)?;
        Ok::<_, PdfiumError>(document.pages().len() as usize)
    })
    .await??;
    Ok(count)
}

/// Render one page to RGBA pixels at `scale` times its natural size.
pub async fn render_page(
    path: impl AsRef<Path>,
    page_index: usize,
    scale: f32,
) -> Result<RgbaImage> {
    let path = path.as_ref().to_owned();
    tokio::task::spawn_blocking(move || render_page_sync(&path, page_index, scale)).await?
}

fn render_page_sync(path: &Path, page_index: usize, scale: f32) -> Result<RgbaImage> {
    let pdfium = bind_pdfium()?;
    let document = pdfium.load_pdf_from_file(path, None)?;
    let pages = document.pages();
    let count = pages.len() as usize;
    if page_index >= count {
        return Err(ExtractError::PageOutOfRange {
            index: page_index,
            count,
        });
    }

    let page = pages.get(page_index as u16)?;
    let config = PdfRenderConfig::new().scale_page_by_factor(scale);
    let bitmap = page.render_with_config(&config)?;

    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    let rgba = bitmap.as_rgba_bytes().to_vec();

    RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
        ExtractError::Config(format!("rendered page {page_index} has a malformed buffer"))
    })
}

/// File name for an extracted page, 1-based like the page labels users see.
pub fn page_file_name(page_index: usize) -> String {
    format!("page_{}.jpg", page_index + 1)
}

/// Render the selected pages and write them as JPEGs into `out_dir`.
///
/// Returns the written paths in page order. The first failing page aborts
/// the batch.
pub async fn extract_pages(
    path: impl AsRef<Path>,
    page_indices: &[usize],
    quality: Quality,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    if page_indices.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }

    let path = path.as_ref().to_owned();
    let out_dir = out_dir.as_ref().to_owned();
    let page_indices = page_indices.to_vec();

    let encoded = tokio::task::spawn_blocking(move || {
        let mut encoded = Vec::with_capacity(page_indices.len());
        for &page_index in &page_indices {
            let page = render_page_sync(&path, page_index, quality.render_scale())
                .and_then(|image| jpeg_bytes(&image, quality.jpeg_quality()))
                .map_err(|e| ExtractError::PageFailed {
                    page: page_index + 1,
                    source: Box::new(e),
                })?;
            encoded.push((page_file_name(page_index), page));
        }
        Ok::<_, ExtractError>(encoded)
    })
    .await??;

    tokio::fs::create_dir_all(&out_dir).await?;

    let mut written = Vec::with_capacity(encoded.len());
    for (name, bytes) in encoded {
        let file_path = out_dir.join(name);
        tokio::fs::write(&file_path, bytes).await?;
        log::debug!("wrote {}", file_path.display());
        written.push(file_path);
    }
    Ok(written)
}

fn jpeg_bytes(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(&rgb)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_names_are_one_based() {
        assert_eq!(page_file_name(0), "page_1.jpg");
        assert_eq!(page_file_name(11), "page_12.jpg");
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_selection() {
        let result = extract_pages("unused.pdf", &[], Quality::High, "/tmp").await;
        assert!(matches!(result, Err(ExtractError::NoPagesSelected)));
    }
}
