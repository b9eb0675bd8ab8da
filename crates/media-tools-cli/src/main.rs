use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use photo_collage::constants::{MAX_PHOTOS, MIN_PHOTOS};

#[derive(Parser)]
#[command(name = "mediat", about = "Media tools CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a photo collage JPEG from 3-12 images
    Collage {
        /// Input image file(s), in slot order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output JPEG file
        #[arg(short, long)]
        output: PathBuf,

        /// Canvas background color (overrides the config file)
        #[arg(long, value_enum)]
        background: Option<BackgroundArg>,

        /// Image drawn blurred behind the frames instead of the flat color
        #[arg(long)]
        background_image: Option<PathBuf>,

        /// Optional JSON config with background and export quality
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Merge two or more PDFs into one
    Merge {
        /// Input PDF file(s), in merge order
        #[arg(short, long, required = true, num_args = 2..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Export PDF pages as JPEG images
    Extract {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the page JPEGs
        #[arg(short, long)]
        output: PathBuf,

        /// 1-based page numbers to export (default: every page)
        #[arg(long, value_delimiter = ',')]
        pages: Vec<usize>,

        /// Export quality
        #[arg(long, default_value = "high", value_enum)]
        quality: QualityArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackgroundArg {
    LightGray,
    WarmGray,
    Beige,
    OffWhite,
    MutedBlue,
}

#[derive(Clone, Copy, ValueEnum)]
enum QualityArg {
    High,
    Low,
}

impl From<BackgroundArg> for photo_collage::BackgroundColor {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::LightGray => Self::LightGray,
            BackgroundArg::WarmGray => Self::WarmGray,
            BackgroundArg::Beige => Self::Beige,
            BackgroundArg::OffWhite => Self::OffWhite,
            BackgroundArg::MutedBlue => Self::MutedBlue,
        }
    }
}

impl From<QualityArg> for pdf_to_jpg::Quality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::High => Self::High,
            QualityArg::Low => Self::Low,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Collage {
            input,
            output,
            background,
            background_image,
            config,
        } => {
            let mut options = match config {
                Some(path) => photo_collage::CollageOptions::load(&path).await?,
                None => photo_collage::CollageOptions::default(),
            };
            if let Some(background) = background {
                options.background = background.into();
            }

            let accepted = &input[..input.len().min(MAX_PHOTOS)];
            let skipped = input.len() - accepted.len();

            let mut board = photo_collage::CollageBoard::new();
            board.set_background_color(options.background);

            let mut images = Vec::with_capacity(accepted.len());
            for path in accepted {
                let image = photo_collage::load_image(path).await?;
                board.add_photo(image.width(), image.height())?;
                images.push(image);
            }

            if !board.is_composable() {
                bail!(
                    "a collage needs at least {MIN_PHOTOS} images, got {}",
                    images.len()
                );
            }

            let background_pixels = match &background_image {
                Some(path) => Some(photo_collage::load_image(path).await?),
                None => None,
            };
            board.set_background_image(
                background_pixels.as_ref().map(|i| (i.width(), i.height())),
            );

            let canvas = photo_collage::compose(&board, &images, background_pixels.as_ref())?;
            photo_collage::save_jpeg(canvas, options.jpeg_quality, &output).await?;

            println!("Composed {} photos → {}", images.len(), output.display());
            if skipped > 0 {
                println!("Skipped {skipped} image(s) over the limit of {MAX_PHOTOS}");
            }
        }

        Commands::Merge { input, output } => {
            let documents = pdf_merge::load_multiple_pdfs(&input).await?;
            let merged = pdf_merge::merge(&documents).await?;
            let page_count = merged.get_pages().len();

            pdf_merge::save_pdf(merged, &output).await?;
            println!(
                "Merged {} documents ({page_count} pages) → {}",
                input.len(),
                output.display()
            );
        }

        Commands::Extract {
            input,
            output,
            pages,
            quality,
        } => {
            let page_count = pdf_to_jpg::page_count(&input).await?;

            let page_indices: Vec<usize> = if pages.is_empty() {
                (0..page_count).collect()
            } else {
                let mut indices = Vec::with_capacity(pages.len());
                for page in pages {
                    if page == 0 || page > page_count {
                        bail!("page {page} out of range, the document has {page_count} pages");
                    }
                    indices.push(page - 1);
                }
                indices
            };

            let written =
                pdf_to_jpg::extract_pages(&input, &page_indices, quality.into(), &output).await?;
            println!("Exported {} page(s) → {}", written.len(), output.display());
        }
    }

    Ok(())
}
