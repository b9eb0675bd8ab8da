use thiserror::Error;

use crate::constants::{MAX_ZOOM, MIN_ZOOM};

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Photo limit of {0} reached")]
    BoardFull(usize),
    #[error("Only {got} photos loaded, a composition needs at least {needed}")]
    NotComposable { got: usize, needed: usize },
    #[error("Photo image for slot {0} does not match the photo's natural size")]
    PhotoMismatch(usize),
}

pub type Result<T> = std::result::Result<T, CollageError>;

/// A rectangular area on the canvas, in logical pixels.
///
/// `x`/`y` is the top-left corner (the canvas origin is top-left,
/// y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Background color presets offered by the compositor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackgroundColor {
    /// Light gray (the default)
    #[default]
    LightGray,
    /// Warm gray
    WarmGray,
    /// Beige
    Beige,
    /// Off white
    OffWhite,
    /// Muted blue
    MutedBlue,
    /// Arbitrary RGB color
    Custom { rgb: [u8; 3] },
}

impl BackgroundColor {
    /// All preset colors, in palette order
    pub const PRESETS: [BackgroundColor; 5] = [
        BackgroundColor::LightGray,
        BackgroundColor::WarmGray,
        BackgroundColor::Beige,
        BackgroundColor::OffWhite,
        BackgroundColor::MutedBlue,
    ];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            BackgroundColor::LightGray => [0xe6, 0xe7, 0xe9],
            BackgroundColor::WarmGray => [0xd7, 0xd2, 0xc9],
            BackgroundColor::Beige => [0xe7, 0xdf, 0xd0],
            BackgroundColor::OffWhite => [0xf3, 0xf1, 0xeb],
            BackgroundColor::MutedBlue => [0xd2, 0xdb, 0xe2],
            BackgroundColor::Custom { rgb } => rgb,
        }
    }
}

/// Canvas background: a flat preset color, optionally replaced by a
/// user-supplied image drawn cover-fit and blurred.
///
/// The board only tracks the image's natural size; the pixel data stays with
/// the host that decoded it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Background {
    pub color: BackgroundColor,
    pub image: Option<(u32, u32)>,
}

/// One user-supplied photo placed in the composition.
///
/// Natural dimensions are fixed at decode time; `scale` and the offsets are
/// the user's view adjustments, kept inside their legal ranges by the
/// transform engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Photo {
    pub natural_width: u32,
    pub natural_height: u32,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Photo {
    pub fn new(natural_width: u32, natural_height: u32) -> Self {
        Self {
            natural_width,
            natural_height,
            scale: MIN_ZOOM,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Clamp a value into `[min, max]`
#[inline]
pub(crate) fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Clamp a zoom factor into the legal zoom range
#[inline]
pub(crate) fn clamp_zoom(value: f32) -> f32 {
    clamp(value, MIN_ZOOM, MAX_ZOOM)
}
