//! What the planner needs to know about the source image.

use crate::constraint::Size;

/// Container format of the source, as far as layout cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Supports integer shrink during decode (DCT scaling).
    Jpeg,
    /// Output supports transparency.
    Png,
    Tiff,
    Other,
}

impl SourceFormat {
    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Self::Jpeg
        } else if ext.eq_ignore_ascii_case("png") {
            Self::Png
        } else if ext.eq_ignore_ascii_case("tif") || ext.eq_ignore_ascii_case("tiff") {
            Self::Tiff
        } else {
            Self::Other
        }
    }

    /// Guess the format from the extension of a path or file name.
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Self::from_extension(ext),
            _ => Self::Other,
        }
    }

    /// Whether the decoder can pre-shrink by 2, 4, or 8 while decoding.
    pub fn shrink_on_load(self) -> bool {
        matches!(self, Self::Jpeg)
    }

    /// Whether padding can be transparent instead of white.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Png)
    }
}

/// Source image header information.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageInfo {
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
    /// Decoder supports cheap power-of-two pre-shrink.
    pub shrink_on_load: bool,
    /// Output format supports transparency.
    pub has_alpha: bool,
}

impl ImageInfo {
    /// Header info with capabilities derived from the container format.
    pub fn new(width: u32, height: u32, format: SourceFormat) -> Self {
        Self {
            width,
            height,
            shrink_on_load: format.shrink_on_load(),
            has_alpha: format.has_alpha(),
        }
    }

    /// Header info with no decoder or output capabilities.
    pub fn plain(width: u32, height: u32) -> Self {
        Self::new(width, height, SourceFormat::Other)
    }

    /// Source dimensions as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}
