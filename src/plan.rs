//! Layout plans: the instructions a renderer executes for one request.

use core::fmt;

use num_traits::Float;

use crate::constraint::{LayoutError, RequestParams, Resolved, Size, normalize};
use crate::constraint::{resolve_mode, resolve_scale};
use crate::source::ImageInfo;

/// Power-of-two shrink applied while decoding.
///
/// A factor of 1 is not representable: no shrink means no `load`
/// instruction at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShrinkFactor {
    X2,
    X4,
    X8,
}

impl ShrinkFactor {
    /// Integer factor (2, 4, or 8).
    pub const fn get(self) -> u32 {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }

    /// Map an integer factor back; `None` for 1 and anything unsupported.
    pub const fn from_factor(f: u32) -> Option<Self> {
        match f {
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            8 => Some(Self::X8),
            _ => None,
        }
    }
}

/// Region of the source to retain, centered on the source.
///
/// Offsets follow the embed convention: the source is placed at
/// `(x, y)` inside a `width × height` window. Offsets may be negative or
/// push the window past the source edges; the renderer fills any area
/// outside the source with background instead of rejecting it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    /// The same region in the coordinates of a source decoded with
    /// shrink-on-load.
    pub fn after_load(self, factor: ShrinkFactor) -> Self {
        let f = factor.get() as f64;
        Self {
            x: self.x / f,
            y: self.y / f,
            width: self.width / f,
            height: self.height / f,
        }
    }

    /// Snap to whole pixels.
    pub fn to_pixels(&self) -> PixelRect {
        PixelRect::snap(self.x, self.y, self.width, self.height)
    }
}

/// Scale factors, output length over input length per axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resize {
    pub wfactor: f64,
    pub hfactor: f64,
}

/// Fill used for padding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Background {
    /// Opaque white.
    White,
    /// Fully transparent. Only chosen when the output supports alpha.
    Alpha,
}

/// Canvas to place the resized image on.
///
/// The image is placed at `(x, y)` inside a `width × height` canvas of
/// `color`. In crop mode with the canvas policy the image can be larger
/// than the canvas on one axis; the offset is then negative and the
/// overflow is clipped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Background,
}

impl BackgroundRect {
    /// Snap to whole pixels.
    pub fn to_pixels(&self) -> PixelRect {
        PixelRect::snap(self.x, self.y, self.width, self.height)
    }
}

/// Integer rectangle for renderers that cannot take fractional geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Round offsets to the nearest pixel; extents round too, but never below 1.
    fn snap(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Float::round(x) as i64,
            y: Float::round(y) as i64,
            width: Float::round(width).max(1.0) as u32,
            height: Float::round(height).max(1.0) as u32,
        }
    }
}

/// The complete set of instructions for one request.
///
/// Each field is independent and optional. A renderer applies what is
/// present in the order load → crop → resize → background. The empty plan
/// means the source can be passed through untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LayoutPlan {
    /// Decode-time shrink. Only present together with `resize`.
    pub load: Option<ShrinkFactor>,
    /// Region of the source to keep, in full-resolution source coordinates.
    pub crop: Option<CropRect>,
    /// Residual scale after any decode-time shrink.
    pub resize: Option<Resize>,
    /// Padding canvas.
    pub background: Option<BackgroundRect>,
}

impl LayoutPlan {
    /// No work to do.
    pub const EMPTY: Self = Self {
        load: None,
        crop: None,
        resize: None,
        background: None,
    };

    /// Whether the plan has no instructions.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Crop in the coordinates the renderer sees after decoding.
    pub fn crop_after_load(&self) -> Option<CropRect> {
        let crop = self.crop?;
        Some(match self.load {
            Some(f) => crop.after_load(f),
            None => crop,
        })
    }

    /// Final output size when the plan is applied to a source of `source` size.
    pub fn output_size(&self, source: Size) -> Size {
        let mut size = match self.load {
            Some(f) => {
                let f = f.get() as f64;
                Size::new(source.width / f, source.height / f)
            }
            None => source,
        };
        if let Some(c) = self.crop_after_load() {
            size = Size::new(c.width, c.height);
        }
        if let Some(r) = self.resize {
            size = Size::new(size.width * r.wfactor, size.height * r.hfactor);
        }
        if let Some(bg) = self.background {
            size = Size::new(bg.width, bg.height);
        }
        size
    }
}

impl fmt::Display for LayoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("{}");
        }
        let mut sep = "";
        if let Some(load) = self.load {
            write!(f, "load={}", load.get())?;
            sep = " ";
        }
        if let Some(c) = self.crop {
            write!(f, "{sep}crop=({},{},{},{})", c.x, c.y, c.width, c.height)?;
            sep = " ";
        }
        if let Some(r) = self.resize {
            write!(f, "{sep}resize={}x{}", r.wfactor, r.hfactor)?;
            sep = " ";
        }
        if let Some(bg) = self.background {
            let color = match bg.color {
                Background::White => "white",
                Background::Alpha => "alpha",
            };
            write!(
                f,
                "{sep}bg=({},{},{},{},{color})",
                bg.x, bg.y, bg.width, bg.height
            )?;
        }
        Ok(())
    }
}

/// Largest power-of-two decode shrink that does not overshoot either axis.
///
/// Factors are output/input, so values below 1 shrink. Returns 1, 2, 4 or 8.
///
/// # Panics
///
/// Panics if either factor is not strictly positive. Resize factors
/// computed from valid sizes never are.
pub fn shrink_factor(wfactor: f64, hfactor: f64) -> u32 {
    assert!(wfactor > 0.0, "non-positive wfactor: {wfactor}");
    assert!(hfactor > 0.0, "non-positive hfactor: {hfactor}");
    if wfactor > 0.5 || hfactor > 0.5 {
        1
    } else if wfactor > 0.25 || hfactor > 0.25 {
        2
    } else if wfactor > 0.125 || hfactor > 0.125 {
        4
    } else {
        8
    }
}

/// Turn resolved sizes into plan instructions.
pub fn emit(info: &ImageInfo, sizes: Resolved, source: Size) -> LayoutPlan {
    let Resolved {
        target,
        canvas,
        crop,
    } = sizes;

    let crop_rect = (crop != source).then(|| CropRect {
        x: 0.5 * (crop.width - source.width),
        y: 0.5 * (crop.height - source.height),
        width: crop.width,
        height: crop.height,
    });

    let background = (canvas != target).then(|| BackgroundRect {
        x: 0.5 * (canvas.width - target.width),
        y: 0.5 * (canvas.height - target.height),
        width: canvas.width,
        height: canvas.height,
        color: if info.has_alpha {
            Background::Alpha
        } else {
            Background::White
        },
    });

    let mut wfactor = target.width / crop.width;
    let mut hfactor = target.height / crop.height;
    let mut load = None;
    let resize = if wfactor != 1.0 || hfactor != 1.0 {
        if info.shrink_on_load
            && let Some(f) = ShrinkFactor::from_factor(shrink_factor(wfactor, hfactor))
        {
            // Emit the residual scale left over after the decoder's shrink.
            let scale = f.get() as f64;
            wfactor *= scale;
            hfactor *= scale;
            load = Some(f);
        }
        Some(Resize { wfactor, hfactor })
    } else {
        None
    };

    LayoutPlan {
        load,
        crop: crop_rect,
        resize,
        background,
    }
}

/// Compute the layout plan for a source image and request.
///
/// A request without width and height yields the empty plan without any
/// validation. Otherwise the first error encountered is returned, checked
/// in the order dimensions, mode, scale.
///
/// # Example
///
/// ```
/// use riapilayout::{ImageInfo, LayoutPlan, Mode, RequestParams, Resize, Scale, plan};
///
/// let info = ImageInfo::plain(640, 480);
/// let params = RequestParams::new(Mode::Max, Scale::Both).size(320, 480);
///
/// let layout = plan(&info, &params).unwrap();
/// assert_eq!(
///     layout,
///     LayoutPlan {
///         resize: Some(Resize { wfactor: 0.5, hfactor: 0.5 }),
///         ..LayoutPlan::EMPTY
///     }
/// );
/// ```
pub fn plan(info: &ImageInfo, params: &RequestParams) -> Result<LayoutPlan, LayoutError> {
    if !params.has_dimensions() {
        return Ok(LayoutPlan::EMPTY);
    }
    let source = info.size();
    if !source.is_valid() {
        return Err(LayoutError::InvalidDimension);
    }
    let Some(request) = normalize(source, params)? else {
        return Ok(LayoutPlan::EMPTY);
    };
    let sizes = resolve_mode(request.mode, request.wanted, source);
    let sizes = resolve_scale(request.scale, sizes, source);
    Ok(emit(info, sizes, source))
}
