//! Constraint modes, scale policies, and the size arithmetic behind them.
//!
//! A request names a box (`width` × `height`), a [`Mode`] saying how the
//! source aspect ratio is reconciled with that box, and a [`Scale`] policy
//! saying whether enlargement is allowed. Resolution produces three sizes:
//!
//! - **target**: what the retained source pixels are resized to
//! - **canvas**: the final output box (≥ target when padding)
//! - **crop**: the region of the source that is retained
//!
//! All sizes are `f64`. Nothing here rounds; pixel snapping is the
//! renderer's business.
//!
//! # Example
//!
//! ```
//! use riapilayout::{Mode, Scale, Size};
//! use riapilayout::constraint::{resolve_mode, resolve_scale};
//!
//! let source = Size::new(640.0, 480.0);
//! let wanted = Size::new(320.0, 320.0);
//!
//! let sizes = resolve_mode(Mode::Pad, wanted, source);
//! let sizes = resolve_scale(Scale::Both, sizes, source);
//!
//! assert_eq!(sizes.target, Size::new(320.0, 240.0));
//! assert_eq!(sizes.canvas, Size::new(320.0, 320.0));
//! assert_eq!(sizes.crop, source);
//! ```

use core::fmt;

/// How to reconcile the requested box with the source aspect ratio.
///
/// Maps to the RIAPI `mode` parameter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Scale to fit within the box, preserving aspect ratio.
    /// Output may be smaller than the box on one axis.
    #[default]
    Max,
    /// Scale to fit within the box, then pad to the exact box.
    Pad,
    /// Scale to fill the box, cropping the overflow evenly.
    Crop,
    /// Scale each axis independently to the exact box.
    Stretch,
}

/// Whether upscaling is allowed.
///
/// Maps to the RIAPI `scale` parameter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scale {
    /// Never enlarge pixels or canvas. Default.
    #[default]
    Down,
    /// Honor the request in both directions.
    Both,
    /// Enlarge the canvas (padding) but never the pixel content.
    Canvas,
}

/// Width × height, in fractional pixels.
///
/// Compared by exact equality: two sizes are only "the same" when
/// the arithmetic that produced them agrees bit for bit on each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest size with this aspect ratio that fits inside `other`.
    ///
    /// The constraining axis is copied from `other` verbatim rather than
    /// recomputed, so a fit along one axis is always exact.
    pub fn scale_inside(self, other: Size) -> Size {
        let wratio = other.width / self.width;
        let hratio = other.height / self.height;
        if wratio < hratio {
            Size::new(other.width, self.height * wratio)
        } else {
            Size::new(self.width * hratio, other.height)
        }
    }

    /// Whether neither axis exceeds the corresponding axis of `other`.
    pub fn fits_inside(self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    /// Both axes finite and strictly positive.
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// The three sizes produced by mode and scale resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolved {
    /// Size the retained source region is resized to.
    pub target: Size,
    /// Final output canvas.
    pub canvas: Size,
    /// Region of the source that is retained, centered.
    pub crop: Size,
}

/// Resize parameters as handed over by the request parser.
///
/// `mode` and `scale` are optional so that "missing" can be told apart
/// from a valid choice; a missing value is only an error once geometry
/// actually has to be computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mode: Option<Mode>,
    pub scale: Option<Scale>,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self::new(Mode::default(), Scale::default())
    }
}

impl RequestParams {
    /// Parameters with a mode and scale policy but no dimensions yet.
    pub fn new(mode: Mode, scale: Scale) -> Self {
        Self {
            width: None,
            height: None,
            mode: Some(mode),
            scale: Some(scale),
        }
    }

    /// Parameters with neither mode nor scale set.
    pub fn unset() -> Self {
        Self {
            width: None,
            height: None,
            mode: None,
            scale: None,
        }
    }

    /// Set the requested width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the requested height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set both requested dimensions.
    pub fn size(self, width: u32, height: u32) -> Self {
        self.width(width).height(height)
    }

    /// Whether any geometry was requested at all.
    pub fn has_dimensions(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// Requested size with any missing axis filled in, plus validated policies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Normalized {
    pub wanted: Size,
    pub mode: Mode,
    pub scale: Scale,
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// Mode missing from a request that asks for geometry.
    InvalidMode,
    /// Scale policy missing from a request that asks for geometry.
    InvalidScale,
    /// A requested or source dimension is zero.
    InvalidDimension,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidMode => "missing or invalid mode option",
            Self::InvalidScale => "missing or invalid scale option",
            Self::InvalidDimension => "width and height must be positive",
        })
    }
}

impl core::error::Error for LayoutError {}

/// Fill in an omitted width or height from the source aspect ratio.
///
/// Returns `Ok(None)` when neither dimension is present: nothing is to be
/// done, and mode/scale are deliberately left unchecked in that case.
pub fn normalize(source: Size, params: &RequestParams) -> Result<Option<Normalized>, LayoutError> {
    let (width, height) = match (params.width, params.height) {
        (None, None) => return Ok(None),
        (Some(0), _) | (_, Some(0)) => return Err(LayoutError::InvalidDimension),
        (Some(w), Some(h)) => (w as f64, h as f64),
        (Some(w), None) => {
            let w = w as f64;
            (w, w * source.height / source.width)
        }
        (None, Some(h)) => {
            let h = h as f64;
            (h * source.width / source.height, h)
        }
    };
    let mode = params.mode.ok_or(LayoutError::InvalidMode)?;
    let scale = params.scale.ok_or(LayoutError::InvalidScale)?;
    Ok(Some(Normalized {
        wanted: Size::new(width, height),
        mode,
        scale,
    }))
}

/// Derive target, canvas, and crop sizes for a mode.
pub fn resolve_mode(mode: Mode, wanted: Size, source: Size) -> Resolved {
    match mode {
        Mode::Max => {
            let target = source.scale_inside(wanted);
            Resolved {
                target,
                canvas: target,
                crop: source,
            }
        }
        Mode::Pad => Resolved {
            target: source.scale_inside(wanted),
            canvas: wanted,
            crop: source,
        },
        // Shrink the requested box until it fits the source: that is the
        // largest centered region with the output aspect ratio.
        Mode::Crop => Resolved {
            target: wanted,
            canvas: wanted,
            crop: wanted.scale_inside(source),
        },
        Mode::Stretch => Resolved {
            target: wanted,
            canvas: wanted,
            crop: source,
        },
    }
}

/// Apply the upscaling policy to resolved sizes.
pub fn resolve_scale(scale: Scale, sizes: Resolved, source: Size) -> Resolved {
    let enlarges = sizes.crop.fits_inside(sizes.target);
    match scale {
        Scale::Down if enlarges => Resolved {
            target: source,
            canvas: source,
            crop: source,
        },
        Scale::Canvas if enlarges => Resolved {
            target: source,
            canvas: sizes.canvas,
            crop: source,
        },
        Scale::Down | Scale::Both | Scale::Canvas => sizes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: Size = Size::new(640.0, 480.0);

    fn params(w: Option<u32>, h: Option<u32>) -> RequestParams {
        RequestParams {
            width: w,
            height: h,
            ..RequestParams::new(Mode::Max, Scale::Both)
        }
    }

    // ── Size ────────────────────────────────────────────────────────────

    #[test]
    fn scale_inside_width_limited() {
        // 640×480 into 320×480 → width constrains
        assert_eq!(
            SRC.scale_inside(Size::new(320.0, 480.0)),
            Size::new(320.0, 240.0)
        );
    }

    #[test]
    fn scale_inside_height_limited() {
        assert_eq!(
            SRC.scale_inside(Size::new(640.0, 240.0)),
            Size::new(320.0, 240.0)
        );
    }

    #[test]
    fn scale_inside_upscales() {
        assert_eq!(
            SRC.scale_inside(Size::new(2000.0, 960.0)),
            Size::new(1280.0, 960.0)
        );
    }

    #[test]
    fn scale_inside_same_aspect_is_exact() {
        assert_eq!(
            SRC.scale_inside(Size::new(320.0, 240.0)),
            Size::new(320.0, 240.0)
        );
    }

    #[test]
    fn scale_inside_reversed_gives_crop_region() {
        // 320×120 (8:3) box shrunk into the 640×480 source
        assert_eq!(
            Size::new(320.0, 120.0).scale_inside(SRC),
            Size::new(640.0, 240.0)
        );
    }

    #[test]
    fn fits_inside_is_elementwise() {
        assert!(SRC.fits_inside(SRC));
        assert!(SRC.fits_inside(Size::new(960.0, 960.0)));
        assert!(!SRC.fits_inside(Size::new(320.0, 960.0)));
        assert!(!SRC.fits_inside(Size::new(960.0, 479.0)));
    }

    #[test]
    fn is_valid_rejects_degenerate() {
        assert!(SRC.is_valid());
        assert!(!Size::new(0.0, 1.0).is_valid());
        assert!(!Size::new(1.0, f64::NAN).is_valid());
        assert!(!Size::new(f64::INFINITY, 1.0).is_valid());
    }

    // ── normalize ───────────────────────────────────────────────────────

    #[test]
    fn normalize_without_dimensions_skips_validation() {
        assert_eq!(normalize(SRC, &RequestParams::unset()), Ok(None));
    }

    #[test]
    fn normalize_infers_height() {
        let n = normalize(SRC, &params(Some(160), None)).unwrap().unwrap();
        assert_eq!(n.wanted, Size::new(160.0, 120.0));
    }

    #[test]
    fn normalize_infers_width() {
        let n = normalize(SRC, &params(None, Some(120))).unwrap().unwrap();
        assert_eq!(n.wanted, Size::new(160.0, 120.0));
    }

    #[test]
    fn normalize_keeps_fractional_inference() {
        // 640×480 at w=100 → h=75, at h=100 → w=133.33…
        let n = normalize(SRC, &params(None, Some(100))).unwrap().unwrap();
        assert_eq!(n.wanted.width, 100.0 * 640.0 / 480.0);
        assert_eq!(n.wanted.height, 100.0);
    }

    #[test]
    fn normalize_passes_both_through() {
        let n = normalize(SRC, &params(Some(1), Some(9999)))
            .unwrap()
            .unwrap();
        assert_eq!(n.wanted, Size::new(1.0, 9999.0));
    }

    #[test]
    fn normalize_rejects_zero() {
        assert_eq!(
            normalize(SRC, &params(Some(0), Some(10))),
            Err(LayoutError::InvalidDimension)
        );
        assert_eq!(
            normalize(SRC, &params(None, Some(0))),
            Err(LayoutError::InvalidDimension)
        );
    }

    #[test]
    fn normalize_requires_mode_then_scale() {
        let missing_both = RequestParams::unset().width(10);
        assert_eq!(normalize(SRC, &missing_both), Err(LayoutError::InvalidMode));

        let missing_scale = RequestParams {
            mode: Some(Mode::Crop),
            ..missing_both
        };
        assert_eq!(
            normalize(SRC, &missing_scale),
            Err(LayoutError::InvalidScale)
        );
    }

    // ── resolve_mode ────────────────────────────────────────────────────

    #[test]
    fn mode_max_canvas_equals_target() {
        let r = resolve_mode(Mode::Max, Size::new(320.0, 320.0), SRC);
        assert_eq!(r.target, Size::new(320.0, 240.0));
        assert_eq!(r.canvas, r.target);
        assert_eq!(r.crop, SRC);
    }

    #[test]
    fn mode_pad_canvas_is_wanted() {
        let r = resolve_mode(Mode::Pad, Size::new(400.0, 240.0), SRC);
        assert_eq!(r.target, Size::new(320.0, 240.0));
        assert_eq!(r.canvas, Size::new(400.0, 240.0));
        assert_eq!(r.crop, SRC);
    }

    #[test]
    fn mode_crop_keeps_output_aspect() {
        let r = resolve_mode(Mode::Crop, Size::new(160.0, 240.0), SRC);
        assert_eq!(r.target, Size::new(160.0, 240.0));
        assert_eq!(r.canvas, r.target);
        assert_eq!(r.crop, Size::new(320.0, 480.0));
    }

    #[test]
    fn mode_stretch_ignores_aspect() {
        let r = resolve_mode(Mode::Stretch, Size::new(160.0, 240.0), SRC);
        assert_eq!(r.target, Size::new(160.0, 240.0));
        assert_eq!(r.canvas, r.target);
        assert_eq!(r.crop, SRC);
    }

    // ── resolve_scale ───────────────────────────────────────────────────

    #[test]
    fn scale_down_collapses_enlargement() {
        let r = resolve_mode(Mode::Pad, Size::new(960.0, 960.0), SRC);
        let r = resolve_scale(Scale::Down, r, SRC);
        assert_eq!(
            r,
            Resolved {
                target: SRC,
                canvas: SRC,
                crop: SRC
            }
        );
    }

    #[test]
    fn scale_down_keeps_reduction() {
        let r = resolve_mode(Mode::Max, Size::new(320.0, 960.0), SRC);
        assert_eq!(resolve_scale(Scale::Down, r, SRC), r);
    }

    #[test]
    fn scale_both_never_adjusts() {
        let r = resolve_mode(Mode::Pad, Size::new(960.0, 960.0), SRC);
        assert_eq!(resolve_scale(Scale::Both, r, SRC), r);
    }

    #[test]
    fn scale_canvas_keeps_padding_only() {
        let r = resolve_mode(Mode::Pad, Size::new(960.0, 960.0), SRC);
        let r = resolve_scale(Scale::Canvas, r, SRC);
        assert_eq!(r.target, SRC);
        assert_eq!(r.crop, SRC);
        assert_eq!(r.canvas, Size::new(960.0, 960.0));
    }

    #[test]
    fn display_messages() {
        use alloc::string::ToString;
        assert_eq!(
            LayoutError::InvalidMode.to_string(),
            "missing or invalid mode option"
        );
    }
}
