//! Resize layout planning with constraint modes, scale policies, and
//! shrink-on-load negotiation.
//!
//! Pure geometry: from source dimensions and a handful of resize
//! parameters, compute a [`LayoutPlan`] of at most four instructions
//! (decode shrink, crop, resize, background) for a renderer to execute.
//! No pixel operations, no I/O, `no_std` compatible.
//!
//! # Modules
//!
//! - [`constraint`]: Modes, scale policies, and size resolution
//! - [`source`]: Source header info and format capabilities
//! - [`plan`](mod@plan): Plan instructions, shrink factor, and [`plan()`]
//! - [`render`]: Backend trait and plan execution
//! - `riapi`: RIAPI level-1 query string parsing (feature `riapi`)
//!
//! # Example
//!
//! ```
//! use riapilayout::{ImageInfo, Mode, RequestParams, Scale, SourceFormat, ShrinkFactor, plan};
//!
//! let info = ImageInfo::new(160, 160, SourceFormat::Jpeg);
//! let params = RequestParams::new(Mode::Max, Scale::Down).size(30, 30);
//!
//! let layout = plan(&info, &params).unwrap();
//! assert_eq!(layout.load, Some(ShrinkFactor::X4));
//! assert_eq!(layout.to_string(), "load=4 resize=0.75x0.75");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;

pub mod constraint;
pub mod plan;
pub mod render;
#[cfg(feature = "riapi")]
pub mod riapi;
pub mod source;

// Re-exports: core types
pub use constraint::{LayoutError, Mode, RequestParams, Scale, Size};
pub use plan::{
    Background, BackgroundRect, CropRect, LayoutPlan, PixelRect, Resize, ShrinkFactor, plan,
    shrink_factor,
};
pub use render::{Renderer, execute};
pub use source::{ImageInfo, SourceFormat};
