//! Executing a [`LayoutPlan`] against a pixel backend.
//!
//! The planner never touches pixels. A backend implements [`Renderer`] and
//! [`execute`] drives it through the plan, one capability per instruction.

use crate::plan::{BackgroundRect, CropRect, LayoutPlan, Resize};

/// Pixel operations a plan can ask for.
///
/// Each operation consumes its input image and returns a new one.
/// Rectangles carry fractional geometry; backends that work in whole
/// pixels can snap with [`CropRect::to_pixels`] and
/// [`BackgroundRect::to_pixels`].
pub trait Renderer {
    /// Where the source is read from (path, buffer, handle).
    type Source: ?Sized;
    /// Where the result is written to.
    type Destination: ?Sized;
    /// Decoded pixel data.
    type Image;
    /// Backend error type.
    type Error;

    /// Decode the source, shrinking by `shrink` (1, 2, 4, or 8) if above 1.
    fn decode(&mut self, source: &Self::Source, shrink: u32) -> Result<Self::Image, Self::Error>;

    /// Extract `rect`. Area outside the image is filled, not rejected.
    fn crop(&mut self, image: Self::Image, rect: CropRect) -> Result<Self::Image, Self::Error>;

    /// Scale each axis by its factor.
    fn resize(&mut self, image: Self::Image, factors: Resize) -> Result<Self::Image, Self::Error>;

    /// Place the image at `(rect.x, rect.y)` on a `rect.width × rect.height`
    /// canvas of `rect.color`.
    fn composite(
        &mut self,
        image: Self::Image,
        rect: BackgroundRect,
    ) -> Result<Self::Image, Self::Error>;

    /// Write the finished image.
    fn encode(
        &mut self,
        image: Self::Image,
        destination: &mut Self::Destination,
    ) -> Result<(), Self::Error>;
}

/// Apply `plan` to `source` and write the result to `destination`.
///
/// Instructions run in the order load, crop, resize, background; absent
/// ones are skipped. With shrink-on-load the crop is scaled down to match
/// the smaller decoded image. Stops at the first backend error.
pub fn execute<R: Renderer>(
    plan: &LayoutPlan,
    renderer: &mut R,
    source: &R::Source,
    destination: &mut R::Destination,
) -> Result<(), R::Error> {
    let shrink = plan.load.map_or(1, |f| f.get());
    let mut image = renderer.decode(source, shrink)?;
    if let Some(rect) = plan.crop_after_load() {
        image = renderer.crop(image, rect)?;
    }
    if let Some(factors) = plan.resize {
        image = renderer.resize(image, factors)?;
    }
    if let Some(rect) = plan.background {
        image = renderer.composite(image, rect)?;
    }
    renderer.encode(image, destination)
}
