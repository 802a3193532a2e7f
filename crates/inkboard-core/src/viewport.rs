//! Viewport-to-surface coordinate translation.

use kurbo::{Point, Vec2};

/// Where the surface currently sits inside the viewport.
///
/// Hosts answer from live layout (scrolling and resizing move the surface),
/// and the controller asks again for every pointer event.
pub trait SurfaceBounds {
    /// Top-left corner of the surface, in viewport coordinates.
    fn origin(&self) -> Point;
}

impl<F> SurfaceBounds for F
where
    F: Fn() -> Point,
{
    fn origin(&self) -> Point {
        self()
    }
}

/// Bounds that never move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedBounds {
    pub origin: Point,
}

impl FixedBounds {
    pub fn new(origin: Point) -> Self {
        Self { origin }
    }
}

impl SurfaceBounds for FixedBounds {
    fn origin(&self) -> Point {
        self.origin
    }
}

/// Convert a viewport point to surface coordinates.
pub fn viewport_to_surface(bounds: &dyn SurfaceBounds, viewport_point: Point) -> Point {
    viewport_point - bounds.origin().to_vec2()
}

/// Convert a surface point to viewport coordinates.
///
/// Host-facing: the controller only translates inward, hosts use this to
/// place overlays (such as a text box) over surface content.
pub fn surface_to_viewport(bounds: &dyn SurfaceBounds, surface_point: Point) -> Point {
    surface_point + bounds.origin().to_vec2()
}

/// Offset between the two spaces, for hosts that position overlays.
pub fn surface_offset(bounds: &dyn SurfaceBounds) -> Vec2 {
    bounds.origin().to_vec2()
}
