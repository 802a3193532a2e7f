//! The raster surface: pixel buffer plus outline/stroke primitives.

use crate::export::ImageData;
use crate::RenderResult;
use kurbo::{Point, Rect};
use peniko::Color;
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Fill used on creation, on every resize and by [`Surface::clear`].
pub const BACKGROUND: Color = Color::WHITE;

/// An opaque raster buffer the whiteboard draws into.
///
/// Every primitive rasterizes immediately; nothing is retained besides the
/// pixels themselves.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Create a surface of the given size, filled with [`BACKGROUND`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: blank_pixmap(width, height),
        }
    }

    /// Reallocate the buffer at the given size and fill it with [`BACKGROUND`].
    ///
    /// Existing content is discarded, even when the size does not change.
    pub fn initialize(&mut self, width: u32, height: u32) {
        self.pixmap = blank_pixmap(width, height);
        log::debug!("Surface initialized at {}x{}", self.width(), self.height());
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole buffer with [`BACKGROUND`].
    pub fn clear(&mut self) {
        self.pixmap.fill(skia_color(BACKGROUND));
    }

    /// Stroke a single round-capped, round-joined segment.
    ///
    /// A zero-length segment leaves a round dot `width` across, as a tap with
    /// the pencil does.
    pub fn draw_line_segment(&mut self, from: Point, to: Point, color: Color, width: f64) {
        if from == to {
            self.draw_dot(from, color, width);
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, width, LineJoin::Round);
        }
    }

    /// Stroke an unfilled rectangle spanning two opposite corners.
    ///
    /// The corners may come in any order; the rectangle is normalized first.
    pub fn draw_rectangle_outline(&mut self, corner1: Point, corner2: Point, color: Color, width: f64) {
        let rect = Rect::from_points(corner1, corner2);
        let (x0, y0, x1, y1) = (rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32);

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y0);
        pb.line_to(x1, y1);
        pb.line_to(x0, y1);
        pb.close();
        if let Some(path) = pb.finish() {
            self.stroke(&path, color, width, LineJoin::Miter);
        }
    }

    /// Stroke an unfilled circle. A zero radius draws nothing.
    pub fn draw_circle_outline(&mut self, center: Point, radius: f64, color: Color, width: f64) {
        if radius <= 0.0 {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.stroke(&path, color, width, LineJoin::Round);
        }
    }

    /// Read back one pixel as straight-alpha RGBA8.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Read back the whole buffer as straight-alpha RGBA8.
    pub fn image_data(&self) -> ImageData {
        ImageData::from_pixmap(&self.pixmap)
    }

    /// Encode the current buffer as PNG.
    pub fn export_image_bytes(&self) -> RenderResult<Vec<u8>> {
        self.image_data().encode_png()
    }

    /// Copy the buffer out for later [`Surface::restore`].
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            pixmap: self.pixmap.clone(),
        }
    }

    /// Copy a snapshot back into the buffer.
    ///
    /// Returns `false` and leaves the buffer untouched when the snapshot was
    /// taken at a different size.
    pub fn restore(&mut self, snapshot: &SurfaceSnapshot) -> bool {
        if snapshot.width() != self.width() || snapshot.height() != self.height() {
            log::warn!(
                "Ignoring {}x{} snapshot on {}x{} surface",
                snapshot.width(),
                snapshot.height(),
                self.width(),
                self.height()
            );
            return false;
        }
        self.pixmap.data_mut().copy_from_slice(snapshot.pixmap.data());
        true
    }

    fn draw_dot(&mut self, center: Point, color: Color, width: f64) {
        if width <= 0.0 {
            return;
        }
        let radius = (width / 2.0) as f32;
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius) {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke(&mut self, path: &Path, color: Color, width: f64, line_join: LineJoin) {
        if width <= 0.0 {
            return;
        }
        let paint = paint_for(color);
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }
}

/// A full copy of a surface's pixels.
#[derive(Clone)]
pub struct SurfaceSnapshot {
    pixmap: Pixmap,
}

impl SurfaceSnapshot {
    /// Width of the surface the snapshot was taken from.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height of the surface the snapshot was taken from.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

impl std::fmt::Debug for SurfaceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceSnapshot")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Allocate a background-filled pixmap. A raster buffer cannot be empty, so
/// zero dimensions are bumped to one pixel.
fn blank_pixmap(width: u32, height: u32) -> Pixmap {
    if width == 0 || height == 0 {
        log::warn!("Clamping {}x{} surface to at least 1x1", width, height);
    }
    let (width, height) = (width.max(1), height.max(1));
    let mut pixmap = match Pixmap::new(width, height) {
        Some(pixmap) => pixmap,
        None => {
            log::warn!("Cannot allocate {}x{} surface, falling back to 1x1", width, height);
            Pixmap::new(1, 1).unwrap_or_else(|| unreachable!("1x1 pixmap is always valid"))
        }
    };
    pixmap.fill(skia_color(BACKGROUND));
    pixmap
}
