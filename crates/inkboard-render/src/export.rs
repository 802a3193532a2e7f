//! Pixel readback and PNG encoding.

use crate::RenderResult;
use tiny_skia::Pixmap;

/// Straight-alpha pixels read back from a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// RGBA pixel data (4 bytes per pixel, row-major).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl ImageData {
    pub(crate) fn from_pixmap(pixmap: &Pixmap) -> Self {
        // The pixmap stores premultiplied color; PNG wants straight alpha.
        let rgba_data = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();

        Self {
            rgba_data,
            width: pixmap.width(),
            height: pixmap.height(),
        }
    }

    /// Get one pixel, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.rgba_data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Check whether every pixel equals `rgba`.
    pub fn is_uniform(&self, rgba: [u8; 4]) -> bool {
        self.rgba_data.chunks_exact(4).all(|px| px == rgba)
    }

    /// Count pixels that differ from `rgba`.
    pub fn count_differing(&self, rgba: [u8; 4]) -> usize {
        self.rgba_data.chunks_exact(4).filter(|px| *px != rgba).count()
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.rgba_data)?;
        }
        log::debug!(
            "Encoded {}x{} PNG ({} bytes)",
            self.width,
            self.height,
            buf.len()
        );
        Ok(buf)
    }
}
