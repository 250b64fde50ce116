//! Offscreen RGBA surface the tile is composed on.

use std::convert::Infallible;

use base64::Engine;
use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, RgbColor, Size};
use image::{Rgba, RgbaImage};

/// Icon edge length in pixels.
pub const SURFACE_SIZE: u32 = 144;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone)]
pub struct RenderSurface {
    pixels: RgbaImage,
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface {
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::from_pixel(SURFACE_SIZE, SURFACE_SIZE, TRANSPARENT),
        }
    }

    /// Resets every pixel to fully transparent.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|pixel| pixel[3] == 0)
    }

    /// Encodes the surface as PNG bytes.
    ///
    /// # Errors
    /// Returns the encoder error text if PNG encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, String> {
        use image::ImageEncoder as _;
        use image::codecs::png::{CompressionType, FilterType, PngEncoder};

        let mut buf = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buf, CompressionType::Fast, FilterType::Adaptive);
        let (w, h) = self.pixels.dimensions();
        encoder
            .write_image(self.pixels.as_raw(), w, h, image::ExtendedColorType::Rgba8)
            .map_err(|e| format!("encode: {e}"))?;
        Ok(buf)
    }

    /// Encodes the surface as a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    /// See [`RenderSurface::encode_png`].
    pub fn to_data_uri(&self) -> Result<String, String> {
        let png = self.encode_png()?;
        Ok(format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(png)
        ))
    }
}

impl DrawTarget for RenderSurface {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let size = SURFACE_SIZE as i32;
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= size || point.y >= size {
                continue;
            }
            self.pixels.put_pixel(
                point.x as u32,
                point.y as u32,
                Rgba([color.r(), color.g(), color.b(), u8::MAX]),
            );
        }
        Ok(())
    }
}

impl OriginDimensions for RenderSurface {
    fn size(&self) -> Size {
        Size::new(SURFACE_SIZE, SURFACE_SIZE)
    }
}
