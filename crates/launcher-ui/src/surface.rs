//! Framebuffer surface every view, menu and overlay draws into.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn twice,
//! which doesn't work for a view stack that paints backgrounds then draws on
//! top. This framebuffer allows overdraw and silently clips out-of-bounds
//! pixels, so it serves both the simulators and render smoke-tests.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Result of a draw call on a [`Surface`]; drawing itself cannot fail.
pub type DrawResult = Result<(), Infallible>;

/// Off-screen framebuffer.
pub struct Surface {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Create a new surface with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a surface matching the menu screen (640x480).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    /// Reset every pixel to background.
    pub fn fill_background(&mut self) {
        self.pixels.fill(BinaryColor::Off);
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Number of foreground pixels, used by render smoke-tests.
    pub fn black_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p == BinaryColor::On).count()
    }

    /// Foreground pixels inside `area`.
    pub fn black_pixels_in(&self, area: embedded_graphics::primitives::Rectangle) -> usize {
        area.points()
            .filter(|p| p.x >= 0 && p.y >= 0)
            .filter(|p| self.pixel(p.x as u32, p.y as u32) == Some(BinaryColor::On))
            .count()
    }
}

impl DrawTarget for Surface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
