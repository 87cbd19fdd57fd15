//! Game metadata shown next to the disc list.
//!
//! Parsing and storing metadata files belongs to the emulator side; the menu
//! only asks a [`GameInfoSource`] for the info of a named entry and treats a
//! missing answer as "no info available".

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{
    image::{Image, ImageRaw},
    pixelcolor::BinaryColor,
    prelude::*,
};

use crate::filesystem::{join_path, FileSystem};

/// 1-bit screenshot, rows packed MSB first and padded to whole bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Screenshot {
    /// Threshold 8-bit luma samples into a 1-bit image (dark = foreground).
    pub fn from_luma(width: u32, height: u32, luma: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || luma.len() != (width * height) as usize {
            return None;
        }
        let stride = width.div_ceil(8) as usize;
        let mut data = vec![0u8; stride * height as usize];
        for (i, sample) in luma.iter().enumerate() {
            if *sample < 128 {
                let x = i % width as usize;
                let y = i / width as usize;
                data[y * stride + x / 8] |= 0x80 >> (x % 8);
            }
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Decode a PNG screenshot. Undecodable data yields `None`.
    #[cfg(feature = "std")]
    pub fn from_png(bytes: &[u8]) -> Option<Self> {
        match image::load_from_memory_with_format(bytes, image::ImageFormat::Png) {
            Ok(decoded) => {
                let luma = decoded.to_luma8();
                Self::from_luma(luma.width(), luma.height(), luma.as_raw())
            }
            Err(err) => {
                log::warn!("screenshot decode failed: {}", err);
                None
            }
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn draw<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        top_left: Point,
    ) -> Result<(), D::Error> {
        let raw: ImageRaw<BinaryColor> = ImageRaw::new(&self.data, self.width);
        Image::new(&raw, top_left).draw(display)
    }
}

/// Metadata for one game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameInfo {
    pub name: Option<String>,
    pub author: Option<String>,
    pub year: Option<u16>,
    pub screenshot: Option<Screenshot>,
}

impl GameInfo {
    /// Bare info carrying only a name, used when no metadata exists.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_screenshot(mut self, screenshot: Screenshot) -> Self {
        self.screenshot = Some(screenshot);
        self
    }
}

/// Looks up metadata for a disc-list entry.
pub trait GameInfoSource {
    /// Metadata for the entry named `name`, or `None` when there is none.
    fn load(&mut self, name: &str) -> Option<GameInfo>;
}

/// In-memory metadata keyed by entry name.
#[derive(Debug, Default, Clone)]
pub struct GameInfoCatalog {
    games: BTreeMap<String, GameInfo>,
}

impl GameInfoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, info: GameInfo) {
        self.games.insert(name.to_string(), info);
    }

    pub fn with(mut self, name: &str, info: GameInfo) -> Self {
        self.insert(name, info);
        self
    }
}

impl GameInfoSource for GameInfoCatalog {
    fn load(&mut self, name: &str) -> Option<GameInfo> {
        let info = self.games.get(name).cloned();
        if info.is_none() {
            log::debug!("no game info for '{}'", name);
        }
        info
    }
}

/// Metadata stored next to the game library as `<entry>.info` text files,
/// with an optional `<entry>.png` screenshot.
///
/// ```text
/// name=Elite
/// author=Bell & Braben
/// year=1985
/// ```
pub struct MetadataDirectory<F> {
    fs: F,
    base_path: String,
}

impl<F: FileSystem> MetadataDirectory<F> {
    pub fn new(fs: F, base_path: &str) -> Self {
        Self {
            fs,
            base_path: base_path.to_string(),
        }
    }

    /// Parse the `key=value` body of an info file. Unknown keys are skipped.
    pub fn parse_info(raw: &str) -> GameInfo {
        let mut info = GameInfo::default();
        for (key, value) in raw
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.trim(), v.trim()))
        {
            match key {
                "name" => info.name = Some(value.to_string()),
                "author" => info.author = Some(value.to_string()),
                "year" => info.year = value.parse().ok(),
                _ => log::debug!("game info: skipping key '{}'", key),
            }
        }
        info
    }

    #[cfg(feature = "std")]
    fn load_screenshot(&mut self, name: &str) -> Option<Screenshot> {
        let path = join_path(&self.base_path, &format!("{}.png", name));
        let bytes = self.fs.read_file(&path).ok()?;
        Screenshot::from_png(&bytes)
    }

    #[cfg(not(feature = "std"))]
    fn load_screenshot(&mut self, _name: &str) -> Option<Screenshot> {
        None
    }
}

impl<F: FileSystem> GameInfoSource for MetadataDirectory<F> {
    fn load(&mut self, name: &str) -> Option<GameInfo> {
        let path = join_path(&self.base_path, &format!("{}.info", name));
        let raw = match self.fs.read_file(&path) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("no game info at {}: {}", path, err);
                return None;
            }
        };
        let mut info = Self::parse_info(&String::from_utf8_lossy(&raw));
        info.screenshot = self.load_screenshot(name);
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    #[test]
    fn catalog_lookup_is_optional() {
        let mut catalog =
            GameInfoCatalog::new().with("elite.d64", GameInfo::named("Elite").with_year(1985));
        assert_eq!(catalog.load("elite.d64").and_then(|g| g.year), Some(1985));
        assert_eq!(catalog.load("missing.d64"), None);
    }

    #[test]
    fn luma_threshold_packs_rows() {
        let shot = Screenshot::from_luma(3, 2, &[0, 255, 0, 255, 255, 10]).unwrap();
        assert_eq!(shot.data, [0b1010_0000, 0b0010_0000]);
        assert_eq!(shot.size(), Size::new(3, 2));
    }

    #[test]
    fn mismatched_luma_is_rejected() {
        assert!(Screenshot::from_luma(4, 4, &[0; 3]).is_none());
        assert!(Screenshot::from_luma(0, 0, &[]).is_none());
    }

    #[test]
    fn screenshot_draws_foreground_pixels() {
        let shot = Screenshot::from_luma(2, 2, &[0, 0, 255, 0]).unwrap();
        let mut surface = Surface::new(4, 4);
        shot.draw(&mut surface, Point::new(1, 1)).unwrap();
        assert_eq!(surface.black_pixel_count(), 3);
        assert_eq!(surface.pixel(1, 2), Some(BinaryColor::Off));
    }

    #[test]
    fn metadata_directory_reads_info_files() {
        let mut fs = crate::mock_filesystem::MockFileSystem::new();
        fs.add_file(
            "/metadata/elite.d64.info",
            "name=Elite\nauthor=Bell & Braben\nyear=1985\nrating=5\n",
        );
        let mut source = MetadataDirectory::new(fs, "/metadata");

        let info = source.load("elite.d64").unwrap();
        assert_eq!(info.name.as_deref(), Some("Elite"));
        assert_eq!(info.author.as_deref(), Some("Bell & Braben"));
        assert_eq!(info.year, Some(1985));
        assert!(info.screenshot.is_none());
        assert_eq!(source.load("boulder_dash.prg"), None);
    }

    #[test]
    fn bad_year_is_dropped() {
        let info = MetadataDirectory::<crate::mock_filesystem::MockFileSystem>::parse_info(
            "name=X\nyear=soon",
        );
        assert_eq!(info.name.as_deref(), Some("X"));
        assert_eq!(info.year, None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn garbage_png_is_absent() {
        assert!(Screenshot::from_png(b"definitely not a png").is_none());
    }
}
