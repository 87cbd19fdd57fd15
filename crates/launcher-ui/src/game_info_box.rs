//! Read-only panel showing the metadata of the hovered or chosen game.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

use crate::file_browser::{is_directory_label, NO_DISC_LABEL};
use crate::game_info::{GameInfo, GameInfoSource};
use crate::menu::{Menu, MenuEntry};
use crate::theme::layout;

const ROWS: usize = 8;
const NAME_ROW: usize = 0;
const AUTHOR_ROW: usize = 3;
const YEAR_ROW: usize = 6;

/// Metadata panel backed by a non-interactive [`Menu`].
#[derive(Debug, Clone)]
pub struct GameInfoBox {
    menu: Menu,
    info: Option<GameInfo>,
}

impl Default for GameInfoBox {
    fn default() -> Self {
        Self::new()
    }
}

impl GameInfoBox {
    pub fn new() -> Self {
        let mut game_box = Self {
            menu: Menu::new(ROWS),
            info: None,
        };
        game_box.update_messages();
        game_box
    }

    pub fn info(&self) -> Option<&GameInfo> {
        self.info.as_ref()
    }

    /// Row contents, placeholders included.
    pub fn rows(&self) -> &[MenuEntry] {
        self.menu.entries()
    }

    pub fn set_game_info(&mut self, info: Option<GameInfo>) {
        self.info = info;
        self.update_messages();
    }

    /// Look up `name` in `source` and show the result.
    ///
    /// Directories and the no-disc entry never have metadata and clear the
    /// panel without consulting `source`.
    pub fn load_game_info(&mut self, name: &str, source: &mut dyn GameInfoSource) {
        let info = if name == NO_DISC_LABEL || is_directory_label(name) {
            None
        } else {
            source.load(name)
        };
        self.set_game_info(info);
    }

    fn update_messages(&mut self) {
        let mut rows: Vec<Option<String>> = (0..ROWS).map(|_| None).collect();
        if let Some(info) = &self.info {
            rows[NAME_ROW] = info.name.clone();
            rows[AUTHOR_ROW] = info.author.clone();
            rows[YEAR_ROW] = info.year.map(|year| year.to_string());
        }
        self.menu.set_text(rows);
    }

    /// Draw the screenshot (if any) above the metadata rows.
    pub fn draw<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        area: Rectangle,
    ) -> Result<(), D::Error> {
        let Some(info) = &self.info else {
            return Ok(());
        };
        let mut clipped = display.clipped(&area);

        let rows_top = match &info.screenshot {
            Some(shot) => {
                let x = area.top_left.x + area.size.width as i32 / 2 - shot.size().width as i32 / 2;
                shot.draw(&mut clipped, Point::new(x, area.top_left.y))?;
                shot.size().height as i32 + layout::INNER_PAD
            }
            None => layout::SCREENSHOT_PLACEHOLDER_H,
        };

        let rows_area = Rectangle::new(
            area.top_left + Point::new(layout::MARGIN, rows_top),
            Size::new(
                area.size.width.saturating_sub(layout::MARGIN as u32),
                area.size.height.saturating_sub(rows_top.max(0) as u32),
            ),
        );
        self.menu.draw(&mut clipped, rows_area, false)
    }
}
