//! Fonts and layout constants for the 640x480 menu screen.
//!
//! Views pick fonts by role: `ui_font_title()` for headers, `ui_font_body()`
//! for menu rows and dialogue text, `ui_font_small()` for captions.

use embedded_graphics::mono_font::{ascii, MonoFont};

/// Title/header font.
pub fn ui_font_title() -> &'static MonoFont<'static> {
    &ascii::FONT_10X20
}

/// Body font, for menu rows and primary content.
pub fn ui_font_body() -> &'static MonoFont<'static> {
    &ascii::FONT_9X18_BOLD
}

/// Small font, for secondary text and captions.
pub fn ui_font_small() -> &'static MonoFont<'static> {
    &ascii::FONT_7X13
}

/// Character width for the body font.
pub fn ui_font_body_char_width() -> i32 {
    ui_font_body().character_size.width as i32
}

// ── Layout constants ────────────────────────────────────────────────
//
// Single source of truth for every pixel offset in the UI.

/// Layout constants for the 640x480 menu screen.
pub mod layout {
    use embedded_graphics::prelude::{Point, Size};
    use embedded_graphics::primitives::Rectangle;

    /// Side margin (left/right padding from screen edge).
    pub const MARGIN: i32 = 20;

    /// Inner padding within panels and overlays.
    pub const INNER_PAD: i32 = 10;

    /// Height of one menu row.
    pub const ROW_H: i32 = 26;

    /// Y-offset of a row's text baseline from the row top.
    pub const ROW_TEXT_Y: i32 = 19;

    /// Separator line thickness.
    pub const SEP_THICKNESS: u32 = 1;

    /// Main menu panel.
    pub const MAIN_MENU_AREA: Rectangle =
        Rectangle::new(Point::new(50, 70), Size::new(280, 375));

    /// Disc list panel (left half).
    pub const DISC_LIST_AREA: Rectangle =
        Rectangle::new(Point::new(50, 70), Size::new(280, 375));

    /// Game info panel (right half).
    pub const GAME_INFO_AREA: Rectangle =
        Rectangle::new(Point::new(360, 55), Size::new(262, 410));

    /// Options panel.
    pub const OPTIONS_AREA: Rectangle =
        Rectangle::new(Point::new(50, 70), Size::new(540, 375));

    /// Dialogue box, centred.
    pub const DIALOGUE_AREA: Rectangle =
        Rectangle::new(Point::new(120, 150), Size::new(400, 180));

    /// Virtual keyboard panel, bottom half.
    pub const KEYBOARD_AREA: Rectangle =
        Rectangle::new(Point::new(40, 220), Size::new(560, 240));

    /// Dialogue button height.
    pub const BUTTON_H: u32 = 30;

    /// Header title baseline.
    pub const HEADER_TEXT_Y: i32 = 40;

    /// Height the screenshot leaves for game info rows when absent.
    pub const SCREENSHOT_PLACEHOLDER_H: i32 = 146;
}
