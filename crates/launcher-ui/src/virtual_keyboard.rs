//! On-screen keyboard overlay for text options.
//!
//! Four rows of character keys over a row of special keys. Arrow keys move
//! the highlight (clamped at the edges), Select presses the highlighted key.

extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Alignment, Text},
};

use crate::gui::{GuiContext, Overlay, OverlayResult, OverlayStatus};
use crate::helpers::step_clamped;
use crate::input::{KeyAction, KeyInput};
use crate::surface::{DrawResult, Surface};
use crate::theme::{layout, ui_font_body, ui_font_small};

const CHAR_ROWS: [&str; 4] = ["1234567890", "QWERTYUIOP", "ASDFGHJKL.", "ZXCVBNM,-/"];
const SPECIAL_ROW: [Key; 4] = [Key::Shift, Key::Space, Key::Delete, Key::Done];
const ROW_COUNT: usize = CHAR_ROWS.len() + 1;

/// Maximum length of the entered text.
pub const MAX_TEXT_LEN: usize = 254;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Shift,
    Space,
    Delete,
    Done,
}

impl Key {
    fn label(self, shift: bool) -> String {
        match self {
            Key::Char(c) if shift => String::from(c),
            Key::Char(c) => String::from(c.to_ascii_lowercase()),
            Key::Shift => String::from("SHIFT"),
            Key::Space => String::from("SPACE"),
            Key::Delete => String::from("DEL"),
            Key::Done => String::from("DONE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualKeyboard {
    tag: &'static str,
    text: String,
    shift: bool,
    x: usize,
    y: usize,
}

impl VirtualKeyboard {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            text: String::new(),
            shift: false,
            x: 0,
            y: 0,
        }
    }

    /// Start from existing text, truncated to [`MAX_TEXT_LEN`].
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.chars().take(MAX_TEXT_LEN).collect();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_shifted(&self) -> bool {
        self.shift
    }

    /// Highlighted key position as (column, row).
    pub fn selection(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn selected_key(&self) -> Key {
        key_at(self.x, self.y)
    }

    /// Move the highlight; each axis is clamped to the grid.
    pub fn select_next(&mut self, dx: isize, dy: isize) {
        self.y = step_clamped(self.y, dy, ROW_COUNT);
        self.x = step_clamped(self.x, dx, row_len(self.y));
    }

    /// Press the highlighted key. Returns the result when DONE is pressed.
    fn press(&mut self) -> Option<OverlayResult> {
        match self.selected_key() {
            Key::Char(c) => {
                let c = if self.shift { c } else { c.to_ascii_lowercase() };
                self.type_char(c);
            }
            Key::Space => self.type_char(' '),
            Key::Shift => self.shift = !self.shift,
            Key::Delete => {
                self.text.pop();
            }
            Key::Done => {
                log::info!("KEYBOARD: done, {} chars", self.text.chars().count());
                return Some(OverlayResult::Text {
                    tag: self.tag,
                    text: self.text.clone(),
                });
            }
        }
        None
    }

    fn type_char(&mut self, c: char) {
        if self.text.chars().count() < MAX_TEXT_LEN {
            self.text.push(c);
        }
    }
}

/// Key cell inside `area`; the first row band is the text line.
fn key_bounds(area: Rectangle, x: usize, y: usize) -> Rectangle {
    let row_h = area.size.height / (ROW_COUNT as u32 + 1);
    let key_w = area.size.width / row_len(y) as u32;
    Rectangle::new(
        area.top_left + Point::new((x as u32 * key_w) as i32, ((y as u32 + 1) * row_h) as i32),
        Size::new(key_w, row_h),
    )
}

fn row_len(y: usize) -> usize {
    match CHAR_ROWS.get(y) {
        Some(row) => row.len(),
        None => SPECIAL_ROW.len(),
    }
}

fn key_at(x: usize, y: usize) -> Key {
    match CHAR_ROWS.get(y) {
        Some(row) => row
            .chars()
            .nth(x)
            .map(Key::Char)
            .unwrap_or(Key::Done),
        None => SPECIAL_ROW.get(x).copied().unwrap_or(Key::Done),
    }
}

impl Overlay for VirtualKeyboard {
    fn name(&self) -> &'static str {
        "keyboard"
    }

    fn push_event(&mut self, input: KeyInput, _ctx: &mut GuiContext) -> OverlayStatus {
        let Some(action) = input.primary() else {
            return OverlayStatus::Open;
        };
        match action {
            KeyAction::Escape => {
                return OverlayStatus::Closed(OverlayResult::Cancelled { tag: self.tag })
            }
            KeyAction::Select => {
                if let Some(result) = self.press() {
                    return OverlayStatus::Closed(result);
                }
            }
            KeyAction::Up => self.select_next(0, -1),
            KeyAction::Down => self.select_next(0, 1),
            KeyAction::Left => self.select_next(-1, 0),
            KeyAction::Right => self.select_next(1, 0),
            _ => {}
        }
        OverlayStatus::Open
    }

    fn draw(&self, surface: &mut Surface) -> DrawResult {
        let area = layout::KEYBOARD_AREA;
        area.into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(surface)?;
        area.into_styled(
            PrimitiveStyleBuilder::new()
                .stroke_color(BinaryColor::On)
                .stroke_width(2)
                .stroke_alignment(StrokeAlignment::Inside)
                .build(),
        )
        .draw(surface)?;

        let mut clipped = surface.clipped(&area);

        // Entered text, tail first when it overflows
        let char_w = ui_font_body().character_size.width.max(1);
        let fits = (area.size.width as usize / char_w as usize).saturating_sub(2);
        let skip = self.text.chars().count().saturating_sub(fits);
        let visible: String = self.text.chars().skip(skip).collect();
        Text::new(
            &visible,
            area.top_left + Point::new(layout::INNER_PAD, layout::ROW_TEXT_Y + 4),
            MonoTextStyle::new(ui_font_body(), BinaryColor::On),
        )
        .draw(&mut clipped)?;

        for y in 0..ROW_COUNT {
            for x in 0..row_len(y) {
                let bounds = key_bounds(area, x, y);
                let is_selected = (x, y) == (self.x, self.y);
                let fg = if is_selected {
                    bounds
                        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                        .draw(&mut clipped)?;
                    BinaryColor::Off
                } else {
                    BinaryColor::On
                };
                let label = key_at(x, y).label(self.shift);
                Text::with_alignment(
                    &label,
                    bounds.center() + Point::new(0, 4),
                    MonoTextStyle::new(ui_font_small(), fg),
                    Alignment::Center,
                )
                .draw(&mut clipped)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keyboard: &mut VirtualKeyboard, input: KeyInput) -> OverlayStatus {
        keyboard.push_event(input, &mut GuiContext::default())
    }

    /// Move the highlight to `target` and press it.
    fn type_key(keyboard: &mut VirtualKeyboard, target: (usize, usize)) -> OverlayStatus {
        keyboard.x = target.0;
        keyboard.y = target.1;
        press(keyboard, KeyInput::SELECT)
    }

    #[test]
    fn movement_is_clamped_to_the_grid() {
        let mut keyboard = VirtualKeyboard::new("name");
        press(&mut keyboard, KeyInput::UP);
        press(&mut keyboard, KeyInput::LEFT);
        assert_eq!(keyboard.selection(), (0, 0));

        for _ in 0..20 {
            press(&mut keyboard, KeyInput::RIGHT);
        }
        assert_eq!(keyboard.selection(), (9, 0));

        for _ in 0..10 {
            press(&mut keyboard, KeyInput::DOWN);
        }
        assert_eq!(keyboard.selection(), (3, 4));
        assert_eq!(keyboard.selected_key(), Key::Done);
    }

    #[test]
    fn typing_shift_and_delete() {
        let mut keyboard = VirtualKeyboard::new("name");
        type_key(&mut keyboard, (0, 1));
        type_key(&mut keyboard, (0, 4));
        type_key(&mut keyboard, (1, 1));
        type_key(&mut keyboard, (1, 4));
        type_key(&mut keyboard, (4, 0));
        assert_eq!(keyboard.text(), "qW 5");
        assert!(keyboard.is_shifted());

        type_key(&mut keyboard, (2, 4));
        assert_eq!(keyboard.text(), "qW ");
    }

    #[test]
    fn done_returns_text_and_escape_cancels() {
        let mut keyboard = VirtualKeyboard::new("name").with_text("ab");
        assert_eq!(
            type_key(&mut keyboard, (3, 4)),
            OverlayStatus::Closed(OverlayResult::Text {
                tag: "name",
                text: String::from("ab")
            })
        );

        let mut other = VirtualKeyboard::new("name");
        assert_eq!(
            press(&mut other, KeyInput::ESCAPE),
            OverlayStatus::Closed(OverlayResult::Cancelled { tag: "name" })
        );
    }

    #[test]
    fn text_is_capped() {
        let long: String = core::iter::repeat('x').take(400).collect();
        let mut keyboard = VirtualKeyboard::new("name").with_text(&long);
        assert_eq!(keyboard.text().len(), MAX_TEXT_LEN);
        type_key(&mut keyboard, (0, 0));
        assert_eq!(keyboard.text().len(), MAX_TEXT_LEN);
    }

    #[test]
    fn draw_stays_inside_its_area() {
        let keyboard = VirtualKeyboard::new("name").with_text("hello");
        let mut surface = Surface::default_size();
        keyboard.draw(&mut surface).unwrap();
        let inside = surface.black_pixels_in(layout::KEYBOARD_AREA);
        assert!(inside > 0);
        assert_eq!(inside, surface.black_pixel_count());
    }
}
