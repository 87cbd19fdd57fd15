//! Modal message box with a row of buttons.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Alignment, Text},
};
use embedded_text::{alignment::HorizontalAlignment, style::TextBoxStyleBuilder, TextBox};

use crate::gui::{GuiContext, Overlay, OverlayResult, OverlayStatus};
use crate::helpers::step_clamped;
use crate::input::{KeyAction, KeyInput};
use crate::surface::{DrawResult, Surface};
use crate::theme::{layout, ui_font_body, ui_font_small};

/// Message plus buttons; Select answers with the highlighted button index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueBox {
    tag: &'static str,
    message: String,
    buttons: Vec<String>,
    selected: usize,
    area: Rectangle,
}

impl DialogueBox {
    pub fn new<I, S>(tag: &'static str, message: impl Into<String>, buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag,
            message: message.into(),
            buttons: buttons.into_iter().map(Into::into).collect(),
            selected: 0,
            area: layout::DIALOGUE_AREA,
        }
    }

    /// "Yes"/"No" question with "No" (index 1) preselected.
    pub fn yes_no(tag: &'static str, message: impl Into<String>) -> Self {
        Self::new(tag, message, ["Yes", "No"]).with_default(Self::NO)
    }

    /// Information box with a single "OK" button.
    pub fn message(tag: &'static str, message: impl Into<String>) -> Self {
        Self::new(tag, message, ["OK"])
    }

    pub const YES: usize = 0;
    pub const NO: usize = 1;

    /// Preselect a button. Clamped.
    pub fn with_default(mut self, button: usize) -> Self {
        self.selected = button.min(self.buttons.len().saturating_sub(1));
        self
    }

    pub fn with_area(mut self, area: Rectangle) -> Self {
        self.area = area;
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn message_text(&self) -> &str {
        &self.message
    }

    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.buttons.get(self.selected).map(String::as_str)
    }

    fn handle(&mut self, input: KeyInput) -> OverlayStatus {
        let Some(action) = input.primary() else {
            return OverlayStatus::Open;
        };
        match action {
            KeyAction::Escape => {
                return OverlayStatus::Closed(OverlayResult::Cancelled { tag: self.tag })
            }
            KeyAction::Select if !self.buttons.is_empty() => {
                return OverlayStatus::Closed(OverlayResult::Dialogue {
                    tag: self.tag,
                    choice: self.selected,
                })
            }
            KeyAction::Left | KeyAction::Up => {
                self.selected = step_clamped(self.selected, -1, self.buttons.len())
            }
            KeyAction::Right | KeyAction::Down => {
                self.selected = step_clamped(self.selected, 1, self.buttons.len())
            }
            _ => {}
        }
        OverlayStatus::Open
    }
}

impl Overlay for DialogueBox {
    fn name(&self) -> &'static str {
        "dialogue"
    }

    fn push_event(&mut self, input: KeyInput, _ctx: &mut GuiContext) -> OverlayStatus {
        self.handle(input)
    }

    fn draw(&self, surface: &mut Surface) -> DrawResult {
        let area = self.area;

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

        let button_h = layout::BUTTON_H;
        let pad = layout::INNER_PAD;
        let text_bounds = Rectangle::new(
            area.top_left + Point::new(pad, pad),
            Size::new(
                area.size.width.saturating_sub(2 * pad as u32),
                area.size
                    .height
                    .saturating_sub(button_h + 3 * pad as u32),
            ),
        );
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .build();
        TextBox::with_textbox_style(
            &self.message,
            text_bounds,
            MonoTextStyle::new(ui_font_body(), BinaryColor::On),
            textbox_style,
        )
        .draw(surface)?;

        if self.buttons.is_empty() {
            return Ok(());
        }
        let count = self.buttons.len() as u32;
        let button_w = area
            .size
            .width
            .saturating_sub(pad as u32 * (count + 1))
            / count;
        let button_y = area.top_left.y + area.size.height as i32 - button_h as i32 - pad;

        for (i, label) in self.buttons.iter().enumerate() {
            let x = area.top_left.x + pad + i as i32 * (button_w as i32 + pad);
            let bounds = Rectangle::new(Point::new(x, button_y), Size::new(button_w, button_h));
            let is_selected = i == self.selected;
            let (bg, fg) = if is_selected {
                (BinaryColor::On, BinaryColor::Off)
            } else {
                (BinaryColor::Off, BinaryColor::On)
            };
            bounds
                .into_styled(PrimitiveStyle::with_fill(bg))
                .draw(surface)?;
            bounds
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(surface)?;
            Text::with_alignment(
                label,
                Point::new(x + button_w as i32 / 2, button_y + button_h as i32 / 2 + 4),
                MonoTextStyle::new(ui_font_small(), fg),
                Alignment::Center,
            )
            .draw(surface)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(dialogue: &mut DialogueBox, input: KeyInput) -> OverlayStatus {
        dialogue.push_event(input, &mut GuiContext::default())
    }

    #[test]
    fn yes_no_defaults_to_no_and_moves_clamped() {
        let mut dialogue = DialogueBox::yes_no("quit", "Quit?");
        assert_eq!(dialogue.selected_label(), Some("No"));

        press(&mut dialogue, KeyInput::RIGHT);
        assert_eq!(dialogue.selected(), DialogueBox::NO);
        press(&mut dialogue, KeyInput::LEFT);
        press(&mut dialogue, KeyInput::UP);
        assert_eq!(dialogue.selected(), DialogueBox::YES);
    }

    #[test]
    fn select_reports_choice_with_tag() {
        let mut dialogue = DialogueBox::yes_no("reset", "Reset?");
        press(&mut dialogue, KeyInput::LEFT);
        assert_eq!(
            press(&mut dialogue, KeyInput::SELECT),
            OverlayStatus::Closed(OverlayResult::Dialogue {
                tag: "reset",
                choice: 0
            })
        );
    }

    #[test]
    fn escape_cancels_even_with_select_held() {
        let mut dialogue = DialogueBox::message("help", "Arrows move.");
        assert_eq!(
            press(&mut dialogue, KeyInput::SELECT | KeyInput::ESCAPE),
            OverlayStatus::Closed(OverlayResult::Cancelled { tag: "help" })
        );
    }

    #[test]
    fn buttonless_dialogue_only_closes_on_escape() {
        let mut dialogue = DialogueBox::new("busy", "Working", Vec::<String>::new());
        assert_eq!(press(&mut dialogue, KeyInput::SELECT), OverlayStatus::Open);
        assert_eq!(press(&mut dialogue, KeyInput::RIGHT), OverlayStatus::Open);
        assert_eq!(dialogue.selected(), 0);
    }

    #[test]
    fn draw_stays_inside_its_area() {
        let dialogue = DialogueBox::yes_no("quit", "Really quit the emulator?");
        let mut surface = Surface::default_size();
        dialogue.draw(&mut surface).unwrap();
        let inside = surface.black_pixels_in(layout::DIALOGUE_AREA);
        assert!(inside > 0);
        assert_eq!(inside, surface.black_pixel_count());
    }
}
