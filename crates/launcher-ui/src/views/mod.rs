//! Concrete menu screens.

mod disc_view;
mod main_view;
mod options_view;

pub use disc_view::{DiscView, STAGED_PROGRAM_NAME};
pub use main_view::{MainEntry, MainView};
pub use options_view::{OptionsEntry, OptionsView};

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::surface::{DrawResult, Surface};
use crate::theme::{layout, ui_font_title};

/// Title text and the rule under it, shared by every full-screen view.
fn draw_header(surface: &mut Surface, title: &str) -> DrawResult {
    Text::new(
        title,
        Point::new(layout::MARGIN * 2 + layout::INNER_PAD, layout::HEADER_TEXT_Y),
        MonoTextStyle::new(ui_font_title(), BinaryColor::On),
    )
    .draw(surface)?;

    let width = surface.size().width.saturating_sub(2 * layout::MARGIN as u32);
    Rectangle::new(
        Point::new(layout::MARGIN, layout::HEADER_TEXT_Y + layout::INNER_PAD),
        Size::new(width, layout::SEP_THICKNESS),
    )
    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
    .draw(surface)
}
