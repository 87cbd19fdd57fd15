//! Modal overlays: dialogue boxes and the on-screen keyboard.

extern crate alloc;

use alloc::string::String;

use super::GuiContext;
use crate::input::KeyInput;
use crate::surface::{DrawResult, Surface};

/// How an overlay finished, delivered to the view underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayResult {
    /// A dialogue button was chosen.
    Dialogue { tag: &'static str, choice: usize },
    /// Text entry completed.
    Text { tag: &'static str, text: String },
    /// Escape dismissed the overlay.
    Cancelled { tag: &'static str },
}

impl OverlayResult {
    /// Tag the opening view gave the overlay, to tell several apart.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Dialogue { tag, .. } | Self::Text { tag, .. } | Self::Cancelled { tag } => tag,
        }
    }
}

/// Returned from every overlay input/logic call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayStatus {
    Open,
    Closed(OverlayResult),
}

/// Transient modal element with absolute input precedence over the stack.
pub trait Overlay {
    fn name(&self) -> &'static str;

    fn push_event(&mut self, input: KeyInput, ctx: &mut GuiContext) -> OverlayStatus;

    /// Per-frame logic while the overlay is up.
    fn run_logic(&mut self, _ctx: &mut GuiContext) -> OverlayStatus {
        OverlayStatus::Open
    }

    /// Draw on top of the view stack. Overlays only paint their own box.
    fn draw(&self, surface: &mut Surface) -> DrawResult;
}
