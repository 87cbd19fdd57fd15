//! View lifecycle for the stack-based menu screens.
//!
//! A view couples one or more menus with static content. The [`Gui`] routes
//! input and logic ticks to the topmost view only; views never touch the
//! stack directly and instead queue a [`Transition`] on the context.
//!
//! # Example
//! ```
//! use core::any::Any;
//! use launcher_ui::gui::{GuiContext, GuiView};
//! use launcher_ui::input::KeyInput;
//! use launcher_ui::surface::{DrawResult, Surface};
//!
//! struct About;
//!
//! impl GuiView for About {
//!     fn name(&self) -> &'static str {
//!         "about"
//!     }
//!
//!     fn push_event(&mut self, input: KeyInput, ctx: &mut GuiContext) {
//!         if input.contains(KeyInput::ESCAPE) {
//!             ctx.pop_view();
//!         }
//!     }
//!
//!     fn draw(&self, _surface: &mut Surface) -> DrawResult {
//!         Ok(())
//!     }
//!
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//! ```
//!
//! [`Gui`]: super::Gui
//! [`Transition`]: super::Transition

use core::any::Any;

use super::{GuiContext, OverlayResult};
use crate::input::KeyInput;
use crate::surface::{DrawResult, Surface};
use crate::timer::HandlerId;

pub trait GuiView {
    /// Short identifier used in logs and tests.
    fn name(&self) -> &'static str;

    /// Called once when the view is pushed (or installed as the base).
    fn on_enter(&mut self, _ctx: &mut GuiContext) {}

    /// Called once when the view is popped. Disarm timers here.
    fn on_exit(&mut self, _ctx: &mut GuiContext) {}

    /// Handle one input event. Only called on the top view with no overlay.
    fn push_event(&mut self, input: KeyInput, ctx: &mut GuiContext);

    /// Per-frame logic, before timers are evaluated.
    fn run_logic(&mut self, _ctx: &mut GuiContext) {}

    /// A timer armed with `handler` expired.
    ///
    /// Returns true if `handler` belongs to this view; the Gui offers the
    /// expiry to each view from the top down until one claims it.
    fn timeout_callback(&mut self, _handler: HandlerId, _ctx: &mut GuiContext) -> bool {
        false
    }

    /// An overlay opened over this view closed with `result`.
    fn overlay_result(&mut self, _result: OverlayResult, _ctx: &mut GuiContext) {}

    /// Opaque views hide everything below them when drawn.
    fn is_opaque(&self) -> bool {
        true
    }

    /// Render the view, background included.
    fn draw(&self, surface: &mut Surface) -> DrawResult;

    fn as_any(&self) -> &dyn Any;
}
