//! View stack and overlay routing.
//!
//! The [`Gui`] owns a permanent base view, any views pushed over it, and at
//! most one modal overlay. Per frame it routes input, then runs logic and
//! timers, then draws; stack changes requested by callbacks are applied
//! before each routing call returns, so the same frame sees them.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

mod context;
mod overlay;
mod view;

pub use context::{GuiContext, Transition};
pub use overlay::{Overlay, OverlayResult, OverlayStatus};
pub use view::GuiView;

use crate::input::KeyInput;
use crate::surface::{DrawResult, Surface};

/// Stack discipline violations on the direct API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GuiError {
    #[error("only the base view is left on the stack")]
    EmptyStack,
    #[error("no overlay is active")]
    NoOverlay,
}

/// Views in bottom-to-top order. The base can never be removed.
struct ViewStack {
    base: Box<dyn GuiView>,
    stack: Vec<Box<dyn GuiView>>,
}

impl ViewStack {
    fn top(&self) -> &dyn GuiView {
        self.stack.last().unwrap_or(&self.base).as_ref()
    }

    fn top_mut(&mut self) -> &mut dyn GuiView {
        match self.stack.last_mut() {
            Some(view) => view.as_mut(),
            None => self.base.as_mut(),
        }
    }

    fn depth(&self) -> usize {
        self.stack.len() + 1
    }

    fn iter(&self) -> impl Iterator<Item = &dyn GuiView> {
        core::iter::once(self.base.as_ref()).chain(self.stack.iter().map(|v| v.as_ref()))
    }

    fn iter_mut_top_down(&mut self) -> impl Iterator<Item = &mut Box<dyn GuiView>> {
        self.stack
            .iter_mut()
            .rev()
            .chain(core::iter::once(&mut self.base))
    }
}

/// Menu shell: view stack, overlay slot and shared context.
pub struct Gui {
    views: ViewStack,
    overlay: Option<Box<dyn Overlay>>,
    ctx: GuiContext,
    active: bool,
}

impl Gui {
    /// Install `base` as the permanent bottom view.
    ///
    /// The menu starts inactive; call [`activate`](Self::activate) when it is
    /// opened over the running emulator.
    pub fn new(base: impl GuiView + 'static, ctx: GuiContext) -> Self {
        let mut gui = Self {
            views: ViewStack {
                base: Box::new(base),
                stack: Vec::new(),
            },
            overlay: None,
            ctx,
            active: false,
        };
        gui.views.base.on_enter(&mut gui.ctx);
        gui.apply_transitions();
        gui
    }

    pub fn context(&self) -> &GuiContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut GuiContext {
        &mut self.ctx
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Open the menu: pause the emulator and start routing.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.ctx.emulator.pause();
        self.active = true;
        log::info!("GUI: activated on '{}'", self.views.top().name());
    }

    /// Close the menu and resume the emulator. The stack is kept.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.ctx.emulator.resume();
        log::info!("GUI: deactivated");
    }

    /// Number of views, base included.
    pub fn depth(&self) -> usize {
        self.views.depth()
    }

    /// Topmost view. Never fails: the base is always present.
    pub fn peek_view(&self) -> &dyn GuiView {
        self.views.top()
    }

    pub fn overlay(&self) -> Option<&dyn Overlay> {
        self.overlay.as_deref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn push_view(&mut self, view: impl GuiView + 'static) {
        self.push_boxed_view(Box::new(view));
        self.apply_transitions();
    }

    /// Remove and return the top view.
    pub fn pop_view(&mut self) -> Result<Box<dyn GuiView>, GuiError> {
        let view = self.pop_boxed_view()?;
        self.apply_transitions();
        Ok(view)
    }

    /// Show `overlay`, returning the one it displaced.
    pub fn push_overlay(&mut self, overlay: impl Overlay + 'static) -> Option<Box<dyn Overlay>> {
        let displaced = self.set_overlay(Box::new(overlay));
        self.apply_transitions();
        displaced
    }

    pub fn pop_overlay(&mut self) -> Result<Box<dyn Overlay>, GuiError> {
        let overlay = self.overlay.take().ok_or(GuiError::NoOverlay)?;
        log::info!("OVERLAY: pop '{}'", overlay.name());
        Ok(overlay)
    }

    /// Route one input event to the overlay, or else to the top view.
    pub fn push_event(&mut self, input: KeyInput) {
        if !self.active || input.is_empty() {
            return;
        }
        if let Some(overlay) = self.overlay.as_mut() {
            let status = overlay.push_event(input, &mut self.ctx);
            self.handle_overlay_status(status);
        } else {
            self.views.top_mut().push_event(input, &mut self.ctx);
        }
        self.apply_transitions();
    }

    /// One logic frame.
    ///
    /// With an overlay up only the overlay runs: the stack is frozen and
    /// timers do not advance. Otherwise the top view runs, then timers move
    /// forward by `elapsed_ms` and each expiry goes to the view owning it.
    pub fn run_logic(&mut self, elapsed_ms: u32) {
        if !self.active {
            return;
        }
        if let Some(overlay) = self.overlay.as_mut() {
            let status = overlay.run_logic(&mut self.ctx);
            self.handle_overlay_status(status);
        } else {
            self.views.top_mut().run_logic(&mut self.ctx);
            self.ctx.timers.advance(elapsed_ms);
            while let Some(handler) = self.ctx.timers.take_expired() {
                let claimed = self
                    .views
                    .iter_mut_top_down()
                    .any(|view| view.timeout_callback(handler, &mut self.ctx));
                if !claimed {
                    log::warn!("TIMER: no view owns handler {}", handler.raw());
                }
            }
        }
        self.apply_transitions();
    }

    /// Draw the visible part of the stack bottom to top, then the overlay.
    pub fn draw(&self, surface: &mut Surface) -> DrawResult {
        if !self.active {
            return Ok(());
        }
        surface.fill_background();
        let views: Vec<&dyn GuiView> = self.views.iter().collect();
        let first_visible = views.iter().rposition(|v| v.is_opaque()).unwrap_or(0);
        for view in &views[first_visible..] {
            view.draw(surface)?;
        }
        if let Some(overlay) = &self.overlay {
            overlay.draw(surface)?;
        }
        Ok(())
    }

    /// Input, then logic, then draw.
    pub fn frame(&mut self, input: KeyInput, elapsed_ms: u32, surface: &mut Surface) -> DrawResult {
        self.push_event(input);
        self.run_logic(elapsed_ms);
        self.draw(surface)
    }

    fn handle_overlay_status(&mut self, status: OverlayStatus) {
        let OverlayStatus::Closed(result) = status else {
            return;
        };
        if let Some(overlay) = self.overlay.take() {
            log::info!("OVERLAY: '{}' closed with {:?}", overlay.name(), result);
        }
        self.views.top_mut().overlay_result(result, &mut self.ctx);
    }

    fn push_boxed_view(&mut self, mut view: Box<dyn GuiView>) {
        log::info!(
            "STACK: push '{}' over '{}'",
            view.name(),
            self.views.top().name()
        );
        view.on_enter(&mut self.ctx);
        self.views.stack.push(view);
    }

    fn pop_boxed_view(&mut self) -> Result<Box<dyn GuiView>, GuiError> {
        let mut view = self.views.stack.pop().ok_or(GuiError::EmptyStack)?;
        view.on_exit(&mut self.ctx);
        log::info!(
            "STACK: pop '{}', back to '{}'",
            view.name(),
            self.views.top().name()
        );
        Ok(view)
    }

    fn set_overlay(&mut self, overlay: Box<dyn Overlay>) -> Option<Box<dyn Overlay>> {
        log::info!("OVERLAY: push '{}'", overlay.name());
        let displaced = self.overlay.replace(overlay);
        if let Some(old) = &displaced {
            log::warn!("OVERLAY: '{}' displaced", old.name());
        }
        displaced
    }

    /// Apply queued transitions until none are left; `on_enter`/`on_exit`
    /// may queue more.
    fn apply_transitions(&mut self) {
        while self.ctx.has_pending_transitions() {
            for transition in self.ctx.take_transitions() {
                match transition {
                    Transition::PushView(view) => self.push_boxed_view(view),
                    Transition::PopView => {
                        if self.pop_boxed_view().is_err() {
                            debug_assert!(false, "callback tried to pop the base view");
                            log::error!("STACK: refusing to pop the base view");
                        }
                    }
                    Transition::PushOverlay(overlay) => {
                        self.set_overlay(overlay);
                    }
                    Transition::PopOverlay => {
                        if self.pop_overlay().is_err() {
                            log::warn!("OVERLAY: pop requested with none active");
                        }
                    }
                    Transition::Exit => self.deactivate(),
                }
            }
        }
    }
}
