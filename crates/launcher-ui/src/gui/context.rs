//! State shared by every view, plus the queue of requested stack changes.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::{GuiView, Overlay};
use crate::config::MenuConfig;
use crate::filesystem::FileSystem;
use crate::game_info::{GameInfo, GameInfoCatalog, GameInfoSource};
use crate::mock_filesystem::MockFileSystem;
use crate::prefs::{EmulatorControl, HeadlessEmulator, Prefs};
use crate::timer::TimerController;

/// A stack change requested from inside a callback.
///
/// Applied by the `Gui` in request order before the current `push_event` or
/// `run_logic` call returns.
pub enum Transition {
    PushView(Box<dyn GuiView>),
    PopView,
    PushOverlay(Box<dyn Overlay>),
    PopOverlay,
    /// Leave the menu and resume the emulator.
    Exit,
}

impl core::fmt::Debug for Transition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PushView(view) => write!(f, "PushView({})", view.name()),
            Self::PopView => f.write_str("PopView"),
            Self::PushOverlay(overlay) => write!(f, "PushOverlay({})", overlay.name()),
            Self::PopOverlay => f.write_str("PopOverlay"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

/// Everything a view may read or change while handling a call.
pub struct GuiContext {
    pub timers: TimerController,
    pub config: MenuConfig,
    pub prefs: Prefs,
    pub fs: Box<dyn FileSystem>,
    pub game_info: Box<dyn GameInfoSource>,
    pub emulator: Box<dyn EmulatorControl>,
    /// Game chosen by the last disc selection.
    pub current_game: Option<GameInfo>,
    /// The user confirmed leaving the emulator, not just the menu.
    pub quit_requested: bool,
    transitions: Vec<Transition>,
}

impl Default for GuiContext {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl GuiContext {
    /// Context with an empty filesystem, no metadata and a headless emulator.
    pub fn new(config: MenuConfig) -> Self {
        Self {
            timers: TimerController::new(),
            config,
            prefs: Prefs::default(),
            fs: Box::new(MockFileSystem::empty()),
            game_info: Box::new(GameInfoCatalog::new()),
            emulator: Box::new(HeadlessEmulator::default()),
            current_game: None,
            quit_requested: false,
            transitions: Vec::new(),
        }
    }

    pub fn with_filesystem(mut self, fs: impl FileSystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn with_game_info_source(mut self, source: impl GameInfoSource + 'static) -> Self {
        self.game_info = Box::new(source);
        self
    }

    pub fn with_emulator(mut self, emulator: impl EmulatorControl + 'static) -> Self {
        self.emulator = Box::new(emulator);
        self
    }

    /// Queue a stack change.
    pub fn transition(&mut self, transition: Transition) {
        log::debug!("STACK: queued {:?}", transition);
        self.transitions.push(transition);
    }

    pub fn push_view(&mut self, view: impl GuiView + 'static) {
        self.transition(Transition::PushView(Box::new(view)));
    }

    pub fn pop_view(&mut self) {
        self.transition(Transition::PopView);
    }

    pub fn push_overlay(&mut self, overlay: impl Overlay + 'static) {
        self.transition(Transition::PushOverlay(Box::new(overlay)));
    }

    pub fn pop_overlay(&mut self) {
        self.transition(Transition::PopOverlay);
    }

    pub fn exit_menu(&mut self) {
        self.transition(Transition::Exit);
    }

    pub fn has_pending_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }

    /// Drain queued transitions in request order.
    pub fn take_transitions(&mut self) -> Vec<Transition> {
        core::mem::take(&mut self.transitions)
    }
}
