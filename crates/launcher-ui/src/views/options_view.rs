//! Emulator options: submenu rows plus a keyboard-edited text option.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;
use core::any::Any;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use super::draw_header;
use crate::dialogue_box::DialogueBox;
use crate::gui::{GuiContext, GuiView, OverlayResult};
use crate::helpers::enum_from_index;
use crate::input::KeyInput;
use crate::menu::{Menu, MenuCallbacks, MenuEntry, Submenu};
use crate::prefs::{EmulationSpeed, JoystickPort, Prefs};
use crate::surface::{DrawResult, Surface};
use crate::theme::layout;
use crate::virtual_keyboard::VirtualKeyboard;

const DISPLAY_NAME_TAG: &str = "display-name";
const RESET_TAG: &str = "reset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsEntry {
    JoystickPort,
    EmulationSpeed,
    DisplayName,
    ResetDefaults,
}

impl OptionsEntry {
    pub const ALL: [Self; 4] = [
        Self::JoystickPort,
        Self::EmulationSpeed,
        Self::DisplayName,
        Self::ResetDefaults,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::JoystickPort => "Joystick port",
            Self::EmulationSpeed => "Emulation speed",
            Self::DisplayName => "Display name",
            Self::ResetDefaults => "Reset to defaults",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::JoystickPort => 0,
            Self::EmulationSpeed => 1,
            Self::DisplayName => 2,
            Self::ResetDefaults => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        enum_from_index(&Self::ALL, index)
    }

    fn entry(self, prefs: &Prefs) -> MenuEntry {
        match self {
            Self::JoystickPort => {
                let mut submenu = Submenu::new(JoystickPort::ALL.iter().map(|p| p.label()));
                submenu.select(prefs.joystick_port.index());
                MenuEntry::with_submenu(self.label(), submenu)
            }
            Self::EmulationSpeed => {
                let mut submenu = Submenu::new(EmulationSpeed::ALL.iter().map(|s| s.label()));
                submenu.select(prefs.speed.index());
                MenuEntry::with_submenu(self.label(), submenu)
            }
            Self::DisplayName if prefs.display_name.is_empty() => {
                MenuEntry::text(format!("{}: -", self.label()))
            }
            Self::DisplayName => {
                MenuEntry::text(format!("{}: {}", self.label(), prefs.display_name))
            }
            Self::ResetDefaults => MenuEntry::text(self.label()),
        }
    }
}

fn entries(prefs: &Prefs) -> Vec<MenuEntry> {
    OptionsEntry::ALL.iter().map(|e| e.entry(prefs)).collect()
}

struct OptionsMenuHandler;

impl MenuCallbacks for OptionsMenuHandler {
    fn select_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, index: usize) {
        match OptionsEntry::from_index(index) {
            Some(OptionsEntry::DisplayName) => {
                let keyboard = VirtualKeyboard::new(DISPLAY_NAME_TAG)
                    .with_text(&ctx.prefs.display_name);
                ctx.push_overlay(keyboard);
            }
            Some(OptionsEntry::ResetDefaults) => {
                ctx.push_overlay(DialogueBox::yes_no(RESET_TAG, "Reset all options?"))
            }
            _ => {}
        }
    }

    fn escape_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, _index: usize) {
        ctx.pop_view();
    }

    fn submenu_callback(
        &mut self,
        ctx: &mut GuiContext,
        _menu: &Menu,
        index: usize,
        option: usize,
    ) {
        match OptionsEntry::from_index(index) {
            Some(OptionsEntry::JoystickPort) => {
                if let Some(port) = JoystickPort::from_index(option) {
                    log::info!("OPTIONS: joystick port {}", port.label());
                    ctx.prefs.joystick_port = port;
                }
            }
            Some(OptionsEntry::EmulationSpeed) => {
                if let Some(speed) = EmulationSpeed::from_index(option) {
                    log::info!("OPTIONS: speed {}", speed.label());
                    ctx.prefs.speed = speed;
                }
            }
            _ => {}
        }
    }
}

pub struct OptionsView {
    menu: Menu,
}

impl OptionsView {
    pub fn new(ctx: &GuiContext) -> Self {
        Self {
            menu: Menu::new(ctx.config.visible_rows)
                .with_wraparound(ctx.config.wrap_selection)
                .with_entries(entries(&ctx.prefs)),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    fn refresh(&mut self, prefs: &Prefs) {
        self.menu.set_text(entries(prefs));
    }
}

impl GuiView for OptionsView {
    fn name(&self) -> &'static str {
        "options"
    }

    fn push_event(&mut self, input: KeyInput, ctx: &mut GuiContext) {
        self.menu.push_event(input, &mut OptionsMenuHandler, ctx);
    }

    fn overlay_result(&mut self, result: OverlayResult, ctx: &mut GuiContext) {
        match result {
            OverlayResult::Text {
                tag: DISPLAY_NAME_TAG,
                text,
            } => {
                log::info!("OPTIONS: display name '{}'", text);
                ctx.prefs.display_name = text;
            }
            OverlayResult::Dialogue {
                tag: RESET_TAG,
                choice: DialogueBox::YES,
            } => {
                log::info!("OPTIONS: reset to defaults");
                let defaults = Prefs::default();
                ctx.prefs.joystick_port = defaults.joystick_port;
                ctx.prefs.speed = defaults.speed;
                ctx.prefs.display_name = defaults.display_name;
            }
            _ => return,
        }
        self.refresh(&ctx.prefs);
    }

    fn draw(&self, surface: &mut Surface) -> DrawResult {
        surface.clear(BinaryColor::Off)?;
        draw_header(surface, "Options")?;
        self.menu.draw(surface, layout::OPTIONS_AREA, true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
