//! Key input abstraction.
//!
//! Input back-ends (SDL simulator, firmware buttons, scripted tests) translate
//! their raw events into a [`KeyInput`] bitmask. Nothing past this module ever
//! sees a raw platform event.

use bitflags::bitflags;

bitflags! {
    /// Discrete directions/actions understood by menus and views.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyInput: u32 {
        const UP = 1;
        const DOWN = 2;
        const LEFT = 4;
        const RIGHT = 8;
        const SELECT = 16;
        const ESCAPE = 32;
        const PAGE_DOWN = 64;
        const PAGE_UP = 128;
        const HELP = 256;
    }
}

/// A single decoded action, in menu priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Escape,
    Select,
    Up,
    Down,
    PageUp,
    PageDown,
    Left,
    Right,
    Help,
}

impl KeyInput {
    /// Pick the one action a menu acts on when several bits are set.
    ///
    /// Escape beats Select, which beats vertical movement, then paging,
    /// then horizontal movement. Help is reported last so that menus can
    /// ignore it and views can pick it up.
    pub fn primary(self) -> Option<KeyAction> {
        const ORDER: [(KeyInput, KeyAction); 9] = [
            (KeyInput::ESCAPE, KeyAction::Escape),
            (KeyInput::SELECT, KeyAction::Select),
            (KeyInput::UP, KeyAction::Up),
            (KeyInput::DOWN, KeyAction::Down),
            (KeyInput::PAGE_UP, KeyAction::PageUp),
            (KeyInput::PAGE_DOWN, KeyAction::PageDown),
            (KeyInput::LEFT, KeyAction::Left),
            (KeyInput::RIGHT, KeyAction::Right),
            (KeyInput::HELP, KeyAction::Help),
        ];

        ORDER
            .iter()
            .find(|(bit, _)| self.contains(*bit))
            .map(|(_, action)| *action)
    }
}

impl From<KeyAction> for KeyInput {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::Escape => KeyInput::ESCAPE,
            KeyAction::Select => KeyInput::SELECT,
            KeyAction::Up => KeyInput::UP,
            KeyAction::Down => KeyInput::DOWN,
            KeyAction::PageUp => KeyInput::PAGE_UP,
            KeyAction::PageDown => KeyInput::PAGE_DOWN,
            KeyAction::Left => KeyInput::LEFT,
            KeyAction::Right => KeyInput::RIGHT,
            KeyAction::Help => KeyInput::HELP,
        }
    }
}
