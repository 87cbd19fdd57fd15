//! Emulator-facing settings edited by the menu, and the emulator control
//! hook the menu pauses/resumes around itself.

extern crate alloc;

use alloc::string::String;

use crate::helpers::enum_from_index;

/// Joystick port the host joystick is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoystickPort {
    One,
    #[default]
    Two,
}

impl JoystickPort {
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        enum_from_index(&Self::ALL, index)
    }
}

/// Emulation speed limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmulationSpeed {
    #[default]
    Normal,
    Fast,
    Fastest,
}

impl EmulationSpeed {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Fast, Self::Fastest];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::Fastest => "Fastest",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Fast => 1,
            Self::Fastest => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        enum_from_index(&Self::ALL, index)
    }
}

/// Number of emulated drives.
pub const DRIVE_COUNT: usize = 4;

/// Settings the emulator reads after the menu closes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Prefs {
    /// Image path per drive; empty means no disc.
    pub drive_paths: [String; DRIVE_COUNT],
    pub joystick_port: JoystickPort,
    pub speed: EmulationSpeed,
    pub display_name: String,
}

impl Prefs {
    pub fn drive_path(&self, drive: usize) -> Option<&str> {
        self.drive_paths
            .get(drive)
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }
}

/// Control surface of the running emulator.
pub trait EmulatorControl {
    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;
}

/// Emulator stand-in for simulators and tests; only tracks the pause flag.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessEmulator {
    paused: bool,
}

impl EmulatorControl for HeadlessEmulator {
    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
