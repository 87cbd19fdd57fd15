//! Menu shell for the emulator's launcher screen.
//! Works headless, on the desktop simulator, and on embedded targets.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod config;
pub mod dialogue_box;
pub mod file_browser;
pub mod filesystem;
pub mod game_info;
pub mod game_info_box;
pub mod gui;
mod helpers;
pub mod input;
pub mod menu;
pub mod mock_filesystem;
pub mod prefs;
pub mod surface;
pub mod theme;
pub mod timer;
pub mod views;
pub mod virtual_keyboard;

pub use config::{ConfigError, MenuConfig};
pub use dialogue_box::DialogueBox;
pub use file_browser::{BrowserItem, DirectoryEntry, DirectorySource, FileBrowser};
#[cfg(feature = "std")]
pub use filesystem::HostFileSystem;
pub use filesystem::{FileInfo, FileSystem, FileSystemError};
pub use game_info::{GameInfo, GameInfoCatalog, GameInfoSource, MetadataDirectory, Screenshot};
pub use game_info_box::GameInfoBox;
pub use gui::{
    Gui, GuiContext, GuiError, GuiView, Overlay, OverlayResult, OverlayStatus, Transition,
};
pub use input::{KeyAction, KeyInput};
pub use menu::{Menu, MenuCallbacks, MenuEntry, MenuEvent, NoCallbacks, Submenu};
pub use mock_filesystem::MockFileSystem;
pub use prefs::{EmulationSpeed, EmulatorControl, HeadlessEmulator, JoystickPort, Prefs};
pub use surface::{DrawResult, Surface};
pub use timer::{HandlerId, TimerController};
pub use views::{DiscView, MainView, OptionsView};
pub use virtual_keyboard::VirtualKeyboard;

/// Menu screen dimensions.
pub const DISPLAY_WIDTH: u32 = 640;
pub const DISPLAY_HEIGHT: u32 = 480;
