//! Base view: the first screen when the menu opens.

use core::any::Any;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use super::{draw_header, DiscView, OptionsView};
use crate::dialogue_box::DialogueBox;
use crate::gui::{GuiContext, GuiView, OverlayResult};
use crate::helpers::enum_from_index;
use crate::input::KeyInput;
use crate::menu::{Menu, MenuCallbacks};
use crate::surface::{DrawResult, Surface};
use crate::theme::layout;

const QUIT_TAG: &str = "quit";
const HELP_TAG: &str = "help";
const HELP_TEXT: &str = "Up/Down move, Left/Right change options, Select confirms, Escape goes back.";

/// Main menu rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainEntry {
    InsertDisc,
    Options,
    Help,
    Quit,
}

impl MainEntry {
    pub const ALL: [Self; 4] = [Self::InsertDisc, Self::Options, Self::Help, Self::Quit];

    pub const fn label(self) -> &'static str {
        match self {
            Self::InsertDisc => "Insert disc",
            Self::Options => "Options",
            Self::Help => "Help",
            Self::Quit => "Quit",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::InsertDisc => 0,
            Self::Options => 1,
            Self::Help => 2,
            Self::Quit => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        enum_from_index(&Self::ALL, index)
    }
}

struct MainMenuHandler;

impl MenuCallbacks for MainMenuHandler {
    fn select_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, index: usize) {
        match MainEntry::from_index(index) {
            Some(MainEntry::InsertDisc) => {
                let view = DiscView::new(ctx);
                ctx.push_view(view);
            }
            Some(MainEntry::Options) => {
                let view = OptionsView::new(ctx);
                ctx.push_view(view);
            }
            Some(MainEntry::Help) => ctx.push_overlay(DialogueBox::message(HELP_TAG, HELP_TEXT)),
            Some(MainEntry::Quit) => {
                ctx.push_overlay(DialogueBox::yes_no(QUIT_TAG, "Quit the emulator?"))
            }
            None => {}
        }
    }

    fn escape_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, _index: usize) {
        ctx.exit_menu();
    }
}

/// Permanent bottom view of the stack.
pub struct MainView {
    menu: Menu,
}

impl MainView {
    pub fn new(ctx: &GuiContext) -> Self {
        Self {
            menu: Menu::new(ctx.config.visible_rows)
                .with_wraparound(ctx.config.wrap_selection)
                .with_entries(MainEntry::ALL.iter().map(|e| e.label())),
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }
}

impl GuiView for MainView {
    fn name(&self) -> &'static str {
        "main"
    }

    fn push_event(&mut self, input: KeyInput, ctx: &mut GuiContext) {
        self.menu.push_event(input, &mut MainMenuHandler, ctx);
    }

    fn overlay_result(&mut self, result: OverlayResult, ctx: &mut GuiContext) {
        if let OverlayResult::Dialogue {
            tag: QUIT_TAG,
            choice: DialogueBox::YES,
        } = result
        {
            log::info!("MAIN: quit confirmed");
            ctx.quit_requested = true;
            ctx.exit_menu();
        }
    }

    fn draw(&self, surface: &mut Surface) -> DrawResult {
        surface.clear(BinaryColor::Off)?;
        draw_header(surface, "Main menu")?;
        self.menu.draw(surface, layout::MAIN_MENU_AREA, true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::Gui;
    use crate::mock_filesystem::MockFileSystem;

    fn gui() -> Gui {
        let ctx = GuiContext::default().with_filesystem(MockFileSystem::new());
        let main = MainView::new(&ctx);
        let mut gui = Gui::new(main, ctx);
        gui.activate();
        gui
    }

    #[test]
    fn entries_follow_the_fixed_order() {
        let view = MainView::new(&GuiContext::default());
        let labels: alloc::vec::Vec<_> = (0..4).filter_map(|i| view.menu().label(i)).collect();
        assert_eq!(labels, ["Insert disc", "Options", "Help", "Quit"]);
        assert_eq!(MainEntry::from_index(MainEntry::Quit.index()), Some(MainEntry::Quit));
    }

    #[test]
    fn insert_disc_pushes_the_disc_view() {
        let mut gui = gui();
        gui.push_event(KeyInput::SELECT);
        assert_eq!(gui.peek_view().name(), "disc");
        assert_eq!(gui.depth(), 2);
    }

    #[test]
    fn options_pushes_the_options_view() {
        let mut gui = gui();
        gui.push_event(KeyInput::DOWN);
        gui.push_event(KeyInput::SELECT);
        assert_eq!(gui.peek_view().name(), "options");
    }

    #[test]
    fn help_opens_a_dismissable_dialogue() {
        let mut gui = gui();
        gui.push_event(KeyInput::DOWN);
        gui.push_event(KeyInput::DOWN);
        gui.push_event(KeyInput::SELECT);
        assert_eq!(gui.overlay().map(|o| o.name()), Some("dialogue"));
        gui.push_event(KeyInput::SELECT);
        assert!(!gui.has_overlay());
        assert!(gui.is_active());
    }

    #[test]
    fn quit_needs_confirmation() {
        let mut gui = gui();
        for _ in 0..3 {
            gui.push_event(KeyInput::DOWN);
        }
        gui.push_event(KeyInput::SELECT);
        // "No" is preselected
        gui.push_event(KeyInput::SELECT);
        assert!(gui.is_active());

        gui.push_event(KeyInput::SELECT);
        gui.push_event(KeyInput::LEFT);
        gui.push_event(KeyInput::SELECT);
        assert!(!gui.is_active());
        assert!(gui.context().quit_requested);
    }

    #[test]
    fn escape_leaves_the_menu_without_quitting() {
        let mut gui = gui();
        gui.push_event(KeyInput::ESCAPE);
        assert!(!gui.is_active());
        assert!(!gui.context().quit_requested);
        assert_eq!(gui.depth(), 1);
    }

    #[test]
    fn draw_shows_header_and_rows() {
        let gui = gui();
        let mut surface = Surface::default_size();
        gui.draw(&mut surface).unwrap();
        assert!(surface.black_pixels_in(layout::MAIN_MENU_AREA) > 0);
    }
}
