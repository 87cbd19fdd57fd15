//! Disc browser with a hover-triggered game info preview.
//!
//! Moving the selection arms a single-shot timer; when it expires the info
//! box loads metadata for the entry under the cursor. Selecting a file puts
//! it in drive 0 and closes the view.

extern crate alloc;

use alloc::string::String;
use core::any::Any;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use super::draw_header;
use crate::file_browser::{BrowserItem, FileBrowser};
use crate::filesystem::{extension_matches, join_path};
use crate::game_info::GameInfo;
use crate::game_info_box::GameInfoBox;
use crate::gui::{GuiContext, GuiView};
use crate::input::KeyInput;
use crate::menu::{Menu, MenuCallbacks};
use crate::surface::{DrawResult, Surface};
use crate::theme::layout;
use crate::timer::HandlerId;

/// File name a staged program gets inside the temp directory.
pub const STAGED_PROGRAM_NAME: &str = "a";

/// Menu callbacks for the disc list.
///
/// Select needs the browser itself, which the menu borrows during the
/// callback, so it is recorded here and applied afterwards.
struct DiscMenuHandler {
    timer: HandlerId,
    pending_select: Option<usize>,
}

impl DiscMenuHandler {
    fn take_select_request(&mut self) -> Option<usize> {
        self.pending_select.take()
    }
}

impl MenuCallbacks for DiscMenuHandler {
    fn select_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, index: usize) {
        ctx.timers.disarm(self.timer);
        self.pending_select = Some(index);
    }

    fn hover_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, _index: usize) {
        let delay = ctx.config.hover_timeout_ms;
        ctx.timers.arm(self.timer, delay);
    }

    fn escape_callback(&mut self, ctx: &mut GuiContext, _menu: &Menu, _index: usize) {
        ctx.timers.disarm(self.timer);
        ctx.pop_view();
    }
}

pub struct DiscView {
    browser: FileBrowser,
    handler: DiscMenuHandler,
    info_box: GameInfoBox,
}

impl DiscView {
    /// Build the view and register its hover timer. The listing is read
    /// when the view is entered.
    pub fn new(ctx: &mut GuiContext) -> Self {
        let config = &ctx.config;
        let browser = FileBrowser::new(&config.game_extensions, config.visible_rows)
            .with_root(&config.game_base_path)
            .with_no_disc_entry(true)
            .with_wraparound(config.wrap_selection);
        Self {
            browser,
            handler: DiscMenuHandler {
                timer: ctx.timers.register(),
                pending_select: None,
            },
            info_box: GameInfoBox::new(),
        }
    }

    pub fn browser(&self) -> &FileBrowser {
        &self.browser
    }

    pub fn info_box(&self) -> &GameInfoBox {
        &self.info_box
    }

    pub fn timer(&self) -> HandlerId {
        self.handler.timer
    }

    fn select(&mut self, index: usize, ctx: &mut GuiContext) {
        let Some(item) = self.browser.item(index).cloned() else {
            return;
        };
        match item {
            BrowserItem::Directory(_) | BrowserItem::Parent => {
                self.browser.enter(index, &mut *ctx.fs);
                self.info_box.set_game_info(None);
            }
            BrowserItem::NoDisc => {
                log::info!("DISC: drive 0 emptied");
                ctx.prefs.drive_paths[0].clear();
                ctx.current_game = None;
                ctx.pop_view();
            }
            BrowserItem::File(name) => {
                let Some(path) = self.browser.full_path(index) else {
                    return;
                };
                self.insert(&name, path, ctx);
                ctx.pop_view();
            }
        }
    }

    fn insert(&mut self, name: &str, path: String, ctx: &mut GuiContext) {
        let staged = extension_matches(name, &ctx.config.program_extensions)
            && stage_program(&path, ctx);
        let drive = if staged {
            ctx.config.tmp_path.clone()
        } else {
            path
        };
        log::info!("DISC: drive 0 <- {}", drive);
        ctx.prefs.drive_paths[0] = drive;
        let info = ctx
            .game_info
            .load(name)
            .unwrap_or_else(|| GameInfo::named(name));
        ctx.current_game = Some(info);
    }
}

/// Copy a program file to `<tmp_path>/a` so the emulator can load the
/// temp directory as a disc. False if the program could not be read.
fn stage_program(path: &str, ctx: &mut GuiContext) -> bool {
    let data = match ctx.fs.read_file(path) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("DISC: cannot read program {}: {}", path, err);
            return false;
        }
    };
    let target = join_path(&ctx.config.tmp_path, STAGED_PROGRAM_NAME);
    log::info!("DISC: staging {} as {}", path, target);
    if let Err(err) = ctx.fs.write_file(&target, &data) {
        log::warn!("DISC: staging {} failed: {}", target, err);
    }
    true
}

impl GuiView for DiscView {
    fn name(&self) -> &'static str {
        "disc"
    }

    fn on_enter(&mut self, ctx: &mut GuiContext) {
        let root = ctx.config.game_base_path.clone();
        self.browser.set_directory(&root, &mut *ctx.fs);
        let delay = ctx.config.hover_timeout_ms;
        ctx.timers.arm(self.handler.timer, delay);
    }

    fn on_exit(&mut self, ctx: &mut GuiContext) {
        ctx.timers.disarm(self.handler.timer);
    }

    fn push_event(&mut self, input: KeyInput, ctx: &mut GuiContext) {
        self.browser.push_event(input, &mut self.handler, ctx);
        if let Some(index) = self.handler.take_select_request() {
            self.select(index, ctx);
        }
    }

    fn timeout_callback(&mut self, handler: HandlerId, ctx: &mut GuiContext) -> bool {
        if handler != self.handler.timer {
            return false;
        }
        match self.browser.selected_item() {
            Some(BrowserItem::File(name)) => {
                log::debug!("DISC: preview '{}'", name);
                self.info_box.load_game_info(name, &mut *ctx.game_info);
            }
            _ => self.info_box.set_game_info(None),
        }
        true
    }

    fn draw(&self, surface: &mut Surface) -> DrawResult {
        surface.clear(BinaryColor::Off)?;
        draw_header(surface, "Insert disc")?;
        self.browser.draw(surface, layout::DISC_LIST_AREA)?;

        let info = layout::GAME_INFO_AREA;
        Rectangle::new(
            Point::new(info.top_left.x - layout::INNER_PAD, info.top_left.y),
            Size::new(layout::SEP_THICKNESS, info.size.height),
        )
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(surface)?;
        self.info_box.draw(surface, info)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
