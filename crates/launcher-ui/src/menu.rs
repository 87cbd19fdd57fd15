//! List-selection state machine shared by every menu-owning view.
//!
//! A [`Menu`] owns its entries, the current selection and the scroll window.
//! Input moves the selection and, depending on the key, fires one of the
//! [`MenuCallbacks`] supplied by the owning view. Views never reimplement the
//! movement rules; [`FileBrowser`](crate::file_browser::FileBrowser) and
//! [`GameInfoBox`](crate::game_info_box::GameInfoBox) wrap a `Menu` and only
//! change how its entries are produced.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

use crate::gui::GuiContext;
use crate::input::{KeyAction, KeyInput};
use crate::theme::{layout, ui_font_body, ui_font_body_char_width};

/// Horizontal option list attached to an entry, cycled with Left/Right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submenu {
    options: Vec<String>,
    selected: usize,
}

impl Submenu {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            selected: 0,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Clamp `option` into range and select it. Returns true on change.
    pub fn select(&mut self, option: usize) -> bool {
        let clamped = option.min(self.options.len().saturating_sub(1));
        let changed = clamped != self.selected;
        self.selected = clamped;
        changed
    }
}

/// One screen row. A `None` label is a blank placeholder row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuEntry {
    label: Option<String>,
    submenu: Option<Submenu>,
}

impl MenuEntry {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            submenu: None,
        }
    }

    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn with_submenu(label: impl Into<String>, submenu: Submenu) -> Self {
        Self {
            label: Some(label.into()),
            submenu: Some(submenu),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.label.is_none()
    }

    pub fn submenu(&self) -> Option<&Submenu> {
        self.submenu.as_ref()
    }
}

impl From<&str> for MenuEntry {
    fn from(label: &str) -> Self {
        Self::text(label)
    }
}

impl From<String> for MenuEntry {
    fn from(label: String) -> Self {
        Self::text(label)
    }
}

impl From<Option<String>> for MenuEntry {
    fn from(label: Option<String>) -> Self {
        Self {
            label,
            submenu: None,
        }
    }
}

/// What a single input did to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Select(usize),
    Hover(usize),
    Escape(usize),
    Submenu { index: usize, option: usize },
}

/// Per-view reactions to menu input. Every method defaults to a no-op.
pub trait MenuCallbacks {
    fn select_callback(&mut self, _ctx: &mut GuiContext, _menu: &Menu, _index: usize) {}

    fn hover_callback(&mut self, _ctx: &mut GuiContext, _menu: &Menu, _index: usize) {}

    fn escape_callback(&mut self, _ctx: &mut GuiContext, _menu: &Menu, _index: usize) {}

    /// Left/Right changed the option of the submenu on entry `index`.
    fn submenu_callback(
        &mut self,
        _ctx: &mut GuiContext,
        _menu: &Menu,
        _index: usize,
        _option: usize,
    ) {
    }
}

/// Callbacks for menus that only display content.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCallbacks;

impl MenuCallbacks for NoCallbacks {}

/// Selection, scroll window and entries of a list menu.
#[derive(Debug, Clone)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    current_selection: usize,
    scroll_offset: usize,
    visible_rows: usize,
    wrap_selection: bool,
}

impl Menu {
    /// Create an empty menu showing `visible_rows` rows at a time.
    pub fn new(visible_rows: usize) -> Self {
        Self {
            entries: Vec::new(),
            current_selection: 0,
            scroll_offset: 0,
            visible_rows: visible_rows.max(1),
            wrap_selection: false,
        }
    }

    /// Let Up/Down wrap around the ends of the list.
    pub fn with_wraparound(mut self, wrap: bool) -> Self {
        self.wrap_selection = wrap;
        self
    }

    pub fn with_entries<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<MenuEntry>,
    {
        self.set_text(entries);
        self
    }

    /// Replace every entry.
    ///
    /// Resets the scroll window to the top and clamps the selection into the
    /// new bounds; the window then scrolls to keep the clamped selection
    /// visible. Hover is not re-fired.
    pub fn set_text<I, E>(&mut self, entries: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<MenuEntry>,
    {
        self.entries = entries.into_iter().map(Into::into).collect();
        self.scroll_offset = 0;
        self.current_selection = self
            .current_selection
            .min(self.entries.len().saturating_sub(1));
        self.adjust_scroll();
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_selection(&self) -> usize {
        self.current_selection
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.entries.get(self.current_selection)
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected_entry().and_then(MenuEntry::label)
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.entries.get(index).and_then(MenuEntry::label)
    }

    /// Move the selection without firing hover. Out-of-range indices clamp.
    pub fn set_selection(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.current_selection = index.min(self.entries.len() - 1);
        self.adjust_scroll();
    }

    pub fn submenu_selection(&self, index: usize) -> Option<usize> {
        self.entries
            .get(index)
            .and_then(MenuEntry::submenu)
            .map(Submenu::selected)
    }

    /// Set a submenu option without firing callbacks. Clamped.
    pub fn set_submenu_selection(&mut self, index: usize, option: usize) {
        if let Some(submenu) = self.entries.get_mut(index).and_then(|e| e.submenu.as_mut()) {
            submenu.select(option);
        }
    }

    /// Apply one input to the selection state and report what happened.
    ///
    /// No callbacks run here; see [`push_event`](Self::push_event).
    pub fn handle_input(&mut self, input: KeyInput) -> Option<MenuEvent> {
        if self.entries.is_empty() {
            return None;
        }

        match input.primary()? {
            KeyAction::Escape => Some(MenuEvent::Escape(self.current_selection)),
            KeyAction::Select => Some(MenuEvent::Select(self.current_selection)),
            KeyAction::Up => self.step(-1),
            KeyAction::Down => self.step(1),
            KeyAction::PageUp => self.page(-1),
            KeyAction::PageDown => self.page(1),
            KeyAction::Left => self.cycle_submenu(-1),
            KeyAction::Right => self.cycle_submenu(1),
            KeyAction::Help => None,
        }
    }

    /// Apply one input and fire the matching callback.
    pub fn push_event<C>(
        &mut self,
        input: KeyInput,
        callbacks: &mut C,
        ctx: &mut GuiContext,
    ) -> Option<MenuEvent>
    where
        C: MenuCallbacks + ?Sized,
    {
        let event = self.handle_input(input)?;
        match event {
            MenuEvent::Select(index) => {
                log::info!("SELECT: [{}] {:?}", index, self.label(index));
                callbacks.select_callback(ctx, self, index);
            }
            MenuEvent::Hover(index) => {
                log::info!("NAV: -> [{}] {:?}", index, self.label(index));
                callbacks.hover_callback(ctx, self, index);
            }
            MenuEvent::Escape(index) => callbacks.escape_callback(ctx, self, index),
            MenuEvent::Submenu { index, option } => {
                callbacks.submenu_callback(ctx, self, index, option)
            }
        }
        Some(event)
    }

    fn step(&mut self, delta: isize) -> Option<MenuEvent> {
        let last = self.entries.len() - 1;
        let target = match (delta < 0, self.current_selection) {
            (true, 0) if self.wrap_selection => last,
            (true, cur) => cur.saturating_sub(1),
            (false, cur) if cur == last && self.wrap_selection => 0,
            (false, cur) => (cur + 1).min(last),
        };
        self.move_to(target)
    }

    fn page(&mut self, direction: isize) -> Option<MenuEvent> {
        let last = self.entries.len() - 1;
        let target = if direction < 0 {
            self.current_selection.saturating_sub(self.visible_rows)
        } else {
            (self.current_selection + self.visible_rows).min(last)
        };
        self.move_to(target)
    }

    fn move_to(&mut self, target: usize) -> Option<MenuEvent> {
        if target == self.current_selection {
            return None;
        }
        self.current_selection = target;
        self.adjust_scroll();
        Some(MenuEvent::Hover(target))
    }

    fn cycle_submenu(&mut self, delta: isize) -> Option<MenuEvent> {
        let index = self.current_selection;
        let submenu = self.entries.get_mut(index)?.submenu.as_mut()?;
        let option = if delta < 0 {
            submenu.selected.checked_sub(1)?
        } else {
            submenu.selected + 1
        };
        if !submenu.select(option) {
            return None;
        }
        Some(MenuEvent::Submenu {
            index,
            option: submenu.selected,
        })
    }

    /// Adjust scroll offset to keep selected item visible
    fn adjust_scroll(&mut self) {
        if self.current_selection < self.scroll_offset {
            self.scroll_offset = self.current_selection;
        } else if self.current_selection >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.current_selection + 1 - self.visible_rows;
        }
    }

    /// Render the visible rows inside `area`, clipped to it.
    ///
    /// Rows that do not fit in `area` are skipped; an empty menu draws
    /// nothing.
    pub fn draw<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        area: Rectangle,
        highlight: bool,
    ) -> Result<(), D::Error> {
        let mut clipped = display.clipped(&area);
        let fits = (area.size.height as i32 / layout::ROW_H).max(0) as usize;
        let rows = self.visible_rows.min(fits);
        let char_w = ui_font_body_char_width().max(1);
        let max_chars = (area.size.width as i32 / char_w).max(0) as usize;

        for (i, entry) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(rows)
        {
            let row_top = area.top_left.y + (i - self.scroll_offset) as i32 * layout::ROW_H;
            let is_selected = highlight && i == self.current_selection;

            if is_selected {
                Rectangle::new(
                    Point::new(area.top_left.x, row_top),
                    Size::new(area.size.width, layout::ROW_H as u32),
                )
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(&mut clipped)?;
            }

            let Some(label) = entry.label() else {
                continue;
            };
            let text = match entry.submenu().and_then(Submenu::selected_label) {
                Some(option) => format!("{}: < {} >", label, option),
                None => String::from(label),
            };
            let text: String = text.chars().take(max_chars).collect();
            let color = if is_selected {
                BinaryColor::Off
            } else {
                BinaryColor::On
            };
            Text::new(
                &text,
                Point::new(
                    area.top_left.x + layout::INNER_PAD,
                    row_top + layout::ROW_TEXT_Y,
                ),
                MonoTextStyle::new(ui_font_body(), color),
            )
            .draw(&mut clipped)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    #[derive(Default)]
    struct Recorder {
        selects: Vec<usize>,
        hovers: Vec<usize>,
        escapes: Vec<usize>,
        submenus: Vec<(usize, usize)>,
    }

    impl MenuCallbacks for Recorder {
        fn select_callback(&mut self, _ctx: &mut GuiContext, _menu: &Menu, index: usize) {
            self.selects.push(index);
        }
        fn hover_callback(&mut self, _ctx: &mut GuiContext, _menu: &Menu, index: usize) {
            self.hovers.push(index);
        }
        fn escape_callback(&mut self, _ctx: &mut GuiContext, _menu: &Menu, index: usize) {
            self.escapes.push(index);
        }
        fn submenu_callback(
            &mut self,
            _ctx: &mut GuiContext,
            _menu: &Menu,
            index: usize,
            option: usize,
        ) {
            self.submenus.push((index, option));
        }
    }

    fn names() -> Menu {
        Menu::new(2).with_entries(["Alice", "Bob", "Carol"])
    }

    #[test]
    fn down_moves_and_clamps_at_the_end() {
        let mut ctx = GuiContext::default();
        let mut menu = names();
        let mut rec = Recorder::default();

        menu.push_event(KeyInput::DOWN, &mut rec, &mut ctx);
        menu.push_event(KeyInput::DOWN, &mut rec, &mut ctx);
        assert_eq!(menu.current_selection(), 2);
        assert_eq!(rec.hovers, [1, 2]);

        assert_eq!(menu.push_event(KeyInput::DOWN, &mut rec, &mut ctx), None);
        assert_eq!(menu.current_selection(), 2);
        assert_eq!(rec.hovers, [1, 2]);
    }

    #[test]
    fn up_at_top_is_clamped_without_hover() {
        let mut ctx = GuiContext::default();
        let mut menu = names();
        let mut rec = Recorder::default();

        menu.push_event(KeyInput::UP, &mut rec, &mut ctx);
        assert_eq!(menu.current_selection(), 0);
        assert!(rec.hovers.is_empty());
    }

    #[test]
    fn selection_stays_in_bounds_for_any_move_sequence() {
        let mut ctx = GuiContext::default();
        let mut menu = Menu::new(3).with_entries(["a", "b", "c", "d", "e"]);
        let mut rec = Recorder::default();
        let moves = [
            KeyInput::DOWN,
            KeyInput::PAGE_DOWN,
            KeyInput::DOWN,
            KeyInput::DOWN,
            KeyInput::UP,
            KeyInput::PAGE_UP,
            KeyInput::PAGE_UP,
            KeyInput::UP,
            KeyInput::PAGE_DOWN,
            KeyInput::PAGE_DOWN,
        ];

        let mut changes = 0;
        for input in moves {
            let before = menu.current_selection();
            menu.push_event(input, &mut rec, &mut ctx);
            let after = menu.current_selection();
            assert!(after < menu.len());
            assert!(after >= menu.scroll_offset());
            assert!(after < menu.scroll_offset() + menu.visible_rows());
            if before != after {
                changes += 1;
            }
        }
        assert_eq!(rec.hovers.len(), changes);
    }

    #[test]
    fn escape_and_select_report_current_index() {
        let mut ctx = GuiContext::default();
        let mut menu = names();
        let mut rec = Recorder::default();

        menu.push_event(KeyInput::DOWN, &mut rec, &mut ctx);
        menu.push_event(KeyInput::SELECT, &mut rec, &mut ctx);
        menu.push_event(KeyInput::ESCAPE, &mut rec, &mut ctx);
        assert_eq!(rec.selects, [1]);
        assert_eq!(rec.escapes, [1]);
        assert_eq!(menu.current_selection(), 1);
    }

    #[test]
    fn escape_takes_priority_over_select() {
        let mut menu = names();
        assert_eq!(
            menu.handle_input(KeyInput::SELECT | KeyInput::ESCAPE),
            Some(MenuEvent::Escape(0))
        );
    }

    #[test]
    fn empty_menu_ignores_everything() {
        let mut ctx = GuiContext::default();
        let mut menu = names();
        let mut rec = Recorder::default();
        menu.set_text(Vec::<MenuEntry>::new());

        for input in [
            KeyInput::SELECT,
            KeyInput::ESCAPE,
            KeyInput::DOWN,
            KeyInput::UP,
            KeyInput::PAGE_DOWN,
            KeyInput::RIGHT,
        ] {
            assert_eq!(menu.push_event(input, &mut rec, &mut ctx), None);
        }
        assert!(rec.selects.is_empty());
        assert!(rec.hovers.is_empty());
        assert!(rec.escapes.is_empty());
        assert_eq!(menu.selected_entry(), None);
    }

    #[test]
    fn set_text_resets_scroll_and_clamps_selection() {
        let mut menu = Menu::new(2).with_entries(["a", "b", "c", "d", "e"]);
        menu.set_selection(4);
        assert_eq!(menu.scroll_offset(), 3);

        menu.set_text(["x", "y"]);
        assert_eq!(menu.current_selection(), 1);
        assert_eq!(menu.scroll_offset(), 0);
    }

    #[test]
    fn set_text_keeps_a_deep_selection_visible() {
        let mut menu = Menu::new(2).with_entries(["a", "b", "c", "d", "e"]);
        menu.set_selection(4);

        menu.set_text(["v", "w", "x", "y"]);
        assert_eq!(menu.current_selection(), 3);
        assert_eq!(menu.scroll_offset(), 2);
    }

    #[test]
    fn set_text_does_not_fire_hover() {
        let mut ctx = GuiContext::default();
        let mut menu = names();
        let mut rec = Recorder::default();
        menu.push_event(KeyInput::DOWN, &mut rec, &mut ctx);
        menu.set_text(["only"]);
        assert_eq!(rec.hovers, [1]);
        assert_eq!(menu.current_selection(), 0);
    }

    #[test]
    fn external_selection_is_clamped() {
        let mut menu = names();
        menu.set_selection(99);
        assert_eq!(menu.current_selection(), 2);
    }

    #[test]
    fn page_moves_by_viewport_and_clamps() {
        let mut menu = Menu::new(3).with_entries(["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(menu.handle_input(KeyInput::PAGE_DOWN), Some(MenuEvent::Hover(3)));
        assert_eq!(menu.handle_input(KeyInput::PAGE_DOWN), Some(MenuEvent::Hover(6)));
        assert_eq!(menu.handle_input(KeyInput::PAGE_DOWN), None);
        assert_eq!(menu.scroll_offset(), 4);
        assert_eq!(menu.handle_input(KeyInput::PAGE_UP), Some(MenuEvent::Hover(3)));
        assert_eq!(menu.handle_input(KeyInput::PAGE_UP), Some(MenuEvent::Hover(0)));
        assert_eq!(menu.scroll_offset(), 0);
    }

    #[test]
    fn wraparound_only_when_configured() {
        let mut menu = names().with_wraparound(true);
        assert_eq!(menu.handle_input(KeyInput::UP), Some(MenuEvent::Hover(2)));
        assert_eq!(menu.handle_input(KeyInput::DOWN), Some(MenuEvent::Hover(0)));

        let mut clamped = names();
        assert_eq!(clamped.handle_input(KeyInput::UP), None);
    }

    #[test]
    fn left_right_cycle_submenu_options() {
        let mut ctx = GuiContext::default();
        let mut rec = Recorder::default();
        let mut menu = Menu::new(4).with_entries([
            MenuEntry::with_submenu("Port", Submenu::new(["1", "2"])),
            MenuEntry::text("Plain"),
        ]);

        menu.push_event(KeyInput::LEFT, &mut rec, &mut ctx);
        menu.push_event(KeyInput::RIGHT, &mut rec, &mut ctx);
        menu.push_event(KeyInput::RIGHT, &mut rec, &mut ctx);
        assert_eq!(rec.submenus, [(0, 1)]);
        assert_eq!(menu.submenu_selection(0), Some(1));

        menu.push_event(KeyInput::DOWN, &mut rec, &mut ctx);
        assert_eq!(menu.push_event(KeyInput::RIGHT, &mut rec, &mut ctx), None);
        assert_eq!(menu.submenu_selection(1), None);
    }

    #[test]
    fn placeholder_rows_are_selectable_but_unlabelled() {
        let mut menu =
            Menu::new(4).with_entries([MenuEntry::text("top"), MenuEntry::placeholder()]);
        menu.handle_input(KeyInput::DOWN);
        assert_eq!(menu.current_selection(), 1);
        assert_eq!(menu.selected_label(), None);
    }

    #[test]
    fn draw_clips_to_small_area_and_handles_empty_menu() {
        let mut surface = Surface::new(100, 100);
        let menu = Menu::new(10).with_entries(["a long entry label", "b", "c", "d"]);
        let area = Rectangle::new(Point::new(10, 10), Size::new(30, 40));
        menu.draw(&mut surface, area, true).unwrap();
        assert!(surface.black_pixel_count() > 0);
        assert_eq!(
            surface.black_pixel_count(),
            surface.black_pixels_in(area)
        );

        let mut blank = Surface::new(100, 100);
        Menu::new(4)
            .draw(&mut blank, Rectangle::new(Point::zero(), Size::new(100, 100)), true)
            .unwrap();
        assert_eq!(blank.black_pixel_count(), 0);

        let mut tiny = Surface::new(10, 10);
        names()
            .draw(&mut tiny, Rectangle::new(Point::zero(), Size::new(0, 0)), true)
            .unwrap();
        assert_eq!(tiny.black_pixel_count(), 0);
    }

    #[test]
    fn default_callbacks_are_noops() {
        let mut ctx = GuiContext::default();
        let mut menu = names();
        assert_eq!(
            menu.push_event(KeyInput::SELECT, &mut NoCallbacks, &mut ctx),
            Some(MenuEvent::Select(0))
        );
    }
}
