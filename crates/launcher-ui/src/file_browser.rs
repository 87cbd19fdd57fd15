//! Directory-backed menu.
//!
//! A [`FileBrowser`] is a [`Menu`] whose entries come from a
//! [`DirectorySource`]: directories first (shown as `[name]`), then files
//! matching the allowed extensions. Selection, paging and callbacks are the
//! plain menu state machine.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

use crate::filesystem::{dirname, extension_matches, join_path, FileSystem};
use crate::gui::GuiContext;
use crate::input::KeyInput;
use crate::menu::{Menu, MenuCallbacks, MenuEvent};

/// Label of the optional leading "no disc" entry.
pub const NO_DISC_LABEL: &str = "None";

/// Label of the entry leading to the parent directory.
pub const PARENT_LABEL: &str = "[..]";

/// Whether a menu label uses the bracketed directory convention.
pub fn is_directory_label(label: &str) -> bool {
    label.starts_with('[') && label.ends_with(']')
}

/// One name returned by a [`DirectorySource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_directory: bool,
}

/// Produces the raw listing of a directory. Failures are an empty listing.
pub trait DirectorySource {
    fn list(&mut self, path: &str) -> Vec<DirectoryEntry>;
}

impl<T: FileSystem + ?Sized> DirectorySource for T {
    fn list(&mut self, path: &str) -> Vec<DirectoryEntry> {
        match self.list_files(path) {
            Ok(files) => files
                .into_iter()
                .map(|f| DirectoryEntry {
                    name: f.name,
                    is_directory: f.is_directory,
                })
                .collect(),
            Err(err) => {
                log::warn!("LIST: '{}' unavailable: {}", path, err);
                Vec::new()
            }
        }
    }
}

/// What a browser row stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserItem {
    NoDisc,
    Parent,
    Directory(String),
    File(String),
}

impl BrowserItem {
    pub fn label(&self) -> String {
        match self {
            BrowserItem::NoDisc => NO_DISC_LABEL.to_string(),
            BrowserItem::Parent => PARENT_LABEL.to_string(),
            BrowserItem::Directory(name) => format!("[{}]", name),
            BrowserItem::File(name) => name.clone(),
        }
    }
}

/// Menu populated from a directory listing.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    menu: Menu,
    items: Vec<BrowserItem>,
    current_path: String,
    root: String,
    extensions: Vec<String>,
    no_disc_entry: bool,
}

impl FileBrowser {
    pub fn new<S: AsRef<str>>(extensions: &[S], visible_rows: usize) -> Self {
        Self {
            menu: Menu::new(visible_rows),
            items: Vec::new(),
            current_path: String::from("/"),
            root: String::from("/"),
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
            no_disc_entry: false,
        }
    }

    /// Never ascend above `root`.
    pub fn with_root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    /// Prepend a [`NO_DISC_LABEL`] entry to every listing.
    pub fn with_no_disc_entry(mut self, enabled: bool) -> Self {
        self.no_disc_entry = enabled;
        self
    }

    pub fn with_wraparound(mut self, wrap: bool) -> Self {
        self.menu = self.menu.with_wraparound(wrap);
        self
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn item(&self, index: usize) -> Option<&BrowserItem> {
        self.items.get(index)
    }

    pub fn selected_item(&self) -> Option<&BrowserItem> {
        self.item(self.menu.current_selection())
    }

    pub fn items(&self) -> &[BrowserItem] {
        &self.items
    }

    /// Full path of a file row.
    pub fn full_path(&self, index: usize) -> Option<String> {
        match self.items.get(index)? {
            BrowserItem::File(name) => Some(join_path(&self.current_path, name)),
            _ => None,
        }
    }

    /// Switch to `path` and rebuild the entries from `source`.
    pub fn set_directory<S>(&mut self, path: &str, source: &mut S)
    where
        S: DirectorySource + ?Sized,
    {
        log::info!("BROWSE: {} -> {}", self.current_path, path);
        self.current_path = path.to_string();
        self.populate(source);
        self.menu.set_selection(0);
    }

    /// Re-read the current directory, keeping the (clamped) selection.
    pub fn reload<S>(&mut self, source: &mut S)
    where
        S: DirectorySource + ?Sized,
    {
        self.populate(source);
    }

    /// Descend into a directory row or ascend via the parent row.
    ///
    /// Returns false for file and no-disc rows.
    pub fn enter<S>(&mut self, index: usize, source: &mut S) -> bool
    where
        S: DirectorySource + ?Sized,
    {
        let target = match self.items.get(index) {
            Some(BrowserItem::Directory(name)) => join_path(&self.current_path, name),
            Some(BrowserItem::Parent) => dirname(&self.current_path).to_string(),
            _ => return false,
        };
        self.set_directory(&target, source);
        true
    }

    fn at_root(&self) -> bool {
        self.current_path.trim_end_matches('/') == self.root.trim_end_matches('/')
    }

    fn populate<S>(&mut self, source: &mut S)
    where
        S: DirectorySource + ?Sized,
    {
        let mut listing: Vec<DirectoryEntry> = source
            .list(&self.current_path)
            .into_iter()
            .filter(|e| e.is_directory || extension_matches(&e.name, &self.extensions))
            .collect();

        // Directories first, then alphabetically
        listing.sort_by(|a, b| match (a.is_directory, b.is_directory) {
            (true, false) => core::cmp::Ordering::Less,
            (false, true) => core::cmp::Ordering::Greater,
            _ => a.name.cmp(&b.name),
        });

        let mut items = Vec::with_capacity(listing.len() + 2);
        if self.no_disc_entry {
            items.push(BrowserItem::NoDisc);
        }
        if !self.at_root() {
            items.push(BrowserItem::Parent);
        }
        items.extend(listing.into_iter().map(|e| {
            if e.is_directory {
                BrowserItem::Directory(e.name)
            } else {
                BrowserItem::File(e.name)
            }
        }));

        log::info!(
            "LOAD: {} entries in '{}'",
            items.len(),
            self.current_path
        );
        self.menu.set_text(items.iter().map(BrowserItem::label));
        self.items = items;
    }

    pub fn push_event<C>(
        &mut self,
        input: KeyInput,
        callbacks: &mut C,
        ctx: &mut GuiContext,
    ) -> Option<MenuEvent>
    where
        C: MenuCallbacks + ?Sized,
    {
        self.menu.push_event(input, callbacks, ctx)
    }

    pub fn draw<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        area: Rectangle,
    ) -> Result<(), D::Error> {
        self.menu.draw(display, area, true)
    }
}
