//! Desktop SDL simulator for the launcher menu.
//!
//! Usage: `launcher-sim [GAMES_ROOT] [CONFIG]`. Without a root directory the
//! built-in sample library is browsed.

use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    sdl2::Keycode, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use launcher_ui::{
    GameInfo, GameInfoCatalog, Gui, GuiContext, HostFileSystem, KeyInput, MainView, MenuConfig,
    MetadataDirectory, MockFileSystem, Surface, DISPLAY_HEIGHT, DISPLAY_WIDTH,
};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let games_root = args.next();
    let config = match args.next() {
        Some(path) => MenuConfig::load(path)?,
        None => MenuConfig::default(),
    };
    let ctx = build_context(games_root.as_deref(), config);

    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut display: SimulatorDisplay<BinaryColor> =
        SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let mut window = Window::new("Launcher menu", &output_settings);
    let mut surface = Surface::default_size();

    let main_view = MainView::new(&ctx);
    let mut gui = Gui::new(main_view, ctx);
    gui.activate();

    println!("Launcher Simulator");
    println!("Controls:");
    println!("  Arrow Keys          - Navigate / change option");
    println!("  Page Up / Page Down - Scroll a page");
    println!("  Enter / Space       - Select");
    println!("  Escape / Backspace  - Back");
    println!("  F1                  - Reopen the menu");

    let mut last = Instant::now();
    loop {
        let mut input = KeyInput::empty();
        for event in window.events().collect::<Vec<_>>() {
            match event {
                SimulatorEvent::Quit => return Ok(()),
                SimulatorEvent::KeyDown { keycode, .. } => input |= keycode_to_input(keycode),
                _ => {}
            }
        }

        if !gui.is_active() && input.contains(KeyInput::HELP) {
            gui.activate();
            input = KeyInput::empty();
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis().min(u128::from(u32::MAX)) as u32;
        last = now;

        let was_active = gui.is_active();
        gui.frame(input, elapsed, &mut surface)?;
        if was_active && !gui.is_active() {
            if gui.context().quit_requested {
                log::info!("quit requested, drive 0: {:?}", gui.context().prefs.drive_path(0));
                return Ok(());
            }
            surface.fill_background();
            log::info!(
                "menu closed, emulator resumed with {:?}",
                gui.context().current_game.as_ref().and_then(|g| g.name.as_deref())
            );
        }

        let area = display.bounding_box();
        display.fill_contiguous(&area, surface.pixels().iter().copied())?;
        window.update(&display);
        std::thread::sleep(FRAME);
    }
}

fn build_context(games_root: Option<&str>, config: MenuConfig) -> GuiContext {
    match games_root {
        Some(root) => {
            let metadata =
                MetadataDirectory::new(HostFileSystem::new(root), &config.metadata_base_path);
            GuiContext::new(config)
                .with_filesystem(HostFileSystem::new(root))
                .with_game_info_source(metadata)
        }
        None => GuiContext::new(config)
            .with_filesystem(MockFileSystem::new())
            .with_game_info_source(
                GameInfoCatalog::new()
                    .with(
                        "elite.d64",
                        GameInfo::named("Elite")
                            .with_author("Bell & Braben")
                            .with_year(1985),
                    )
                    .with(
                        "impossible_mission.t64",
                        GameInfo::named("Impossible Mission")
                            .with_author("Dennis Caswell")
                            .with_year(1984),
                    ),
            ),
    }
}

fn keycode_to_input(keycode: Keycode) -> KeyInput {
    match keycode {
        Keycode::Up => KeyInput::UP,
        Keycode::Down => KeyInput::DOWN,
        Keycode::Left => KeyInput::LEFT,
        Keycode::Right => KeyInput::RIGHT,
        Keycode::PageUp => KeyInput::PAGE_UP,
        Keycode::PageDown => KeyInput::PAGE_DOWN,
        Keycode::Return | Keycode::Space => KeyInput::SELECT,
        Keycode::Escape | Keycode::Backspace => KeyInput::ESCAPE,
        Keycode::F1 => KeyInput::HELP,
        _ => KeyInput::empty(),
    }
}
