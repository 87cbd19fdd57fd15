//! Insert-disc flows driven through the whole gui.

use std::{env, path::PathBuf};

use launcher_scenario_harness::ScenarioHarness;
use launcher_ui::views::STAGED_PROGRAM_NAME;
use launcher_ui::{
    BrowserItem, DiscView, FileSystem, GameInfo, GameInfoCatalog, KeyInput, MockFileSystem,
};

fn setup_harness() -> ScenarioHarness {
    let games = GameInfoCatalog::new()
        .with(
            "elite.d64",
            GameInfo::named("Elite")
                .with_author("Bell & Braben")
                .with_year(1985),
        )
        .with("second_reality.d64", GameInfo::named("Second Reality"));
    ScenarioHarness::new(MockFileSystem::new(), games)
}

fn preview_name(harness: &ScenarioHarness) -> Option<String> {
    harness
        .top_view_as::<DiscView>()
        .and_then(|view| view.info_box().info())
        .and_then(|info| info.name.clone())
}

#[test]
fn browse_preview_and_insert() {
    let mut harness = setup_harness();
    assert_eq!(harness.top_view(), "main");
    assert!(harness.context().emulator.is_paused());

    harness.press(KeyInput::SELECT);
    assert_eq!(harness.top_view(), "disc");
    harness.assert_render_budget_ms(250, "disc");
    maybe_capture(&harness, "disc_browser");

    harness.press_n(KeyInput::DOWN, 3);
    harness.advance(99, 33);
    assert_eq!(preview_name(&harness), None, "preview fired early");
    harness.advance(1, 1);
    assert_eq!(preview_name(&harness).as_deref(), Some("Elite"));

    harness.press(KeyInput::SELECT);
    assert_eq!(harness.top_view(), "main");
    assert!(harness.gui().is_active());
    let ctx = harness.context();
    assert_eq!(ctx.prefs.drive_path(0), Some("/games/elite.d64"));
    assert_eq!(
        ctx.current_game.as_ref().and_then(|g| g.author.as_deref()),
        Some("Bell & Braben")
    );

    harness.press(KeyInput::ESCAPE);
    assert!(!harness.gui().is_active());
    assert!(!harness.context().emulator.is_paused());
    assert!(!harness.context().quit_requested);
}

#[test]
fn descend_into_subdirectory_and_back() {
    let mut harness = setup_harness();
    harness.press(KeyInput::SELECT);
    harness.press(KeyInput::DOWN);
    harness.press(KeyInput::SELECT);

    let browser = harness
        .top_view_as::<DiscView>()
        .expect("disc view on top")
        .browser();
    assert_eq!(browser.current_path(), "/games/demos");
    assert_eq!(
        browser.items(),
        [
            BrowserItem::NoDisc,
            BrowserItem::Parent,
            BrowserItem::File("second_reality.d64".to_string())
        ]
    );

    // Parent row leads back up
    harness.press(KeyInput::DOWN);
    harness.press(KeyInput::SELECT);
    let browser = harness
        .top_view_as::<DiscView>()
        .expect("disc view on top")
        .browser();
    assert_eq!(browser.current_path(), "/games");

    harness.press(KeyInput::DOWN);
    harness.press(KeyInput::SELECT);
    harness.press_n(KeyInput::DOWN, 2);
    harness.advance(100, 16);
    assert_eq!(preview_name(&harness).as_deref(), Some("Second Reality"));
    harness.press(KeyInput::SELECT);
    assert_eq!(
        harness.context().prefs.drive_path(0),
        Some("/games/demos/second_reality.d64")
    );
}

#[test]
fn escape_leaves_the_drive_untouched() {
    let mut harness = setup_harness();
    harness.press(KeyInput::SELECT);
    harness.press_n(KeyInput::DOWN, 3);
    harness.press(KeyInput::ESCAPE);

    assert_eq!(harness.top_view(), "main");
    assert_eq!(harness.context().prefs.drive_path(0), None);
    assert_eq!(harness.context().timers.pending_count(), 0);
}

#[test]
fn program_files_are_staged_for_loading() {
    let mut harness = setup_harness();
    harness.press(KeyInput::SELECT);
    harness.press_n(KeyInput::DOWN, 2);
    harness.press(KeyInput::SELECT);

    assert_eq!(harness.top_view(), "main");
    assert_eq!(harness.context().prefs.drive_path(0), Some("/tmp"));

    let fs = &mut harness.context_mut().fs;
    let staged = fs.list_files("/tmp").expect("tmp directory listing");
    assert_eq!(staged.len(), 1);
    assert_eq!(staged[0].name, STAGED_PROGRAM_NAME);
    assert_eq!(
        fs.read_file("/tmp/a").expect("staged program"),
        fs.read_file("/games/boulder_dash.prg").expect("source program")
    );
}

fn maybe_capture(harness: &ScenarioHarness, name: &str) {
    if env::var("SCENARIO_CAPTURE").is_err() {
        return;
    }
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target/scenario-snapshots");
    path.push(format!("{}.png", name));
    harness
        .save_screenshot_png(&path)
        .expect("screenshot capture should succeed");
}
