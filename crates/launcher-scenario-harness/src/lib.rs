//! Host-side scenario test harness for scripted menu flows.

use std::path::Path;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::BinaryColor;
use launcher_ui::{
    GameInfoCatalog, Gui, GuiContext, GuiView, KeyInput, MainView, MenuConfig, MockFileSystem,
    Surface,
};

/// Couples the gui, its context and a framebuffer for scenario tests.
pub struct ScenarioHarness {
    gui: Gui,
    surface: Surface,
}

impl ScenarioHarness {
    /// Open the menu over a headless emulator with the given library and
    /// metadata.
    pub fn new(fs: MockFileSystem, games: GameInfoCatalog) -> Self {
        Self::with_config(fs, games, MenuConfig::default())
    }

    pub fn with_config(fs: MockFileSystem, games: GameInfoCatalog, config: MenuConfig) -> Self {
        let ctx = GuiContext::new(config)
            .with_filesystem(fs)
            .with_game_info_source(games);
        Self::with_context(ctx)
    }

    /// Start from a fully configured context, main menu at the bottom.
    pub fn with_context(ctx: GuiContext) -> Self {
        let main = MainView::new(&ctx);
        let mut gui = Gui::new(main, ctx);
        gui.activate();
        Self {
            gui,
            surface: Surface::default_size(),
        }
    }

    /// Route one input event, without a logic tick.
    pub fn press(&mut self, input: KeyInput) {
        self.gui.push_event(input);
    }

    /// Press the same input `times` times.
    pub fn press_n(&mut self, input: KeyInput, times: usize) {
        for _ in 0..times {
            self.press(input);
        }
    }

    /// Run logic frames of `step_ms` until `total_ms` has elapsed.
    pub fn advance(&mut self, total_ms: u32, step_ms: u32) {
        let step = step_ms.max(1);
        let mut elapsed = 0;
        while elapsed < total_ms {
            let dt = step.min(total_ms - elapsed);
            self.gui.run_logic(dt);
            elapsed += dt;
        }
    }

    /// One full frame: input, logic, draw.
    pub fn frame(&mut self, input: KeyInput, elapsed_ms: u32) {
        let Ok(()) = self.gui.frame(input, elapsed_ms, &mut self.surface);
    }

    /// Render the current screen.
    pub fn render(&mut self) {
        let Ok(()) = self.gui.draw(&mut self.surface);
    }

    /// Render and return elapsed wall time.
    pub fn render_timed(&mut self) -> Duration {
        let start = Instant::now();
        self.render();
        start.elapsed()
    }

    /// Render and assert wall-time budget in milliseconds.
    pub fn assert_render_budget_ms(&mut self, max_ms: u128, label: &str) {
        let elapsed = self.render_timed();
        assert!(
            elapsed.as_millis() <= max_ms,
            "{} render exceeded budget: {}ms > {}ms",
            label,
            elapsed.as_millis(),
            max_ms
        );
    }

    pub fn gui(&self) -> &Gui {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut Gui {
        &mut self.gui
    }

    pub fn context(&self) -> &GuiContext {
        self.gui.context()
    }

    pub fn context_mut(&mut self) -> &mut GuiContext {
        self.gui.context_mut()
    }

    /// Name of the view currently receiving input.
    pub fn top_view(&self) -> &'static str {
        self.gui.peek_view().name()
    }

    /// Downcast the top view for state assertions.
    pub fn top_view_as<T: GuiView + 'static>(&self) -> Option<&T> {
        self.gui.peek_view().as_any().downcast_ref::<T>()
    }

    pub fn overlay_name(&self) -> Option<&'static str> {
        self.gui.overlay().map(|o| o.name())
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Save the current framebuffer to a PNG (white = Off, black = On).
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let (width, height) = self.surface.dimensions();
        let data: Vec<u8> = self
            .surface
            .pixels()
            .iter()
            .map(|pixel| match pixel {
                BinaryColor::On => 0u8,
                BinaryColor::Off => 255u8,
            })
            .collect();

        let image = image::GrayImage::from_raw(width, height, data)
            .ok_or_else(|| String::from("framebuffer size mismatch"))?;
        image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| e.to_string())
    }
}
