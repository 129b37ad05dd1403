use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ember_core::{EnhancementConfig, ParticleConfig};
use ember_fx::{EasterEgg, ParticleAnimator, Stage};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    symbols::Marker,
    text::Line,
    widgets::canvas::Canvas,
};

use crate::surface::{TermSurface, UNITS_PER_COLUMN, UNITS_PER_ROW};

/// About 30 frames per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Hands out a surface covering the whole drawing area.
struct TerminalStage {
    columns: u16,
    rows: u16,
}

impl Stage for TerminalStage {
    type Surface = TermSurface;

    fn mount(
        &mut self,
        _selector: &str,
        _config: &ParticleConfig,
    ) -> Option<(TermSurface, f64, f64)> {
        let (width, height) = TermSurface::size_for(self.columns, self.rows);
        Some((TermSurface::default(), width, height))
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Frozen on the current frame?
    paused: bool,
    config: EnhancementConfig,
    rng: SmallRng,
    animator: Option<ParticleAnimator<TermSurface>>,
    easter_egg: EasterEgg,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`]. Without a seed the field is
    /// seeded from the clock.
    pub fn new(config: EnhancementConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(clock_seed);
        log::info!("particle seed {seed}");
        Self {
            running: false,
            paused: false,
            easter_egg: EasterEgg::new(&config.easter_egg),
            config,
            rng: SmallRng::seed_from_u64(seed),
            animator: None,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.respawn(size.width, canvas_rows(size.height));
        self.running = true;
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Advance the field one frame unless paused.
    fn tick(&mut self) {
        if self.paused {
            return;
        }
        let now = self.now_ms();
        let hue = self
            .easter_egg
            .effect()
            .progress(now)
            .map_or(0.0, |p| p as f32 * 360.0);
        if let Some(animator) = self.animator.as_mut() {
            animator.surface_mut().set_hue_shift(hue);
            animator.frame();
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let [field_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        if let Some(animator) = &self.animator {
            let (width, height) = animator.field().size();
            let canvas = Canvas::default()
                .marker(Marker::Braille)
                .x_bounds([0.0, width])
                .y_bounds([0.0, height])
                .paint(|ctx| animator.surface().paint(ctx, height));
            frame.render_widget(canvas, field_area);
        }

        let accent = self.config.particles.color;
        let color = Color::Rgb(accent.r, accent.g, accent.b);
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "space".bold().fg(color),
            (if self.paused { " resume  " } else { " pause  " }).dark_gray(),
            "r".bold().fg(color),
            " respawn".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.resize(columns, canvas_rows(rows)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if let Some(name) = key_name(key.code) {
            let now = self.now_ms();
            self.easter_egg.on_key(&name, now);
        }
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.paused = !self.paused,
            (_, KeyCode::Char('r')) => self.respawn_in_place(),
            _ => {}
        }
    }

    /// Spawn a fresh field for a drawing area of `columns` by `rows`.
    fn respawn(&mut self, columns: u16, rows: u16) {
        let mut stage = TerminalStage { columns, rows };
        self.animator = ParticleAnimator::mount(&mut stage, &self.config.particles, &mut self.rng);
    }

    fn respawn_in_place(&mut self) {
        let Some(animator) = &self.animator else {
            return;
        };
        let (width, height) = animator.field().size();
        let columns = (width / UNITS_PER_COLUMN) as u16;
        let rows = (height / UNITS_PER_ROW) as u16;
        self.respawn(columns, rows);
    }

    /// Follow a terminal resize. Particles keep their positions.
    fn resize(&mut self, columns: u16, rows: u16) {
        if let Some(animator) = self.animator.as_mut() {
            let (width, height) = TermSurface::size_for(columns, rows);
            animator.resize(width, height);
        }
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Rows left for the field once the help line is drawn.
fn canvas_rows(rows: u16) -> u16 {
    rows.saturating_sub(1)
}

/// Browser-style key name, so the configured key sequence works unchanged.
fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Tab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
