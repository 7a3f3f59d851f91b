use crate::logging::LogBuffer;
use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use repodash_core::command::SystemRunner;
use repodash_core::config::RepoConfig;
use repodash_core::dispatch::{CommandSet, run_all};
use repodash_core::model::RepoEntity;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

mod draw;
mod layout;
#[cfg(test)]
mod tests;

pub fn run_tui(
    config_path: PathBuf,
    commands: CommandSet,
    interval: Duration,
    log_buffer: LogBuffer,
) -> anyhow::Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let app = DashApp::load(config_path, commands, interval, log_buffer);
    let result = run_app(&mut terminal, app);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: DashApp,
) -> anyhow::Result<()> {
    // show the loaded list in its queued state, then settle it with one
    // full check pass
    terminal.draw(|frame| app.draw(frame))?;
    app.run_pass();

    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let timeout = app
            .interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    if app.mark_sync_at(&mouse) {
                        // redraw first so the cell reads `syncing...` while
                        // the pass blocks on the join barrier
                        terminal.draw(|frame| app.draw(frame))?;
                        app.run_pass();
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= app.interval {
            app.mark_all_checks();
            app.run_pass();
            last_tick = Instant::now();
        }
    }
}

struct DashApp {
    entities: Vec<RepoEntity>,
    commands: CommandSet,
    runner: SystemRunner,
    config_path: PathBuf,
    interval: Duration,
    escape_count: u8,
    log_buffer: LogBuffer,
}

impl DashApp {
    fn load(
        config_path: PathBuf,
        commands: CommandSet,
        interval: Duration,
        log_buffer: LogBuffer,
    ) -> Self {
        let entities = load_entities(&config_path);
        Self {
            entities,
            commands,
            runner: SystemRunner,
            config_path,
            interval,
            escape_count: 0,
            log_buffer,
        }
    }

    /// One fan-out/fan-in pass over the full collection. Runs inline in the
    /// event loop, so at most one pass is ever in flight.
    fn run_pass(&mut self) {
        let snapshot = std::mem::take(&mut self.entities);
        self.entities = run_all(snapshot, &self.commands, &self.runner);
    }

    fn mark_all_checks(&mut self) {
        for entity in &mut self.entities {
            entity.pending_check = true;
        }
    }

    /// Queues a sync for the entity whose cell interior contains the press,
    /// if any. Returns whether a dispatch pass is warranted; a miss triggers
    /// nothing.
    fn mark_sync_at(&mut self, mouse: &MouseEvent) -> bool {
        let MouseEventKind::Down(MouseButton::Left | MouseButton::Middle | MouseButton::Right) =
            mouse.kind
        else {
            return false;
        };
        match layout::hit_test(mouse.column, mouse.row, self.entities.len()) {
            Some(index) => {
                let entity = &mut self.entities[index];
                entity.pending_sync = true;
                info!(repo = %entity.name, "sync requested");
                true
            }
            None => false,
        }
    }

    /// Two Esc presses quit; the counter deliberately never resets.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.escape_count = self.escape_count.saturating_add(1);
                self.escape_count > 1
            }
            KeyCode::Char('r') => {
                self.reload();
                false
            }
            _ => false,
        }
    }

    /// Replaces the collection from disk; the only point where repos are
    /// added or removed while running.
    fn reload(&mut self) {
        info!(path = %self.config_path.display(), "reloading repo list");
        self.entities = load_entities(&self.config_path);
        self.run_pass();
    }
}

/// A repo list that fails to load renders as an empty dashboard rather than
/// aborting.
fn load_entities(path: &Path) -> Vec<RepoEntity> {
    match RepoConfig::load(path) {
        Ok(config) => {
            let entities = config.into_entities(true);
            info!(count = entities.len(), "repo list loaded");
            entities
        }
        Err(err) => {
            warn!(error = %err, "failed to load repo list");
            Vec::new()
        }
    }
}
