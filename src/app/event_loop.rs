use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::{DefaultTerminal, Frame};

use crate::app::{App, Model, update};
use crate::storage;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, document loading, or the
    /// event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Load the document before touching the terminal so load errors
        // print normally.
        let blocks = if self.file_path.exists() {
            storage::load_blocks(&self.file_path)
                .with_context(|| format!("Failed to load {}", self.file_path.display()))?
        } else {
            Vec::new()
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - blockpad requires an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableMouseCapture)?;

        let mut model = Model::new(self.file_path.clone(), blocks, (size.width, size.height));
        model.panel_visible = self.panel_visible;
        model.autosave = self.autosave;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model.list.set_on_change(Box::new(|blocks| {
            tracing::debug!(blocks = blocks.len(), "document changed");
        }));

        let result = Self::event_loop(&mut terminal, &mut model);

        // Restore terminal
        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(event::read()?, model) {
                    tracing::debug!(?msg, "event message");
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &side_msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(event::read()?, model) {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    pub(super) fn view(model: &mut Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
