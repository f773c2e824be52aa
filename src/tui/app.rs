//! Main TUI application loop.
//!
//! Handles:
//! - Terminal setup and restore
//! - Input event handling
//! - Re-evaluation on every input change

use std::io;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::application::AssessmentService;
use crate::domain::RidgeModel;

use super::ui::{
    assessment::{render_assessment, AssessmentFormState},
    render_disclaimer,
};

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Evaluates the form on each render
    assessment_service: AssessmentService<RidgeModel>,

    /// Current widget values
    form_state: AssessmentFormState,
}

impl App {
    /// Create the application with the model selected by `AKI_RISK_MODEL_PATH`
    /// (the embedded ICU ridge model when unset).
    ///
    /// # Errors
    /// Returns error if a configured model file cannot be loaded. There is no
    /// silent fallback to the embedded coefficients.
    pub fn new() -> Result<Self> {
        let model =
            crate::configured_model().map_err(|e| anyhow!("Failed to load AKI model: {e}"))?;

        Ok(Self::with_service(AssessmentService::new(Arc::new(model))))
    }

    /// Create the application with an injected service.
    #[must_use]
    pub fn with_service(assessment_service: AssessmentService<RidgeModel>) -> Self {
        Self {
            should_quit: false,
            assessment_service,
            form_state: AssessmentFormState::default(),
        }
    }

    /// Current form state.
    #[must_use]
    pub fn form_state(&self) -> &AssessmentFormState {
        &self.form_state
    }

    /// Whether a quit key has been pressed.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore the terminal even if the loop failed.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit {
            // Fresh evaluation per render; nothing carries over.
            let assessment = self.assessment_service.assess(self.form_state.to_input());
            let model_name = self.assessment_service.model_name();

            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(f.area());

                render_assessment(f, chunks[0], &self.form_state, &assessment, model_name);
                render_disclaimer(f, chunks[1]);
            })?;

            // Block until the next input; resize events fall through and redraw.
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }

        Ok(())
    }

    /// Apply one keypress to the form.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.form_state.toggle();
            }
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.form_state.increase();
            }
            KeyCode::Left | KeyCode::Char('-') => {
                self.form_state.decrease();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form_state.reset();
                tracing::debug!("Form reset to defaults");
            }
            _ => {}
        }
    }
}
