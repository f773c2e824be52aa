//! Risk assessment form and result panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, LineGauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Assessment, RiskAssessmentInput, APACHE_DEFAULT};
use crate::tui::styles::MedicalTheme;

/// Slider bounds in tenths of a standard deviation (-3.0..=3.0).
pub const APACHE_MIN_TICKS: i32 = -30;
pub const APACHE_MAX_TICKS: i32 = 30;

const INTRO: &str = "This tool estimates the probability of acute kidney injury (AKI) in ICU \
patients using a ridge logistic regression model, based on eICU data. It incorporates CKD \
history, nephrotoxins, APACHE severity, and key exposures.";

const APACHE_LABEL: &str = "APACHE score (standardized)";

const APACHE_HELP: &str = "Standardized APACHE score: (patient APACHE - cohort mean) / SD. \
Rough guide: -1 = low, 0 = avg, +1 = high.";

/// A checkbox on the form.
#[derive(Debug, Clone)]
pub struct ToggleField {
    pub label: &'static str,
    pub checked: bool,
}

impl ToggleField {
    const fn new(label: &'static str) -> Self {
        Self {
            label,
            checked: false,
        }
    }
}

/// Form state: six checkboxes followed by the APACHE slider.
#[derive(Debug, Clone)]
pub struct AssessmentFormState {
    pub toggles: [ToggleField; 6],
    /// Slider position in tenths; always within the tick bounds.
    pub apache_ticks: i32,
    pub selected_field: usize,
}

impl Default for AssessmentFormState {
    fn default() -> Self {
        Self {
            toggles: [
                ToggleField::new("CKD (by eGFR or documented history)"),
                ToggleField::new("Volume overload (>+3L positive balance before AKI)"),
                ToggleField::new("Dysnatremia (Na <135 or >145 before AKI)"),
                ToggleField::new("Hyperlactatemia (Lactate >2 before AKI)"),
                ToggleField::new("Hypotension (MAP <65 before AKI)"),
                ToggleField::new("Nephrotoxin exposure before AKI"),
            ],
            apache_ticks: apache_to_ticks(APACHE_DEFAULT),
            selected_field: 0,
        }
    }
}

fn apache_to_ticks(value: f64) -> i32 {
    let ticks = (crate::domain::clamp_apache(value) * 10.0).round();
    // Clamped to [-3, 3], so the cast cannot overflow.
    (ticks as i32).clamp(APACHE_MIN_TICKS, APACHE_MAX_TICKS)
}

impl AssessmentFormState {
    /// Number of focusable fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.toggles.len() + 1
    }

    /// Whether the slider has focus.
    #[must_use]
    pub fn slider_selected(&self) -> bool {
        self.selected_field == self.toggles.len()
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.field_count();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.field_count() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Flip the focused checkbox. No-op on the slider.
    pub fn toggle(&mut self) {
        if let Some(field) = self.toggles.get_mut(self.selected_field) {
            field.checked = !field.checked;
        }
    }

    /// Slider one step up, or check the focused checkbox.
    pub fn increase(&mut self) {
        match self.toggles.get_mut(self.selected_field) {
            Some(field) => field.checked = true,
            None => self.apache_ticks = (self.apache_ticks + 1).min(APACHE_MAX_TICKS),
        }
    }

    /// Slider one step down, or uncheck the focused checkbox.
    pub fn decrease(&mut self) {
        match self.toggles.get_mut(self.selected_field) {
            Some(field) => field.checked = false,
            None => self.apache_ticks = (self.apache_ticks - 1).max(APACHE_MIN_TICKS),
        }
    }

    /// Current slider value.
    #[must_use]
    pub fn apache_std(&self) -> f64 {
        f64::from(self.apache_ticks) / 10.0
    }

    /// Restore every widget to its default, keeping focus.
    pub fn reset(&mut self) {
        let selected = self.selected_field;
        *self = Self::default();
        self.selected_field = selected;
    }

    /// Read the current widget values.
    #[must_use]
    pub fn to_input(&self) -> RiskAssessmentInput {
        let [ckd, vol, dysna, lact, hypo, nephro] = &self.toggles;
        RiskAssessmentInput {
            ckd_combined: ckd.checked,
            vol_overload: vol.checked,
            dysnatremia: dysna.checked,
            hyperlactatemia: lact.checked,
            hypotension: hypo.checked,
            nephrotoxin: nephro.checked,
            apache_std: self.apache_std(),
        }
    }
}

/// Render the full calculator screen.
pub fn render_assessment(
    f: &mut Frame,
    area: Rect,
    state: &AssessmentFormState,
    assessment: &Assessment,
    model_name: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Intro
            Constraint::Min(0),    // Form + result
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(f, chunks[0], model_name);
    render_intro(f, chunks[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_form(f, columns[0], state);
    render_result(f, columns[1], assessment);
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, model_name: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(
            format!("AKI Risk Calculator ({model_name})"),
            MedicalTheme::title(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_intro(f: &mut Frame, area: Rect) {
    let intro = Paragraph::new(Span::styled(INTRO, MedicalTheme::text_secondary()))
        .wrap(Wrap { trim: true });
    f.render_widget(intro, area);
}

fn render_form(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let block = Block::default()
        .title(Span::styled(" Risk Factors ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(state.toggles.len() as u16 + 1),
            Constraint::Length(3), // Slider
            Constraint::Min(0),    // Help
        ])
        .margin(1)
        .split(inner);

    let lines: Vec<Line> = state
        .toggles
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let focused = i == state.selected_field;
            let marker = if focused { "› " } else { "  " };
            let checkbox = if field.checked { "[x] " } else { "[ ] " };
            let label_style = if focused {
                MedicalTheme::focused()
            } else {
                MedicalTheme::text()
            };
            Line::from(vec![
                Span::styled(marker, MedicalTheme::focused()),
                Span::styled(checkbox, MedicalTheme::checkbox(field.checked)),
                Span::styled(field.label, label_style),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[0]);

    render_slider(f, chunks[1], state);

    if state.slider_selected() {
        let help = Paragraph::new(Span::styled(APACHE_HELP, MedicalTheme::text_muted()))
            .wrap(Wrap { trim: true });
        f.render_widget(help, chunks[2]);
    }
}

fn render_slider(f: &mut Frame, area: Rect, state: &AssessmentFormState) {
    let focused = state.slider_selected();
    let (border_style, title_style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let span = f64::from(APACHE_MAX_TICKS - APACHE_MIN_TICKS);
    let ratio = f64::from(state.apache_ticks - APACHE_MIN_TICKS) / span;

    let slider = LineGauge::default()
        .block(
            Block::default()
                .title(Span::styled(format!(" {APACHE_LABEL} "), title_style))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .filled_style(MedicalTheme::gauge())
        .unfilled_style(MedicalTheme::text_muted())
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:+.1} ", state.apache_std()));

    f.render_widget(slider, area);
}

fn render_result(f: &mut Frame, area: Rect, assessment: &Assessment) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Headline
            Constraint::Length(3), // Gauge
            Constraint::Min(0),    // Breakdown
        ])
        .margin(1)
        .split(inner);

    let headline = Paragraph::new(Line::from(Span::styled(
        assessment.result.to_string(),
        MedicalTheme::success(),
    )));
    f.render_widget(headline, chunks[0]);

    // A NaN probability would trip the gauge's range assertion.
    let probability = assessment.result.probability;
    let ratio = if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        )
        .gauge_style(MedicalTheme::gauge())
        .ratio(ratio)
        .label(assessment.result.percentage_label());
    f.render_widget(gauge, chunks[1]);

    let mut lines = vec![
        Line::from(Span::styled("Log-odds breakdown", MedicalTheme::text_secondary())),
        breakdown_line("Intercept", assessment.linear_predictor - contribution_sum(assessment)),
    ];
    for contribution in &assessment.contributions {
        lines.push(breakdown_line(contribution.label(), contribution.value));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{:<18}", "Linear predictor"), MedicalTheme::text()),
        Span::styled(
            format!("{:+.3}", assessment.linear_predictor),
            MedicalTheme::focused(),
        ),
    ]));
    f.render_widget(Paragraph::new(lines), chunks[2]);
}

fn contribution_sum(assessment: &Assessment) -> f64 {
    assessment.contributions.iter().map(|c| c.value).sum()
}

fn breakdown_line(name: &str, value: f64) -> Line<'static> {
    let style = if value > 0.0 {
        MedicalTheme::danger()
    } else if value < 0.0 {
        MedicalTheme::success()
    } else {
        MedicalTheme::text_muted()
    };
    Line::from(vec![
        Span::styled(format!("{name:<18}"), MedicalTheme::text_secondary()),
        Span::styled(format!("{value:+.3}"), style),
    ])
}

fn render_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[Space] ", MedicalTheme::key_hint()),
        Span::styled("Toggle ", MedicalTheme::key_desc()),
        Span::styled("[←→] ", MedicalTheme::key_hint()),
        Span::styled("Adjust ", MedicalTheme::key_desc()),
        Span::styled("[R] ", MedicalTheme::key_hint()),
        Span::styled("Reset ", MedicalTheme::key_desc()),
        Span::styled("[Q] ", MedicalTheme::key_hint()),
        Span::styled("Quit", MedicalTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
