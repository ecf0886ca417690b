//! Wizard View
//!
//! Pure rendering of [`WizardState`]: the same state always draws the same
//! frame. Layout, top to bottom:
//!
//! ```text
//! ┌ step header ───────────────────────────────┐
//! │ error banner (only when set)               │
//! │ stage body                                 │
//! └ key hints ─────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use wizard_core::{AspectRatio, JobStatus, WizardStage, WizardState};

use crate::theme;

/// Characters of script shown in the settings summary
const PREVIEW_CHARS: usize = 200;

/// Pipeline milestones: (label, active above, done above), in percent
const MILESTONES: [(&str, u16, u16); 4] = [
    ("Analyzing Script", 0, 10),
    ("Generating Video Clips", 30, 40),
    ("Creating Voice Over", 70, 80),
    ("Final Assembly", 85, 95),
];

/// Where a milestone stands at a given progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneState {
    /// Not reached yet
    Pending,
    /// Being worked on
    Active,
    /// Passed
    Done,
}

/// Milestone labels with their state at `percent`
#[must_use]
pub fn milestones(percent: u16) -> [(&'static str, MilestoneState); 4] {
    MILESTONES.map(|(label, active_above, done_above)| {
        let state = if percent > done_above {
            MilestoneState::Done
        } else if percent > active_above {
            MilestoneState::Active
        } else {
            MilestoneState::Pending
        };
        (label, state)
    })
}

/// Draw the whole wizard
pub fn render(frame: &mut Frame, state: &WizardState) {
    let banner_height = if state.error.is_some() { 3 } else { 0 };
    let [header, banner, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(banner_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, state.stage);
    if let Some(error) = &state.error {
        render_banner(frame, banner, error);
    }

    match state.stage {
        WizardStage::Script => render_script(frame, body, state),
        WizardStage::Settings => render_settings(frame, body, state),
        WizardStage::Generating => render_generating(frame, body, state),
        WizardStage::Result => render_result(frame, body, state),
    }

    render_footer(frame, footer, state);
}

fn render_header(frame: &mut Frame, area: Rect, stage: WizardStage) {
    let mut spans = vec![Span::styled(" scriptreel  ", theme::active())];

    for (i, step) in WizardStage::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", theme::dim()));
        }
        let style = if *step == stage {
            theme::active()
        } else if step.step() < stage.step() {
            theme::done()
        } else {
            theme::dim()
        };
        spans.push(Span::styled(format!("{} {}", step.step(), step.label()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_banner(frame: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(error.to_string(), theme::error()),
        Span::styled("  (Esc to dismiss)", theme::dim()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::error()),
    );
    frame.render_widget(banner, area);
}

fn render_script(frame: &mut Frame, area: Rect, state: &WizardState) {
    let [editor, stats] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    let title = if state.submitting {
        " Script (creating project...) "
    } else {
        " Script "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(editor);
    frame.render_widget(block, editor);

    let width = inner.width.saturating_sub(1) as usize;
    let height = inner.height as usize;
    if width >= 5 && height >= 1 {
        let text = if state.draft.script.is_empty() && !state.submitting {
            String::new()
        } else {
            format!("{}_", state.draft.script)
        };
        // textwrap yields one empty line for empty input, so branch on the text
        let lines: Vec<Line> = if text.is_empty() {
            vec![Line::styled(
                "Type or paste your narration script...",
                theme::dim(),
            )]
        } else {
            let wrapped = textwrap::wrap(&text, width);
            // Keep the cursor line in view
            let skip = wrapped.len().saturating_sub(height);
            wrapped
                .into_iter()
                .skip(skip)
                .map(|l| Line::styled(l.into_owned(), Style::default().fg(theme::SCRIPT_TEXT)))
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    let s = state.draft.stats();
    let stats_line = format!(
        " {} characters | {} words | ~{} min",
        s.characters, s.words, s.estimated_minutes
    );
    frame.render_widget(Paragraph::new(stats_line).style(theme::dim()), stats);
}

fn render_settings(frame: &mut Frame, area: Rect, state: &WizardState) {
    let [preview, ratio, voices] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Min(3),
    ])
    .areas(area);

    let summary = Paragraph::new(state.draft.preview(PREVIEW_CHARS))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Script "));
    frame.render_widget(summary, preview);

    let mut ratio_spans = Vec::new();
    for option in AspectRatio::ALL {
        let selected = option == state.draft.aspect_ratio;
        let (marker, style) = if selected {
            ("(*) ", theme::active())
        } else {
            ("( ) ", theme::dim())
        };
        ratio_spans.push(Span::styled(format!("{marker}{}   ", option.label()), style));
    }
    let ratio_widget = Paragraph::new(Line::from(ratio_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Aspect ratio (Left/Right) "),
    );
    frame.render_widget(ratio_widget, ratio);

    let voice_block = Block::default()
        .borders(Borders::ALL)
        .title(" Voice (Up/Down) ");

    if !state.voices_loaded {
        frame.render_widget(
            Paragraph::new("Loading voices...")
                .style(theme::dim())
                .block(voice_block),
            voices,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .voices
        .voices()
        .iter()
        .map(|v| ListItem::new(v.display_name.clone()))
        .collect();
    let list = List::new(items)
        .block(voice_block)
        .highlight_style(theme::active())
        .highlight_symbol("> ");
    let mut list_state =
        ListState::default().with_selected(state.voices.position(&state.draft.voice_id));
    frame.render_stateful_widget(list, voices, &mut list_state);
}

fn render_generating(frame: &mut Frame, area: Rect, state: &WizardState) {
    let [gauge_area, steps_area, detail] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Min(1),
    ])
    .areas(area);

    let job = &state.job;
    let gauge_style = if job.status == JobStatus::Failed {
        theme::error()
    } else {
        Style::default().fg(theme::PROGRESS_BLUE)
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Generating your video "),
        )
        .gauge_style(gauge_style)
        .percent(job.percent().min(100))
        .label(format!("{}%", job.percent()));
    frame.render_widget(gauge, gauge_area);

    let steps: Vec<Line> = milestones(job.percent())
        .into_iter()
        .map(|(label, state)| match state {
            MilestoneState::Done => Line::styled(format!(" [x] {label}"), theme::done()),
            MilestoneState::Active => Line::styled(format!(" [>] {label}"), theme::active()),
            MilestoneState::Pending => Line::styled(format!(" [ ] {label}"), theme::dim()),
        })
        .collect();
    frame.render_widget(Paragraph::new(steps), steps_area);

    let mut lines = vec![
        Line::from(job.message.clone()),
        Line::styled(format!("Status: {}", job.status.label()), theme::dim()),
    ];
    if let Some(ref id) = job.generation_id {
        lines.push(Line::styled(format!("Generation: {id}"), theme::dim()));
    }
    if !state.is_generating && job.status == JobStatus::Failed {
        lines.push(Line::default());
        lines.push(Line::styled("Press Enter to start over", theme::active()));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), detail);
}

fn render_result(frame: &mut Frame, area: Rect, state: &WizardState) {
    let url = state.job.result_url.as_deref().unwrap_or_default();
    let lines = vec![
        Line::styled("Your video is ready!", theme::done()),
        Line::default(),
        Line::from(vec![Span::styled("Video: ", theme::dim()), Span::raw(url)]),
        Line::from(vec![
            Span::styled("Format: ", theme::dim()),
            Span::raw(state.draft.aspect_ratio.label()),
            Span::styled("  Voice: ", theme::dim()),
            Span::raw(state.voice_name().to_string()),
        ]),
    ];
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Result "));
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &WizardState) {
    let hints = match state.stage {
        WizardStage::Script => "Tab: continue | Ctrl+Q: quit",
        WizardStage::Settings => "Enter: generate | Esc: back | Ctrl+Q: quit",
        WizardStage::Generating if state.is_generating => "Ctrl+N: start over | Ctrl+Q: quit",
        WizardStage::Generating | WizardStage::Result => "Enter: start over | Ctrl+Q: quit",
    };
    frame.render_widget(Paragraph::new(format!(" {hints}")).style(theme::dim()), area);
}
