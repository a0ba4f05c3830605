//! TUI module using ratatui.
//!
//! One screen: a masked API key field, a URL field, and an output pane.
//! Pressing Enter runs the summarize action; the screen blocks until it ends.

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};

use crate::agent::{LanguageModel, Summary};
use crate::pipeline::{ErrorCategory, LivePipeline, Pipeline, Stage, SummarizeError};
use crate::scraper::PageSource;
use crate::transcript::TranscriptSource;
use crate::{logging, Config};

const TITLE: &str = "gistr: Summarize Text From YT or Website";
const SUBHEADER: &str = "Summarize URL Content";
const URL_PLACEHOLDER: &str = "Enter YouTube or Website URL";
const MASK: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    Url,
}

/// What the output pane shows after an action
#[derive(Debug, Clone)]
pub enum Outcome {
    Summary(Summary),
    /// Validation message; nothing was fetched
    Invalid(String),
    Failed { headline: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Submit,
    Quit,
}

pub struct App {
    pub api_key: String,
    pub url: String,
    pub focus: Field,
    pub stage: Stage,
    pub outcome: Option<Outcome>,
    pub scroll: u16,
    key_label: &'static str,
}

impl App {
    pub fn new(key_label: &'static str, api_key: Option<String>) -> Self {
        let focus = if api_key.is_some() {
            Field::Url
        } else {
            Field::ApiKey
        };
        Self {
            api_key: api_key.unwrap_or_default(),
            url: String::new(),
            focus,
            stage: Stage::Idle,
            outcome: None,
            scroll: 0,
            key_label,
        }
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.stage, Stage::Idle) && !self.stage.is_terminal()
    }

    pub fn masked_key(&self) -> String {
        std::iter::repeat(MASK)
            .take(self.api_key.chars().count())
            .collect()
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::ApiKey => &mut self.api_key,
            Field::Url => &mut self.url,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::ApiKey => Field::Url,
            Field::Url => Field::ApiKey,
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Char('u') if ctrl => self.focused_mut().clear(),
            KeyCode::Enter if !self.is_busy() => return Action::Submit,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_focus(),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(5),
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Char(c) if !ctrl => self.focused_mut().push(c),
            _ => {}
        }
        Action::None
    }

    /// Clear the previous result before a new run
    pub fn begin(&mut self) {
        self.outcome = None;
        self.scroll = 0;
    }

    pub fn finish(&mut self, result: Result<Summary, SummarizeError>) {
        self.outcome = Some(match result {
            Ok(summary) => Outcome::Summary(summary),
            Err(e) => match e.category() {
                ErrorCategory::MissingInput | ErrorCategory::MalformedUrl => {
                    Outcome::Invalid(e.headline())
                }
                ErrorCategory::ProcessingFailure => Outcome::Failed {
                    headline: e.headline(),
                    detail: e.detail().unwrap_or_default(),
                },
            },
        });
    }
}

/// Launch the TUI
pub async fn run(config: Config) -> anyhow::Result<()> {
    logging::init_file(&config.log).context("failed to open log file")?;

    let pipeline = LivePipeline::from_config(&config)?;
    let mut app = App::new(
        config.agent.provider.key_label(),
        config.api_key().ok().map(str::to_string),
    );

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app, &pipeline).await;
    ratatui::restore();
    result
}

async fn event_loop<T, P, M>(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    pipeline: &Pipeline<T, P, M>,
) -> anyhow::Result<()>
where
    T: TranscriptSource,
    P: PageSource,
    M: LanguageModel,
{
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        match app.handle_key(key) {
            Action::Quit => return Ok(()),
            Action::Submit => {
                let (api_key, url) = (app.api_key.clone(), app.url.clone());
                app.begin();
                let result = pipeline
                    .run(&api_key, &url, |stage| {
                        app.stage = stage;
                        let view: &App = app;
                        if let Err(e) = terminal.draw(|frame| render(frame, view)) {
                            tracing::warn!(error = %e, "redraw failed");
                        }
                    })
                    .await;
                app.finish(result);
            }
            Action::None => {}
        }
    }
}

fn render(frame: &mut Frame, app: &App) {
    let [title, subheader, key_area, url_area, status, output, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Paragraph::new(TITLE.bold()), title);
    frame.render_widget(Paragraph::new(SUBHEADER.italic()), subheader);

    render_field(frame, key_area, app.key_label, &app.masked_key(), "", app.focus == Field::ApiKey);
    render_field(frame, url_area, "URL", &app.url, URL_PLACEHOLDER, app.focus == Field::Url);

    if app.is_busy() {
        let line = Line::from(vec![
            Span::styled("Fetching content and summarizing... ", Style::new().fg(Color::Yellow)),
            Span::raw(format!("({})", app.stage)),
        ]);
        frame.render_widget(Paragraph::new(line), status);
    }

    frame.render_widget(
        Paragraph::new(output_text(app))
            .block(Block::bordered().title("Summary"))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll, 0)),
        output,
    );

    frame.render_widget(
        Paragraph::new("Enter: summarize  Tab: switch field  PgUp/PgDn: scroll  Esc: quit".dark_gray()),
        help,
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let border = if focused {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new()
    };
    let content = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::new().fg(Color::DarkGray))
    } else {
        Span::raw(value.to_string())
    };

    frame.render_widget(
        Paragraph::new(content).block(Block::bordered().title(label.to_string()).border_style(border)),
        area,
    );

    if focused {
        let offset = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let x = (area.x + 1).saturating_add(offset).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn output_text(app: &App) -> Text<'static> {
    match &app.outcome {
        None => Text::from("Enter a URL and press Enter to summarize.".dark_gray()),
        Some(Outcome::Summary(summary)) => {
            let mut lines = vec![
                Line::styled(
                    "✅ Summary generated:",
                    Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
            ];
            lines.extend(summary.text.lines().map(|l| Line::raw(l.to_string())));
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!(
                    "{} points · {} · {}",
                    summary.bullet_points().len(),
                    summary.model,
                    summary.created_at.format("%Y-%m-%d %H:%M UTC")
                ),
                Style::new().fg(Color::DarkGray),
            ));
            Text::from(lines)
        }
        Some(Outcome::Invalid(message)) => {
            Text::from(Line::styled(message.clone(), Style::new().fg(Color::Red)))
        }
        Some(Outcome::Failed { headline, detail }) => Text::from(vec![
            Line::styled(
                format!("❌ {}", headline),
                Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
            Line::raw(detail.clone()),
        ]),
    }
}
