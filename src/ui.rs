use crate::directory::StaticDirectory;
use crate::resolver::Resolver;
use crate::view::{Field, LookupForm, ViewState};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

pub struct App {
    pub form: LookupForm,
    pub show_notice: bool,
    resolver: Resolver<StaticDirectory>,
    reset_notice: String,
    source: String,
}

impl App {
    pub fn new(directory: StaticDirectory, source: String, reset_notice: String) -> Self {
        Self {
            form: LookupForm::new(),
            show_notice: false,
            resolver: Resolver::new(directory),
            reset_notice,
            source,
        }
    }

    pub fn submit(&mut self) {
        self.form.submit(&self.resolver);
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.show_notice = false;
    }

    pub fn toggle_notice(&mut self) {
        self.show_notice = !self.show_notice;
    }

    /// Apply one key press; returns false when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.show_notice {
            // Any key closes the notice
            self.show_notice = false;
            return true;
        }

        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => self.reset(),
            KeyCode::F(2) => self.toggle_notice(),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => self.form.next_field(),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Char(c) => self.form.insert_char(c),
            _ => {}
        }

        true
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Windows reports both press and release
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Identifier input
            Constraint::Length(3), // Name input
            Constraint::Min(5),    // Result panel
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_input(f, chunks[1], app, Field::Identifier);
    render_input(f, chunks[2], app, Field::Name);
    render_view(f, chunks[3], app.form.view());
    render_status_bar(f, chunks[4]);

    if app.show_notice {
        render_notice(f, f.size(), &app.reset_notice);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "계정 ID 조회",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Directory: {}", app.source),
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App, field: Field) {
    let focused = app.form.focus == field;
    let value = match field {
        Field::Identifier => &app.form.identifier,
        Field::Name => &app.form.name,
    };

    let mut spans = vec![Span::raw(value.as_str())];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", field.label())),
    );

    f.render_widget(input, area);
}

fn render_view(f: &mut Frame, area: Rect, view: &ViewState) {
    let (title, color, lines) = match view {
        ViewState::Prompt => (
            " 조회 ",
            Color::White,
            vec![
                Line::from(""),
                Line::from("  학번과 이름을 입력한 뒤 Enter를 누르세요."),
            ],
        ),
        ViewState::Result { .. } => (
            " 조회 결과 ",
            Color::Green,
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled(
                        "  계정 ID: ",
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        view.account_display().to_string(),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                ]),
            ],
        ),
        ViewState::Error { message } => (
            " 오류 ",
            Color::Red,
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(Color::Red),
                )),
            ],
        ),
    };

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status_spans = vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Search | "),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Field | "),
        Span::styled("Ctrl-R", Style::default().fg(Color::Yellow)),
        Span::raw(" Reset | "),
        Span::styled("F2", Style::default().fg(Color::Yellow)),
        Span::raw(" Password help | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_notice(f: &mut Frame, area: Rect, notice: &str) {
    let popup = centered_rect(60, 30, area);

    let lines: Vec<Line> = notice.lines().map(|l| Line::from(l.to_string())).collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" 비밀번호 재설정 안내 "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
