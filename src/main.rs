//! WikiQuiz TUI - Actor-based quiz client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - quiz session engine processing events
//! - Network Layer (Tokio) - async calls to the quiz service

use std::io;
use std::sync::Arc;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use wikiquiz_tui::app::{AppActor, AppState};
use wikiquiz_tui::config::{config_dir, Config};
use wikiquiz_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME, URL_PLACEHOLDER};
use wikiquiz_tui::messages::render::QuizView;
use wikiquiz_tui::messages::ui_events::{key_to_ui_event, AppTab, InputMode};
use wikiquiz_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use wikiquiz_tui::network::{ApiGateway, NetworkActor, QuizApi};
use wikiquiz_tui::ui;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file; the terminal belongs to the UI
    let log_dir = config_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();
    tracing::info!(base_url = %config.base_url(), timeout_ms = config.timeout_ms, "Starting {}", APP_NAME);

    let api: Arc<dyn QuizApi> = Arc::new(ApiGateway::new(&config)?);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(Arc::clone(&api), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(api, &config), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_tab,
                    current_state.input_mode,
                    current_state.quiz.is_some(),
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Tab bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    let selected = match state.active_tab {
        AppTab::Generate => 0,
        AppTab::History => 1,
    };
    f.render_widget(ui::render_tabs(&[" 1:Generate ", " 2:History "], selected), main_chunks[0]);

    match state.active_tab {
        AppTab::Generate => draw_generate_tab(f, state, main_chunks[1]),
        AppTab::History => draw_history_tab(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if let Some(quiz) = &state.quiz {
        draw_quiz_popup(f, quiz, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_generate_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // URL input
            Constraint::Length(1),  // Error line
            Constraint::Min(5),     // Latest quiz
        ])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let title = if state.is_generating {
        " Wikipedia article URL [Generating...] "
    } else {
        " Wikipedia article URL (e:edit Enter:generate) "
    };
    let input = if state.url_input.is_empty() && !editing {
        Paragraph::new(URL_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.url_input.as_str())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    f.render_widget(input.block(block), chunks[0]);

    if editing {
        let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
        let column = ui::cursor_column(&state.url_input, state.cursor_position);
        let cursor_x = chunks[0].x.saturating_add(column).saturating_add(1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }

    if let Some(error) = &state.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[1],
        );
    }

    let block = Block::default().borders(Borders::ALL).title(" Latest quiz ");
    let lines = match &state.latest {
        Some(card) => vec![
            Line::from(vec![
                Span::styled(card.title.clone(), Style::default().bold()),
                Span::styled(
                    format!("  [{} questions]", card.question_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(card.url.clone(), Style::default().fg(Color::Cyan))),
            Line::from(""),
            Line::from(card.summary.clone()),
            Line::from(""),
            Line::from(Span::styled("Press 't' to take this quiz", Style::default().fg(Color::Green))),
        ],
        None => vec![Line::from(Span::styled(
            "No quiz generated yet. Paste a Wikipedia article URL above.",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), chunks[2]);
}

fn draw_history_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    if let Some(error) = &state.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[0],
        );
    }

    let title = if state.is_loading_history {
        " History [Loading quizzes...] "
    } else if state.is_opening {
        " History [Opening...] "
    } else {
        " History (Enter:open r:reload) "
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.history.is_empty() {
        let text = if state.is_loading_history {
            ""
        } else {
            "No quizzes yet. Generate one from the Generate tab."
        };
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)).block(block),
            chunks[1],
        );
        return;
    }

    let rows: Vec<Row> = state
        .history
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.article_title.clone()),
                Cell::from(item.article_url.clone()).style(Style::default().fg(Color::Cyan)),
                Cell::from(
                    item.created_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(35), Constraint::Percentage(45), Constraint::Percentage(20)],
    )
    .header(Row::new(vec!["Article", "URL", "Created"]).style(Style::default().bold()))
    .block(block)
    .row_highlight_style(Style::default().fg(Color::Yellow).bold())
    .highlight_symbol("> ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.selected_history));
    f.render_stateful_widget(table, chunks[1], &mut table_state);
}

fn draw_quiz_popup(f: &mut Frame, quiz: &QuizView, area: Rect) {
    let popup_area = centered_rect(80, 80, area);

    let mut title_spans = vec![Span::raw(format!(
        " {} - Question {} of {} ",
        quiz.article_title,
        quiz.index + 1,
        quiz.total
    ))];
    if let Some(difficulty) = &quiz.difficulty {
        title_spans.push(Span::styled(
            format!("[{}] ", difficulty),
            Style::default().fg(ui::difficulty_color(difficulty)),
        ));
    }

    let footer = if quiz.submitted {
        " ←/→ review | Esc close "
    } else {
        " 1-9 select | ←/→ move | s submit | Esc close "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title_spans))
        .title_bottom(Line::from(footer).right_aligned())
        .style(Style::default().bg(Color::Black));

    let mut lines = vec![
        Line::from(Span::styled(quiz.question.clone(), Style::default().bold())),
        Line::from(""),
    ];
    for (i, (text, mark)) in quiz.options.iter().enumerate() {
        lines.push(ui::render_option(i + 1, text, *mark));
    }
    lines.push(Line::from(""));

    match quiz.score {
        Some(score) => {
            lines.push(Line::from(Span::styled(
                format!("Score: {} / {}", score.correct, score.total),
                Style::default().fg(ui::score_color(score.correct, score.total)).bold(),
            )));
            if let Some(explanation) = &quiz.explanation {
                lines.push(Line::from(format!("Explanation: {}", explanation)));
            }
            if !quiz.related_topics.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Related topics: {}", quiz.related_topics.join(", ")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => lines.push(Line::from(Span::styled(
            format!("Answered {} of {}", quiz.answered, quiz.total),
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let body = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(Clear, popup_area);
    f.render_widget(body, popup_area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_busy() {
        " Loading... ".to_string()
    } else if state.quiz.is_some() {
        " Quiz in progress ".to_string()
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:generate ".to_string()
    } else {
        format!(" {} v{} | Tab:switch | ?:help | q:quit ", APP_NAME, APP_VERSION)
    };
    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 Tabs
   1 / 2 / Tab   Generate / History

 Generate
   e             Edit article URL
   Enter         Generate quiz
   t             Take the latest quiz

 History
   ↑/↓           Select quiz
   Enter         Open quiz
   r             Reload list

 Quiz
   1-9           Select answer
   ←/→           Previous / next question
   s             Submit answers
   Esc           Close quiz

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
