//! Tally Board binary - ratatui shell around [`OrderBoard`]
//!
//! The shell owns no business rules: transition availability, filtering
//! and delete gating all come from `shared` and the controller. Run
//! with `TALLY_API_URL` pointing at the order store.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

use shared::{OrderStatus, StatusColor};
use tally_board::NoticeLevel;
use tally_board::board::OrderBoard;
use tally_client::{ClientConfig, OrderClient};

struct App {
    board: OrderBoard<OrderClient>,
    /// Search input field state
    input: Input,
    /// Current input mode
    input_mode: InputMode,
    /// Orders table selection
    table_state: TableState,
    /// Logger widget state
    logger_state: TuiWidgetState,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    #[default]
    Normal,
    Editing,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Route tracing into the in-TUI log pane; plain stderr would tear
    // the alternate screen.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let config = ClientConfig::from_env();
    tracing::info!("order store: {}", config.base_url);
    let client = config.build_client()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App {
        board: OrderBoard::new(client),
        input: Input::default(),
        input_mode: InputMode::default(),
        table_state: TableState::default(),
        logger_state: TuiWidgetState::new(),
    };

    // Initial load cycle
    app.board.refresh().await;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            continue;
        }

        // The confirmation dialog swallows all input until resolved.
        if app.board.pending_delete().is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Enter => app.board.confirm_delete().await,
                KeyCode::Char('n') | KeyCode::Esc => app.board.dismiss_delete(),
                _ => {}
            }
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('r') => app.board.refresh().await,
                KeyCode::Char('/') => app.input_mode = InputMode::Editing,
                KeyCode::Char('f') => app.board.cycle_status_filter(),
                KeyCode::Up => move_selection(app, -1),
                KeyCode::Down => move_selection(app, 1),
                KeyCode::Char('n') => {
                    if let Some(id) = selected_id(app) {
                        app.board.advance_status(id).await;
                    }
                }
                KeyCode::Char('c') => {
                    if let Some(id) = selected_id(app) {
                        app.board.cancel_order(id).await;
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(id) = selected_id(app) {
                        app.board.request_delete(id);
                    }
                }
                KeyCode::PageUp => app.logger_state.transition(TuiWidgetEvent::PrevPageKey),
                KeyCode::PageDown => app.logger_state.transition(TuiWidgetEvent::NextPageKey),
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
                _ => {
                    app.input.handle_event(&Event::Key(key));
                    // Narrow live, keystroke by keystroke.
                    app.board.set_search(app.input.value());
                }
            },
        }
    }
}

fn selected_id(app: &App) -> Option<i64> {
    let visible = app.board.visible();
    app.table_state
        .selected()
        .and_then(|index| visible.get(index))
        .map(|order| order.id)
}

fn move_selection(app: &mut App, delta: isize) {
    let len = app.board.visible().len();
    if len == 0 {
        app.table_state.select(None);
        return;
    }
    let current = app.table_state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    app.table_state.select(Some(next as usize));
}

fn color_token(token: StatusColor) -> Color {
    match token {
        StatusColor::Primary => Color::Blue,
        StatusColor::Warning => Color::Yellow,
        StatusColor::Info => Color::Cyan,
        StatusColor::Success => Color::Green,
        StatusColor::Error => Color::Red,
        StatusColor::Default => Color::Gray,
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Stats strip
            Constraint::Length(3), // Search / filter bar
            Constraint::Min(8),    // Orders table
            Constraint::Length(1), // Notice footer
            Constraint::Length(8), // Log pane
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_stats(f, app, chunks[1]);
    render_search(f, app, chunks[2]);
    render_orders(f, app, chunks[3]);
    render_notice(f, app, chunks[4]);
    render_logs(f, app, chunks[5]);

    if let Some(id) = app.board.pending_delete() {
        render_delete_modal(f, id);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = if app.board.is_loading() {
        Span::styled(
            " LOADING... ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " Ready ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    };

    let title = Paragraph::new(vec![Line::from(vec![
        Span::raw(" Tally "),
        Span::styled(" Order Board ", Style::default().fg(Color::Yellow)),
        Span::raw(" | "),
        state,
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_stats(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.board.stats() {
        Some(stats) => {
            let mut spans = vec![Span::styled(
                format!("Total: {}", stats.total_orders),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            for status in OrderStatus::ALL {
                spans.push(Span::raw("  |  "));
                spans.push(Span::styled(
                    format!("{}: {}", status.label(), stats.count_for(status)),
                    Style::default().fg(color_token(status.color())),
                ));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            "Statistics unavailable",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let panel = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).title(" Statistics "));
    f.render_widget(panel, area);
}

fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let style = match app.input_mode {
        InputMode::Normal => Style::default().fg(Color::Gray),
        InputMode::Editing => Style::default().fg(Color::Yellow),
    };

    let title = format!(
        " Search [/] | Status filter [f]: {} ",
        app.board.filter().status.label()
    );

    let width = area.width.max(3) - 3;
    let scroll = app.input.visual_scroll(width as usize);
    let input = Paragraph::new(app.input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if app.input_mode == InputMode::Editing {
        f.set_cursor_position((
            area.x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            area.y + 1,
        ));
    }
}

fn render_orders(f: &mut Frame, app: &mut App, area: Rect) {
    let visible = app.board.visible();
    let visible_len = visible.len();
    let total_len = app.board.orders().len();

    let header = Row::new(vec!["ID", "Customer", "Status", "Total", "Items", "Created"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|order| {
            let status_style = Style::default().fg(color_token(order.status.color()));
            Row::new(vec![
                Cell::from(format!("#{}", order.id)),
                Cell::from(order.customer_name.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(Span::styled(order.status.label(), status_style)),
                Cell::from(format!("{:.2}", order.total_amount)),
                Cell::from(order.items.len().to_string()),
                Cell::from(order.created_at.clone().unwrap_or_else(|| "-".to_string())),
            ])
        })
        .collect();
    drop(visible);

    let title = if app.board.is_loading() {
        " Orders (loading...) ".to_string()
    } else {
        format!(" Orders ({}/{}) ", visible_len, total_len)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Min(16),
            Constraint::Length(20),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_notice(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.board.notices().latest() {
        Some(notice) => {
            let style = match notice.level {
                NoticeLevel::Info => Style::default().fg(Color::Cyan),
                NoticeLevel::Success => Style::default().fg(Color::Green),
                NoticeLevel::Error => Style::default().fg(Color::Red),
            };
            Line::from(Span::styled(notice.message.clone(), style))
        }
        None => Line::from(Span::styled(
            "r refresh | / search | f filter | n advance | c cancel | d delete | q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(vec![line]), area);
}

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::DIM),
                ),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn render_delete_modal(f: &mut Frame, id: i64) {
    let area = centered_rect(44, 5, f.area());
    f.render_widget(Clear, area);

    let text = vec![
        Line::from(format!("Delete order #{}?", id)),
        Line::from("This action cannot be undone."),
        Line::from(Span::styled(
            "[y] delete    [n] keep",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Delete ")
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(dialog, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
