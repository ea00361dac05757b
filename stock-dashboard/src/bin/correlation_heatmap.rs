/// Correlation Heatmap TUI
///
/// Pairwise Pearson correlation of recent prices across the tracked stocks,
/// with a colour legend and a statistics card for the selected stock.
///
/// Keys: q/Esc quit, r refresh, ←/→/Tab time range, ↑/↓ select stock.
/// Clicking a row label or cell selects that stock.
use std::error::Error;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use stock_dashboard::shared::widget::{
    heatmap_hit_test, render_alert, render_heatmap, render_legend, render_status_line,
    render_stock_details, render_time_range,
};
use stock_dashboard::{init_logging, DashboardConfig, HeatmapState, StockClient};
use tracing::{error, info};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DashboardConfig::from_env();
    init_logging(&config.log_file)?;
    info!("Starting correlation heatmap against {}", config.base_url());

    let client = StockClient::new(&config)?;

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &client, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Heatmap exited with error: {}", e);
    }
    result
}

async fn run(
    terminal: &mut Term,
    client: &StockClient,
    config: &DashboardConfig,
) -> Result<(), Box<dyn Error>> {
    let mut state = HeatmapState::new(config);

    terminal.draw(|f| render_ui(f, &state))?;
    state.load_stocks(client).await;
    refresh(terminal, &mut state, client).await?;

    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();
    let mut screen = terminal.draw(|f| render_ui(f, &state))?.area;

    loop {
        if last_tick.elapsed() >= tick_rate {
            screen = terminal.draw(|f| render_ui(f, &state))?.area;
            last_tick = Instant::now();
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('r') => refresh(terminal, &mut state, client).await?,
                KeyCode::Right | KeyCode::Tab => {
                    if state.set_time_range(state.time_range.next()) {
                        refresh(terminal, &mut state, client).await?;
                    }
                }
                KeyCode::Left | KeyCode::BackTab => {
                    if state.set_time_range(state.time_range.prev()) {
                        refresh(terminal, &mut state, client).await?;
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => state.select_next(),
                KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
                _ => continue,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let matrix = state.matrix();
                let clicked = heatmap_hit_test(panes(screen).heatmap, matrix.len(), mouse.column, mouse.row)
                    .and_then(|i| matrix.tickers().nth(i));
                match clicked {
                    Some(symbol) if state.select_symbol(symbol) => {}
                    _ => continue,
                }
            }
            _ => continue,
        }

        screen = terminal.draw(|f| render_ui(f, &state))?.area;
        last_tick = Instant::now();
    }

    Ok(())
}

/// Draw the refreshing state, then refetch every ticker
async fn refresh(terminal: &mut Term, state: &mut HeatmapState, client: &StockClient) -> io::Result<()> {
    state.is_loading = true;
    terminal.draw(|f| render_ui(f, state))?;
    state.refresh_prices(client).await;
    state.is_loading = false;
    info!(
        "Refreshed {} of {} stocks ({})",
        state.prices.len(),
        state.stocks.len(),
        state.time_range
    );
    Ok(())
}

struct Panes {
    title: Rect,
    status: Rect,
    time_range: Rect,
    body: Rect,
    heatmap: Rect,
    legend: Rect,
    details: Rect,
    keys: Rect,
}

/// Screen layout, shared by drawing and mouse hit testing
fn panes(area: Rect) -> Panes {
    let [title, status, time_range, body, keys] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // last updated / status
            Constraint::Length(1), // time range
            Constraint::Min(10),   // body
            Constraint::Length(1), // keys
        ])
        .areas(area);
    let [heatmap, side] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(48)])
        .areas(body);
    let [legend, details] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(7)])
        .areas(side);

    Panes {
        title,
        status,
        time_range,
        body,
        heatmap,
        legend,
        details,
        keys,
    }
}

fn render_ui(f: &mut Frame, state: &HeatmapState) {
    let panes = panes(f.area());

    let title = Line::from(vec![
        Span::styled(
            "STOCK CORRELATION HEATMAP",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} stocks", state.stocks.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(title), panes.title);
    render_status_line(
        f,
        panes.status,
        state.last_updated,
        state.is_loading,
        state.status.as_ref(),
    );
    render_time_range(f, panes.time_range, state.time_range, state.is_loading);

    if state.stocks.is_empty() && !state.is_loading {
        render_alert(f, panes.body, "Couldn't get stock data. Please try again later.");
    } else {
        let selected = state.selected_symbol();
        let summary = state.selected_summary();
        render_heatmap(f, panes.heatmap, &state.matrix(), selected);
        render_legend(f, panes.legend);
        render_stock_details(
            f,
            panes.details,
            selected,
            summary.as_ref(),
            "Select a stock from the heatmap to see its details",
        );
    }

    let keys = Paragraph::new(Line::from(Span::styled(
        "q quit  r refresh  ←/→ time range  ↑/↓ or click select stock",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(keys, panes.keys);
}
