/// Stock Chart TUI
///
/// Price history for one stock over the selected time range, drawn against
/// its average price.
///
/// Keys: q/Esc quit, r refresh, ←/→/Tab time range, ↑/↓ change stock
use std::error::Error;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use stock_dashboard::shared::widget::{
    render_alert, render_price_chart, render_status_line, render_stock_details,
    render_stock_selector, render_time_range,
};
use stock_dashboard::{init_logging, ChartState, DashboardConfig, StockClient};
use tracing::{error, info};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = DashboardConfig::from_env();
    init_logging(&config.log_file)?;
    info!("Starting stock chart against {}", config.base_url());

    let client = StockClient::new(&config)?;

    // Setup panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &client, &config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("Stock chart exited with error: {}", e);
    }
    result
}

async fn run(
    terminal: &mut Term,
    client: &StockClient,
    config: &DashboardConfig,
) -> Result<(), Box<dyn Error>> {
    let mut state = ChartState::new(config);

    terminal.draw(|f| render_ui(f, &state))?;
    state.load_stocks(client).await;
    reload(terminal, &mut state, client).await?;

    let tick_rate = config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| render_ui(f, &state))?;
            last_tick = Instant::now();
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => reload(terminal, &mut state, client).await?,
                    KeyCode::Right | KeyCode::Tab => {
                        if state.set_time_range(state.time_range.next()) {
                            reload(terminal, &mut state, client).await?;
                        }
                    }
                    KeyCode::Left | KeyCode::BackTab => {
                        if state.set_time_range(state.time_range.prev()) {
                            reload(terminal, &mut state, client).await?;
                        }
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if state.select_next() {
                            reload(terminal, &mut state, client).await?;
                        }
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        if state.select_prev() {
                            reload(terminal, &mut state, client).await?;
                        }
                    }
                    _ => {}
                }
                terminal.draw(|f| render_ui(f, &state))?;
                last_tick = Instant::now();
            }
        }
    }

    Ok(())
}

/// Draw the loading state, then fetch prices for the selected stock
async fn reload(terminal: &mut Term, state: &mut ChartState, client: &StockClient) -> io::Result<()> {
    state.is_loading = true;
    terminal.draw(|f| render_ui(f, state))?;
    state.load_prices(client).await;
    state.is_loading = false;
    Ok(())
}

fn render_ui(f: &mut Frame, state: &ChartState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // last updated / status
            Constraint::Length(1), // stock selector
            Constraint::Length(1), // time range
            Constraint::Min(10),   // chart
            Constraint::Length(7), // statistics
            Constraint::Length(1), // keys
        ])
        .split(f.area());

    let title = Line::from(Span::styled(
        "STOCK PRICE CHART",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title), rows[0]);
    render_status_line(
        f,
        rows[1],
        state.last_updated,
        state.is_loading,
        state.status.as_ref(),
    );
    render_stock_selector(f, rows[2], &state.stocks, state.selected);
    render_time_range(f, rows[3], state.time_range, state.is_loading);

    if state.stocks.is_empty() && !state.is_loading {
        render_alert(f, rows[4], "Couldn't get stock data. Please try again later.");
    } else {
        let symbol = state.selected_symbol().unwrap_or_default();
        let summary = state.summary();
        render_price_chart(f, rows[4], symbol, &state.chart_points(), summary.as_ref());
        render_stock_details(
            f,
            rows[5],
            state.selected_symbol(),
            summary.as_ref(),
            "No statistics yet. Use ↑/↓ to pick another stock or r to retry",
        );
    }

    let keys = Paragraph::new(Line::from(Span::styled(
        "q quit  r refresh  ←/→ time range  ↑/↓ change stock",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(keys, rows[6]);
}
