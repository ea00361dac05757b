//! Ratatui widgets shared by the heatmap and chart dashboards

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Constraint, Flex, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap},
    Frame,
};
use stock_stats::{CorrelationBand, CorrelationMatrix, Stock, StockSummary};

use super::state::StatusMessage;
use super::time_range::TimeRange;

// Palette
const C_BUY: Color = Color::Rgb(100, 220, 100);
const C_SELL: Color = Color::Rgb(220, 100, 100);
const C_AVG: Color = Color::Rgb(245, 158, 11);
const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_BRIGHT: Color = Color::Rgb(220, 220, 220);
const C_ACCENT: Color = Color::Rgb(100, 180, 220);

/// Heatmap cell background for a correlation band
pub fn band_color(band: CorrelationBand) -> Color {
    match band {
        CorrelationBand::StrongPositive => Color::Rgb(22, 163, 74),
        CorrelationBand::MediumPositive => Color::Rgb(74, 222, 128),
        CorrelationBand::WeakPositive => Color::Rgb(187, 247, 208),
        CorrelationBand::Neutral => Color::Rgb(229, 231, 235),
        CorrelationBand::WeakNegative => Color::Rgb(254, 202, 202),
        CorrelationBand::MediumNegative => Color::Rgb(248, 113, 113),
        CorrelationBand::StrongNegative => Color::Rgb(220, 38, 38),
    }
}

fn placeholder(f: &mut Frame, area: Rect, title: &str, text: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(C_DIM),
    )))
    .block(block)
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

// Heatmap columns: ticker label plus one per ticker, each HEATMAP_CELL_WIDTH wide
const HEATMAP_CELL_WIDTH: u16 = 7;
const HEATMAP_COLUMN_SPACING: u16 = 1;

/// Render the correlation heatmap table
///
/// Rows and columns follow the matrix's ticker order. The selected ticker's
/// row is bold and its column underlined.
pub fn render_heatmap(
    f: &mut Frame,
    area: Rect,
    matrix: &CorrelationMatrix,
    selected: Option<&str>,
) {
    if matrix.is_empty() {
        placeholder(
            f,
            area,
            " STOCK CORRELATION HEATMAP ",
            "No correlation data available. Please wait for price data to load.",
        );
        return;
    }

    let header_cells = std::iter::once(Cell::from("Stock")).chain(matrix.tickers().map(|s| {
        let mut style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        if Some(s) == selected {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(s.to_string()).style(style)
    }));
    let header = Row::new(header_cells).height(1);

    let rows = matrix.rows().map(|(row_symbol, cells)| {
        let row_selected = Some(row_symbol) == selected;
        let label_style = if row_selected {
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        };

        let cells = std::iter::once(Cell::from(row_symbol.to_string()).style(label_style)).chain(
            cells.iter().map(|(col_symbol, value)| {
                let mut style = Style::default()
                    .bg(band_color(CorrelationBand::classify(*value)))
                    .fg(Color::Black);
                if row_selected {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if Some(col_symbol.as_str()) == selected {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                Cell::from(format!("{:>6.2}", value)).style(style)
            }),
        );
        Row::new(cells).height(1)
    });

    let widths: Vec<Constraint> = std::iter::repeat_n(Constraint::Length(HEATMAP_CELL_WIDTH), matrix.len() + 1)
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(HEATMAP_COLUMN_SPACING)
        .flex(Flex::Start)
        .block(
            Block::default()
                .title(" STOCK CORRELATION HEATMAP ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(C_ACCENT)),
        );

    f.render_widget(table, area);
}

/// Map a click inside the heatmap drawn at `area` to a ticker index
///
/// A row label selects that row's ticker; a header or value cell selects its
/// column's ticker. Borders, spacing and empty space map to `None`.
pub fn heatmap_hit_test(area: Rect, tickers: usize, column: u16, row: u16) -> Option<usize> {
    let inner_left = area.x + 1;
    let inner_top = area.y + 1;
    let inner_right = area.x + area.width.saturating_sub(1);
    let inner_bottom = area.y + area.height.saturating_sub(1);
    if column < inner_left || column >= inner_right || row < inner_top || row >= inner_bottom {
        return None;
    }

    let stride = HEATMAP_CELL_WIDTH + HEATMAP_COLUMN_SPACING;
    let offset = column - inner_left;
    if offset % stride >= HEATMAP_CELL_WIDTH {
        return None;
    }
    let table_column = usize::from(offset / stride);
    let table_row = usize::from(row - inner_top);

    match (table_row, table_column) {
        // header label "Stock"
        (0, 0) => None,
        (0, col) if col <= tickers => Some(col - 1),
        (r, 0) if r <= tickers => Some(r - 1),
        (r, col) if r <= tickers && col <= tickers => Some(col - 1),
        _ => None,
    }
}

/// Render the band colour legend
pub fn render_legend(f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = CorrelationBand::ALL
        .iter()
        .map(|band| {
            Line::from(vec![
                Span::styled("  ", Style::default().bg(band_color(*band))),
                Span::raw(" "),
                Span::styled(band.label(), Style::default().fg(C_BRIGHT)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" CORRELATION LEGEND ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_DIM)),
    );
    f.render_widget(paragraph, area);
}

/// Render the statistics card for one stock, or `hint` when there is nothing to show
pub fn render_stock_details(
    f: &mut Frame,
    area: Rect,
    symbol: Option<&str>,
    summary: Option<&StockSummary>,
    hint: &str,
) {
    let (Some(symbol), Some(summary)) = (symbol, summary) else {
        placeholder(f, area, " STATISTICS ", hint);
        return;
    };

    let change_color = if summary.is_positive() { C_BUY } else { C_SELL };
    let arrow = if summary.is_positive() { "▲" } else { "▼" };
    let label = |text: &'static str| Span::styled(format!("{:<20}", text), Style::default().fg(C_DIM));
    let value = |text: String, color: Color| {
        Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let lines = vec![
        Line::from(vec![
            label("Current Price"),
            value(format!("${:.2}", summary.current_price), C_BRIGHT),
        ]),
        Line::from(vec![
            label("Price Change"),
            value(
                format!(
                    "{} ${:.2} ({:.2}%)",
                    arrow,
                    summary.change.abs(),
                    summary.change_pct
                ),
                change_color,
            ),
        ]),
        Line::from(vec![
            label("Average Price"),
            value(format!("${:.2}", summary.average), C_AVG),
        ]),
        Line::from(vec![
            label("Standard Deviation"),
            value(format!("${:.2}", summary.std_dev), C_BRIGHT),
            Span::styled("  price volatility measure", Style::default().fg(C_DIM)),
        ]),
        Line::from(vec![
            label("Range"),
            Span::styled(
                format!("${:.2} - ${:.2}  ({} samples)", summary.min_price, summary.max_price, summary.samples),
                Style::default().fg(C_DIM),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" {} STATISTICS ", symbol))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_ACCENT)),
    );
    f.render_widget(paragraph, area);
}

/// Render the time range selector row
pub fn render_time_range(f: &mut Frame, area: Rect, current: TimeRange, is_loading: bool) {
    let mut spans = vec![Span::styled("Time Range  ", Style::default().fg(C_DIM))];
    for range in TimeRange::ALL {
        let active = range == current;
        let marker = if active { "(•)" } else { "( )" };
        let style = match (active, is_loading) {
            (_, true) => Style::default().fg(C_DIM),
            (true, false) => Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            (false, false) => Style::default().fg(C_BRIGHT),
        };
        spans.push(Span::styled(format!("{} {}   ", marker, range), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render "last updated" plus the latest status message
pub fn render_status_line(
    f: &mut Frame,
    area: Rect,
    last_updated: DateTime<Utc>,
    is_loading: bool,
    status: Option<&StatusMessage>,
) {
    let mut spans = vec![Span::styled(
        format!(
            "Last updated: {}",
            last_updated.with_timezone(&Local).format("%H:%M:%S")
        ),
        Style::default().fg(C_DIM),
    )];
    if is_loading {
        spans.push(Span::styled(" (Refreshing...)", Style::default().fg(C_AVG)));
    }
    if let Some(status) = status {
        let color = if status.is_error { C_SELL } else { C_BUY };
        spans.push(Span::raw("   "));
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render a red alert box
pub fn render_alert(f: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(C_SELL).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_SELL)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Render the stock selector row for the chart page
pub fn render_stock_selector(f: &mut Frame, area: Rect, stocks: &[Stock], selected: Option<usize>) {
    let current = selected.and_then(|i| stocks.get(i));
    let spans = match (current, selected) {
        (Some(stock), Some(idx)) => vec![
            Span::styled("Stock  ", Style::default().fg(C_DIM)),
            Span::styled("◀ ", Style::default().fg(C_DIM)),
            Span::styled(
                stock.to_string(),
                Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", Style::default().fg(C_DIM)),
            Span::styled(
                format!("  ({}/{})", idx + 1, stocks.len()),
                Style::default().fg(C_DIM),
            ),
        ],
        _ => vec![Span::styled("Select a stock", Style::default().fg(C_DIM))],
    };
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the price chart with an average reference line
///
/// `points` are (unix seconds, price). The line is green when the window
/// closed at or above where it opened, red otherwise.
pub fn render_price_chart(
    f: &mut Frame,
    area: Rect,
    symbol: &str,
    points: &[(f64, f64)],
    summary: Option<&StockSummary>,
) {
    let title = format!(" {} PRICE HISTORY ", if symbol.is_empty() { "STOCK" } else { symbol });
    let (Some(summary), Some(first), Some(last)) = (summary, points.first(), points.last()) else {
        placeholder(f, area, &title, "No price data available");
        return;
    };

    let line_color = if summary.is_positive() { C_BUY } else { C_SELL };

    let x_min = first.0;
    let x_max = if last.0 > first.0 { last.0 } else { first.0 + 60.0 };
    let [mut y_min, mut y_max] = summary.chart_bounds();
    if y_max <= y_min {
        y_min = (y_min - 1.0).max(0.0);
        y_max += 1.0;
    }

    let average_line = [(x_min, summary.average), (x_max, summary.average)];

    let datasets = vec![
        Dataset::default()
            .name(symbol.to_string())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(line_color))
            .data(points),
        Dataset::default()
            .name(format!("Avg: ${:.2}", summary.average))
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(C_AVG))
            .data(&average_line),
    ];

    let x_labels: Vec<Span> = [x_min, (x_min + x_max) / 2.0, x_max]
        .iter()
        .map(|x| Span::styled(format_time_label(*x), Style::default().fg(C_DIM)))
        .collect();
    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|y| Span::styled(format!("${:.0}", y), Style::default().fg(C_DIM)))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::raw(title),
                    Span::styled(
                        format!("${:.2} ", summary.current_price),
                        Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:+.2} ({:+.2}%) ", summary.change, summary.change_pct),
                        Style::default().fg(line_color),
                    ),
                ]))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(C_ACCENT)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(C_DIM))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(C_DIM))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

/// Format unix seconds as local `HH:MM`
fn format_time_label(secs: f64) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|t| t.with_timezone(&Local).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
