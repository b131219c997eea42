use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use rust_decimal::Decimal;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::{
    app::{
        portfolio::PortfolioSnapshot,
        utils::{format_amount, format_percent},
    },
    models::HoldingView,
};

#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, PartialEq)]
pub enum HoldingColumn {
    #[strum(serialize = "ID")]
    Id,
    Name,
    Quantity,
    #[strum(serialize = "Purchase")]
    PurchasePrice,
    #[strum(serialize = "Price")]
    CurrentPrice,
    #[strum(serialize = "Value")]
    CurrentValue,
    #[strum(serialize = "Invested")]
    InvestedValue,
    #[strum(serialize = "ROI")]
    Roi,
    #[strum(serialize = "Share")]
    PortfolioShare,
}

impl HoldingColumn {
    fn width(self) -> Constraint {
        match self {
            HoldingColumn::Id => Constraint::Length(6),
            HoldingColumn::Name => Constraint::Length(30),
            _ => Constraint::Length(15),
        }
    }

    fn cell(self, view: &HoldingView) -> Cell<'static> {
        match self {
            HoldingColumn::Id => Cell::from(view.id().to_string()),
            HoldingColumn::Name => Cell::from(view.name().to_string()),
            HoldingColumn::Quantity => Cell::from(view.quantity().normalize().to_string()),
            HoldingColumn::PurchasePrice => Cell::from(format_amount(view.purchase_price())),
            HoldingColumn::CurrentPrice => Cell::from(format_amount(view.current_price())),
            HoldingColumn::CurrentValue => Cell::from(format_amount(view.current_value())),
            HoldingColumn::InvestedValue => Cell::from(format_amount(view.invested_value())),
            HoldingColumn::Roi => Cell::from(format_percent(view.roi()))
                .style(Style::default().fg(gain_color(view.roi()))),
            HoldingColumn::PortfolioShare => Cell::from(format_percent(view.portfolio_share())),
        }
    }
}

fn gain_color(value: &Decimal) -> Color {
    if *value >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

pub fn render(
    frame: &mut Frame,
    snapshot: &PortfolioSnapshot,
    table_state: &mut TableState,
    popup_message: &Option<String>,
    error_popup: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new("Portfolio Tracker")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(title, chunks[0]);

    render_summary(frame, snapshot, chunks[1]);

    let holdings = snapshot.holdings();

    if holdings.is_empty() {
        let empty_message = Paragraph::new("No holdings to display. Add or import holdings first.")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty_message, chunks[2]);
    } else {
        let header_cells = HoldingColumn::iter()
            .map(|c| Cell::from(c.to_string()).style(Style::default().fg(Color::Yellow)));
        let header = Row::new(header_cells).style(Style::default()).height(1);

        let rows = holdings.iter().map(|view| {
            let cells = HoldingColumn::iter().map(|c| c.cell(view));
            Row::new(cells).height(1)
        });

        let widths: Vec<Constraint> = HoldingColumn::iter().map(HoldingColumn::width).collect();

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Holdings").borders(Borders::ALL))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, chunks[2], table_state);
    }

    let help = Paragraph::new("q: quit  ↑/↓: select  d: delete  F5: reload")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);

    if let Some(message) = popup_message {
        render_popup(frame, "Portfolio", message, Color::Cyan);
    }

    if let Some(message) = error_popup {
        render_popup(frame, "Error", message, Color::Red);
    }
}

fn render_summary(frame: &mut Frame, snapshot: &PortfolioSnapshot, area: Rect) {
    let summary = snapshot.summary();
    let label = Style::default().fg(Color::Yellow);

    let totals = Line::from(vec![
        Span::styled("Invested: ", label),
        Span::raw(format_amount(summary.total_invested_value())),
        Span::styled("  Value: ", label),
        Span::raw(format_amount(summary.total_current_value())),
        Span::styled("  Profit: ", label),
        Span::styled(
            format_amount(summary.total_profit()),
            Style::default().fg(gain_color(summary.total_profit())),
        ),
        Span::styled("  Avg. ROI: ", label),
        Span::raw(format_percent(summary.average_roi())),
    ]);

    let largest = summary.largest_asset_name().as_deref().unwrap_or("-");
    let top = match snapshot.top() {
        Some(view) => format!("{} ({})", view.name(), format_percent(view.roi())),
        None => "-".to_string(),
    };

    let extremes = Line::from(vec![
        Span::styled("Largest: ", label),
        Span::raw(largest.to_string()),
        Span::styled("  Top performer: ", label),
        Span::raw(top),
    ]);

    let paragraph = Paragraph::new(vec![totals, extremes])
        .block(Block::default().title("Summary").borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

fn render_popup(frame: &mut Frame, title: &str, message: &str, color: Color) {
    let area = centered_rect(50, 5, frame.area());
    let popup = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
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
