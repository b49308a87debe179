use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use auric_core::{Metal, Region, SearchableSelect};

use super::app::{Focus, WatchApp};
use super::theme::Theme;

pub fn render(frame: &mut Frame, app: &mut WatchApp) {
    let theme = app.theme;
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(3), // metal toggle
            Constraint::Length(3), // selects
            Constraint::Min(5),    // valuation
            Constraint::Length(5), // breakdown
            Constraint::Length(3), // stats
            Constraint::Length(1), // hints
        ])
        .split(area);

    draw_title(frame, rows[0], app, theme);
    draw_metal_toggle(frame, rows[1], app, theme);

    let select_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    app.country_area = Some(region_from(select_columns[0]));
    app.currency_area = Some(region_from(select_columns[1]));
    draw_select_header(
        frame,
        select_columns[0],
        &app.country_select,
        "Pricing Rules (Market)",
        app.focus == Focus::Country,
        theme,
    );
    draw_select_header(
        frame,
        select_columns[1],
        &app.currency_select,
        "Display Currency",
        app.focus == Focus::Currency,
        theme,
    );

    draw_valuation(frame, rows[3], app, theme);
    draw_breakdown(frame, rows[4], app, theme);
    draw_stats(frame, rows[5], app, theme);
    draw_hints(frame, rows[6], theme);

    // Open dropdowns render last so they overlay the panels below them.
    app.country_items_area =
        draw_select_popup(frame, select_columns[0], &mut app.country_select, theme);
    app.currency_items_area =
        draw_select_popup(frame, select_columns[1], &mut app.currency_select, theme);
}

fn draw_title(frame: &mut Frame, area: Rect, app: &WatchApp, theme: Theme) {
    let metal = app.session.metal();
    let title = Line::from(vec![
        Span::styled(
            "AURIC",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" METALS", Style::default().fg(theme.muted)),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", metal.as_str()),
            Style::default().fg(theme.text),
        ),
        Span::raw("  "),
        Span::styled(
            format!("theme: {}", theme.name),
            Style::default().fg(theme.muted),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(panel_block(theme)),
        area,
    );
}

fn draw_metal_toggle(frame: &mut Frame, area: Rect, app: &mut WatchApp, theme: Theme) {
    app.metal_area = Some(region_from(area));
    let metal = app.session.metal();
    let focused = app.focus == Focus::Metal;

    let style_for = |this: Metal| {
        if metal == this {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted)
        }
    };

    let line = Line::from(vec![
        Span::styled("  GOLD  ", style_for(Metal::Gold)),
        Span::styled("|", Style::default().fg(theme.muted)),
        Span::styled("  SILVER  ", style_for(Metal::Silver)),
    ]);

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(focusable_block(theme, focused)),
        area,
    );
}

fn draw_select_header(
    frame: &mut Frame,
    area: Rect,
    select: &SearchableSelect,
    label: &str,
    focused: bool,
    theme: Theme,
) {
    let selected = select.selected();
    let mut spans = Vec::new();
    if let Some(option) = selected {
        if let Some(icon) = &option.icon {
            spans.push(Span::raw(format!("{icon} ")));
        }
        spans.push(Span::styled(
            option.label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        if let Some(sub_label) = &option.sub_label {
            spans.push(Span::styled(
                format!("  {sub_label}"),
                Style::default().fg(theme.muted),
            ));
        }
    }
    spans.push(Span::styled(
        if select.is_open() { "  ▲" } else { "  ▼" },
        Style::default().fg(theme.muted),
    ));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(
            focusable_block(theme, focused).title(Span::styled(
                format!(" {label} "),
                Style::default().fg(theme.muted),
            )),
        ),
        area,
    );
}

/// Render the open dropdown below its header and return the list's item
/// region for pointer hit-testing.
fn draw_select_popup(
    frame: &mut Frame,
    header: Rect,
    select: &mut SearchableSelect,
    theme: Theme,
) -> Option<Region> {
    if !select.is_open() {
        return None;
    }

    let frame_area = frame.area();
    let available = frame_area
        .height
        .saturating_sub(header.y.saturating_add(header.height));
    // Not enough rows below the header to draw anything useful.
    if available < 3 {
        return None;
    }
    let height = available.min(9);
    let popup = Rect {
        x: header.x,
        y: header.y + header.height,
        width: header.width,
        height,
    };

    // The dismissal region spans the header and the overlay together.
    select.set_region(Region::new(
        header.x,
        header.y,
        header.width,
        header.height + popup.height,
    ));

    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("search: ", Style::default().fg(theme.muted)),
        Span::styled(
            select.search().to_owned(),
            Style::default().fg(theme.text),
        ),
        Span::styled("▏", Style::default().fg(theme.accent)),
    ]));

    let filtered = select.filtered();
    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "No results found",
            Style::default().fg(theme.muted),
        )));
    } else {
        for (index, option) in filtered.iter().enumerate() {
            let style = if index == select.highlighted() {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let icon = option.icon.as_deref().unwrap_or(" ");
            lines.push(Line::from(Span::styled(
                format!("{icon} {}", option.label),
                style,
            )));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.panel).fg(theme.text))
                .border_style(Style::default().fg(theme.accent)),
        ),
        popup,
    );

    // First inner row is the search line; items start one row below it.
    let inner_x = popup.x + 1;
    let items_y = popup.y + 2;
    let items_height = popup.height.saturating_sub(3);
    Some(Region::new(
        inner_x,
        items_y,
        popup.width.saturating_sub(2),
        items_height,
    ))
}

fn draw_valuation(frame: &mut Frame, area: Rect, app: &mut WatchApp, theme: Theme) {
    let session = &app.session;
    let currency = session.currency();
    let valuation = session.valuation();

    let status = if session.is_tax_loading() {
        Span::styled(
            "Recalculating Duties...",
            Style::default().fg(theme.loss),
        )
    } else {
        Span::styled(
            format!("{} Regional Valuation", session.country().flag),
            Style::default().fg(theme.muted),
        )
    };

    let value_style = if session.is_tax_loading() {
        Style::default().fg(theme.muted)
    } else {
        Style::default()
            .fg(theme.text)
            .add_modifier(Modifier::BOLD)
    };

    let weight_focused = app.focus == Focus::Weight;
    let weight_style = if weight_focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let lines = vec![
        Line::from(status),
        Line::from(Span::styled(
            format!(
                "{} {}",
                currency.symbol,
                format_money(valuation.final_value)
            ),
            value_style,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Weight: ", Style::default().fg(theme.muted)),
            Span::styled(format!("[ {} ]", app.weight_input), weight_style),
            Span::styled(" grams", Style::default().fg(theme.muted)),
        ]),
    ];

    let weight_region = Region::new(area.x, area.y + 4, area.width, 1);
    app.weight_area = Some(weight_region);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel_block(theme)),
        area,
    );
}

fn draw_breakdown(frame: &mut Frame, area: Rect, app: &WatchApp, theme: Theme) {
    let session = &app.session;
    let currency = session.currency();
    let valuation = session.valuation();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let cell = |title: String, value: Line<'static>| {
        Paragraph::new(vec![
            Line::from(Span::styled(title, Style::default().fg(theme.muted))),
            value,
        ])
        .alignment(Alignment::Center)
        .block(panel_block(theme))
    };

    frame.render_widget(
        cell(
            String::from("Net Market Cost"),
            Line::from(Span::raw(format!(
                "{}{}",
                currency.symbol,
                format_money(valuation.base_value)
            ))),
        ),
        columns[0],
    );

    let tax_line = if session.is_tax_loading() {
        Line::from(Span::styled("···", Style::default().fg(theme.loss)))
    } else {
        Line::from(Span::styled(
            format!("+{}{}", currency.symbol, format_money(valuation.tax_value)),
            Style::default().fg(theme.loss),
        ))
    };
    frame.render_widget(
        cell(
            format!("Regional Tax ({}%)", valuation.tax_rate_percent),
            tax_line,
        ),
        columns[1],
    );

    frame.render_widget(
        cell(
            String::from("Estimated Total"),
            Line::from(Span::styled(
                format!(
                    "{}{}",
                    currency.symbol,
                    format_money(valuation.final_value)
                ),
                Style::default().fg(theme.gain),
            )),
        ),
        columns[2],
    );
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &WatchApp, theme: Theme) {
    let session = &app.session;
    let currency = session.currency();
    let valuation = session.valuation();
    let market = session.market_data();

    let change_span = match market {
        Some(data) if data.change_24h >= 0.0 => Span::styled(
            format!("↑ {:.2}%", data.change_percent),
            Style::default().fg(theme.gain),
        ),
        Some(data) => Span::styled(
            format!("↓ {:.2}%", data.change_percent),
            Style::default().fg(theme.loss),
        ),
        None => Span::styled("—", Style::default().fg(theme.muted)),
    };

    let last_update = if session.is_price_loading() {
        String::from("Fetching")
    } else {
        market
            .map(|data| data.last_updated.clone())
            .unwrap_or_else(|| String::from("—"))
    };

    let line = Line::from(vec![
        Span::styled("Spot/g ", Style::default().fg(theme.muted)),
        Span::raw(format!(
            "{}{}",
            currency.symbol,
            format_money(valuation.price_per_gram)
        )),
        Span::styled("   24h ", Style::default().fg(theme.muted)),
        change_span,
        Span::styled("   Market ", Style::default().fg(theme.muted)),
        Span::raw(session.country().name),
        Span::styled("   Updated ", Style::default().fg(theme.muted)),
        Span::raw(last_update),
    ]);

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(panel_block(theme)),
        area,
    );
}

fn draw_hints(frame: &mut Frame, area: Rect, theme: Theme) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "tab focus · enter open/select · type to search · ^r refresh · ^t theme · q quit",
            Style::default().fg(theme.muted),
        )))
        .alignment(Alignment::Center),
        area,
    );
}

fn panel_block(theme: Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(theme.panel).fg(theme.text))
        .border_style(Style::default().fg(theme.muted))
}

fn focusable_block(theme: Theme, focused: bool) -> Block<'static> {
    let border = if focused { theme.accent } else { theme.muted };
    Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(theme.panel).fg(theme.text))
        .border_style(Style::default().fg(border))
}

fn region_from(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

/// Two-decimal money formatting with thousands separators.
fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (integral, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integral.len() + integral.len() / 3);
    for (position, digit) in integral.chars().enumerate() {
        if position > 0 && (integral.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
