use crate::api::types::ResultKind;
use crate::tui::app::{App, Phase};
use crate::tui::style;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Tab strip / section header
            Constraint::Min(5),    // Results or idle view
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);

    if app.input.is_empty() {
        draw_idle_header(frame, chunks[1]);
        draw_idle_view(frame, app, chunks[2]);
    } else {
        draw_tab_strip(frame, app, chunks[1]);
        draw_results_area(frame, app, chunks[2]);
    }

    draw_status_bar(frame, app, chunks[3]);

    // Cursor sits inside the search bar
    let prefix = &app.input.query[..app.input.cursor_pos];
    let cursor_x = chunks[0].x + 1 + 4 + prefix.width() as u16;
    let cursor_y = chunks[0].y + 1;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Circles Search ");

    let search_text = format!(" \u{1F50D} {}", app.input.query);
    let paragraph = Paragraph::new(search_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_idle_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(Span::styled(
        " Start typing to search restaurants, lists, posts, people",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_tab_strip(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for kind in ResultKind::ALL {
        let count = app
            .current_results
            .as_ref()
            .map(|set| set.bucket(kind).len())
            .unwrap_or(0);
        let label = format!(" {} ({}) ", kind.plural_label(), count);

        let style_for_tab = if kind == app.view.active_tab {
            Style::default()
                .fg(Color::Black)
                .bg(style::color_for_kind(kind))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(style::color_for_kind(kind))
        };
        spans.push(Span::styled(label, style_for_tab));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_results_area(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut rows_area = area;

    // Inline error banner above whatever results are retained
    if app.phase == Phase::Error {
        let message = app
            .last_error
            .as_deref()
            .unwrap_or("search failed")
            .to_string();
        let banner = Line::from(vec![
            Span::styled(
                " \u{26A0} Search failed: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(message, Style::default().fg(Color::Red)),
            Span::styled("  (Ctrl+R to retry)", Style::default().fg(Color::DarkGray)),
        ]);
        let banner_area = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(Paragraph::new(banner), banner_area);
        rows_area = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1),
        );
    }

    match (app.current_results.is_some(), app.phase) {
        (false, Phase::Debouncing | Phase::Loading) => {
            let line = Line::from(Span::styled(
                " Searching across all content\u{2026}",
                Style::default().fg(Color::DarkGray),
            ));
            frame.render_widget(Paragraph::new(line), rows_area);
        }
        (true, Phase::Empty) => {
            draw_no_results(frame, app, rows_area);
        }
        (true, _) => {
            draw_result_rows(frame, app, rows_area);
        }
        (false, _) => {}
    }
}

fn draw_no_results(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            " No results found",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                " We couldn't find anything matching \"{}\"",
                app.committed_query()
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(Span::styled(
            " Try: pizza, sushi, date night, brunch",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_result_rows(frame: &mut Frame, app: &mut App, area: Rect) {
    app.view.visible_rows = area.height as usize;

    let Some(set) = &app.current_results else {
        return;
    };
    let bucket = set.bucket(app.view.active_tab);

    let start = app.view.scroll_offset;
    let end = (start + app.view.visible_rows).min(bucket.len());

    let mut lines = Vec::with_capacity(end - start);
    for (i, result) in bucket[start..end].iter().enumerate() {
        let index = start + i;
        let selected = app.view.selected == Some(index);

        let base = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let dim = if selected {
            base
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(if selected { "\u{25B6} " } else { "  " }, base),
            Span::styled(format!("{} ", style::icon_for_kind(result.kind)), base),
            Span::styled(result.name.clone(), base),
        ];
        if !result.subtitle.is_empty() {
            spans.push(Span::styled(format!("  {}", result.subtitle), dim));
        }
        let meta = style::metadata_line(result);
        if !meta.is_empty() {
            spans.push(Span::styled(format!("  {}", meta), dim));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_idle_view(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    let recent = app.recent_display();
    if !recent.is_empty() {
        lines.push(Line::from(Span::styled(
            " Recent Searches",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        for term in &recent {
            lines.push(Line::from(vec![
                Span::styled("   \u{1F552} ", Style::default().fg(Color::DarkGray)),
                Span::styled(term.clone(), Style::default().fg(Color::White)),
            ]));
        }
        lines.push(Line::default());
    }

    if !app.trending.is_empty() {
        lines.push(Line::from(Span::styled(
            " Trending Now",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )));
        for item in &app.trending {
            let mut spans = vec![
                Span::styled("   \u{1F525} ", Style::default().fg(Color::LightRed)),
                Span::styled(item.query.clone(), Style::default().fg(Color::White)),
            ];
            if let Some(count) = item.search_count {
                spans.push(Span::styled(
                    format!("  {} searches", count),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.phase {
        Phase::Idle => String::new(),
        Phase::Debouncing => "typing\u{2026}".to_string(),
        Phase::Loading => "searching\u{2026}".to_string(),
        Phase::Results => {
            let total = app
                .current_results
                .as_ref()
                .map(|set| set.total())
                .unwrap_or(0);
            format!("{} results", total)
        }
        Phase::Empty => "no results".to_string(),
        Phase::Error => "search failed".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            " Tab: category  \u{2191}\u{2193}: select  Enter: open  Esc: clear/quit ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(status, Style::default().fg(Color::White)),
    ]);

    frame.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Rgb(40, 40, 50))), area);
}
