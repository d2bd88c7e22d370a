use activity_journal_core::models::activity::ActivityType;
use activity_journal_core::models::chosen::ChosenActivity;
use activity_journal_core::models::filter::FilterField;
use activity_journal_core::models::notice::NoticeKind;
use chrono::{Local, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Focus};
use crate::keys::help_line;

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_header(f, main_chunks[0], app);

    if app.filters_open {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(main_chunks[1]);
        render_list(f, body[0], app);
        render_filters(f, body[1], app);
    } else {
        render_list(f, main_chunks[1], app);
    }

    render_footer(f, main_chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = if app.controller.is_fetching() {
        Span::styled(" fetching…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!(" {} chosen", app.controller.store().len()),
            Style::default().fg(Color::DarkGray),
        )
    };
    let header = Line::from(vec![
        Span::styled(
            "Activity Journal",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        status,
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_list(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" My activities ");

    if app.controller.store().is_empty() {
        let empty = Paragraph::new(Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing chosen yet. Press 'a' or a number key to get a suggestion.",
                Style::default().fg(Color::DarkGray),
            )),
        ]))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .controller
        .store()
        .iter()
        .map(render_item)
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_item(chosen: &ChosenActivity) -> ListItem<'static> {
    let a = &chosen.activity;
    let mut title = vec![Span::raw(a.name.clone())];
    if a.link.is_some() {
        title.push(Span::styled(" ↗", Style::default().fg(Color::Blue)));
    }

    let details = Line::from(vec![
        Span::styled(
            format!("  {:<13}", a.activity_type.to_string()),
            Style::default().fg(category_color(a.activity_type)),
        ),
        Span::styled(
            format!(
                "{} ppl · price {:.2} · access {:.2} · {}",
                a.participants,
                a.price,
                a.accessibility,
                chosen.chosen_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    ListItem::new(vec![Line::from(title), details])
}

fn render_filters(f: &mut Frame, area: Rect, app: &App) {
    let filters = app.controller.filters();
    let focused = Style::default().fg(Color::Black).bg(Color::Cyan);
    let normal = Style::default();

    let mut lines = vec![Line::from(vec![
        Span::raw("Category          "),
        Span::styled(
            format!("◀ {} ▶", filters.category),
            if app.focus == Focus::Category { focused } else { normal },
        ),
    ])];
    lines.push(Line::from(""));

    for field in FilterField::ALL {
        let style = if app.focus == Focus::Field(field) {
            focused
        } else {
            normal
        };
        let value = filters.value(field);
        let shown = if value.is_empty() { "–" } else { value };
        lines.push(Line::from(vec![
            Span::raw(format!("{:<18}", field.label())),
            Span::styled(format!(" {shown} "), style),
        ]));
    }

    let query = app.controller.current_query();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        if query.is_unconstrained() {
            "No constraints".to_string()
        } else {
            format!("{} constraint(s) active", query.to_query_pairs().len())
        },
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Filters "),
    );
    f.render_widget(panel, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let notice_line = match app.controller.notice(Utc::now()) {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::NotFound => Color::Yellow,
                NoticeKind::Unavailable | NoticeKind::Rejected => Color::Red,
                NoticeKind::Info => Color::Blue,
            };
            Line::from(Span::styled(notice.message.clone(), Style::default().fg(color)))
        }
        None => Line::from(""),
    };

    let footer = Paragraph::new(Text::from(vec![
        notice_line,
        Line::from(Span::styled(
            help_line(app.filters_open),
            Style::default().fg(Color::DarkGray),
        )),
    ]));
    f.render_widget(footer, area);
}

fn category_color(t: ActivityType) -> Color {
    match t {
        ActivityType::Education => Color::Blue,
        ActivityType::Recreational => Color::Green,
        ActivityType::Social => Color::Magenta,
        ActivityType::Diy => Color::LightYellow,
        ActivityType::Charity => Color::LightRed,
        ActivityType::Cooking => Color::Yellow,
        ActivityType::Relaxation => Color::Cyan,
        ActivityType::Music => Color::LightMagenta,
        ActivityType::Busywork => Color::Gray,
    }
}
