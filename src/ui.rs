use ratatui::{
    Frame,
    layout::{Layout, Direction, Constraint, Rect, Alignment},
    widgets::{Block, Borders, BorderType, List, ListItem, ListState, Paragraph, Wrap, Clear},
    style::{Style, Modifier},
    text::{Line, Span},
};
use crate::app::{App, Pane, ToastKind};
use crate::theme::ColorScheme;
use crate::types::FavoriteKind;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

// ===============================
// Top-level draw
// ===============================
pub fn draw(f:&mut Frame, app:&App){
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    header(f, chunks[0], app);
    body(f, chunks[1], app);
    footer(f, chunks[2], app);

    if app.toast_message().is_some() {
        draw_toast_modal(f, app);
    }
}

// ===============================
// Header / Footer
// ===============================
fn header(f:&mut Frame, area:Rect, app:&App){
    let colors = app.theme().colors();
    let mut spans = Vec::new();

    for (i, pane) in Pane::ALL.iter().enumerate() {
        spans.push(Span::raw(if i == 0 { "┌─" } else { "┬─" }));
        if *pane == app.pane() {
            spans.push(Span::styled(
                pane.title(),
                Style::default().fg(colors.accent.into()).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(pane.title()));
        }
        spans.push(Span::raw("─"));
    }
    spans.push(Span::raw("┐"));

    if let Some(breed) = app.selected_breed() {
        spans.push(Span::raw("  breed: "));
        spans.push(Span::styled(breed.name.clone(), Style::default().fg(colors.accent.into())));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(colors.text.into()))
        .block(Block::default().borders(Borders::BOTTOM).border_type(BorderType::Plain));
    f.render_widget(paragraph, area);
}

fn footer(f:&mut Frame, area:Rect, app:&App){
    let colors = app.theme().colors();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(colors.accent.into()));
    let spans = vec![
        key("f"), Span::raw(" fact │ "),
        key("i"), Span::raw(" image │ "),
        key("F/I"), Span::raw(" favorite │ "),
        key("x"), Span::raw(" remove │ "),
        key("C"), Span::raw(" clear all │ "),
        key("c"), Span::raw(" copy │ "),
        key("Tab"), Span::raw(" switch │ "),
        key("q"), Span::raw(" quit"),
        Span::raw(format!(" │ ★ {}", app.favorites().len())),
    ];
    let line = Paragraph::new(Line::from(spans)).style(Style::default().fg(colors.text_dim.into()));
    f.render_widget(line, area);
}

// ===============================
// Body
// ===============================
fn body(f:&mut Frame, area:Rect, app:&App){
    const MIN_WIDTH: u16 = 50;
    const MIN_HEIGHT: u16 = 12;
    let colors = app.theme().colors();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small!\n\nMinimum size: {}×{}\nCurrent size: {}×{}",
            MIN_WIDTH, MIN_HEIGHT, area.width, area.height
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors.toast_error.into()).add_modifier(Modifier::BOLD));
        f.render_widget(warning, area);
        return;
    }

    // Candidates on the left, favorites on the right; stack on narrow terminals
    let direction = if area.width < 90 { Direction::Vertical } else { Direction::Horizontal };
    let halves = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(25), Constraint::Percentage(40)])
        .split(halves[0]);

    render_fact_pane(f, left[0], app);
    render_image_pane(f, left[1], app);
    render_breeds_pane(f, left[2], app);
    render_favorites_pane(f, halves[1], app);
}

fn pane_block(title:String, focused:bool, colors:&ColorScheme) -> Block<'static> {
    let title = if focused { format!(" [ {title} ] ") } else { format!(" {title} ") };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Double } else { BorderType::Rounded })
        .style(Style::default().bg(colors.panel.into()))
        .border_style(Style::default()
            .fg(if focused { colors.accent.into() } else { colors.border.into() })
            .add_modifier(if focused { Modifier::BOLD } else { Modifier::empty() }))
}

fn spinner() -> &'static str {
    let tick = chrono::Utc::now().timestamp_subsec_millis() / 250;
    SPINNER[tick as usize % SPINNER.len()]
}

fn render_fact_pane(f:&mut Frame, area:Rect, app:&App){
    let colors = app.theme().colors();
    let slot = app.fact();

    let mut title = "Cat fact".to_string();
    if slot.is_pending() {
        title.push_str(&format!(" {}", spinner()));
    } else if slot.value().is_some() {
        title.push_str(" · F to favorite");
    }

    let text = if app.fact_text().is_empty() {
        Line::styled("Press f for a random cat fact.", Style::default().fg(colors.text_dim.into()))
    } else if app.fact_text() == crate::app::FACT_FAILED {
        Line::styled(app.fact_text(), Style::default().fg(colors.toast_error.into()))
    } else {
        Line::raw(app.fact_text())
    };

    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(colors.text.into()))
        .block(pane_block(title, app.pane() == Pane::Fact, &colors));
    f.render_widget(paragraph, area);
}

fn render_image_pane(f:&mut Frame, area:Rect, app:&App){
    let colors = app.theme().colors();
    let slot = app.image();

    let mut title = "Cat image".to_string();
    if slot.is_pending() {
        title.push_str(&format!(" {}", spinner()));
    } else if slot.value().is_some() {
        title.push_str(" · I to favorite");
    }

    let mut lines = Vec::new();
    match (app.image_shown(), app.image_notice()) {
        (Some(url), _) => lines.push(Line::styled(url, Style::default().fg(colors.accent.into()).add_modifier(Modifier::UNDERLINED))),
        (None, Some(notice)) => lines.push(Line::styled(notice, Style::default().fg(colors.toast_error.into()))),
        (None, None) => lines.push(Line::styled("Press i for a random cat image.", Style::default().fg(colors.text_dim.into()))),
    }
    if let Some(breed) = app.selected_breed() {
        lines.push(Line::styled(format!("filtered by {}", breed.name), Style::default().fg(colors.text_dim.into())));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(colors.text.into()))
        .block(pane_block(title, app.pane() == Pane::Image, &colors));
    f.render_widget(paragraph, area);
}

fn render_breeds_pane(f:&mut Frame, area:Rect, app:&App){
    let colors = app.theme().colors();
    let focused = app.pane() == Pane::Breeds;
    let selected_id = app.selected_breed().map(|b| b.id.as_str());

    let title = if app.breeds_loading() {
        format!("Breeds {}", spinner())
    } else {
        format!("Breeds ({})", app.breeds().len())
    };

    let items: Vec<ListItem> = app.breeds().iter().map(|b| {
        if Some(b.id.as_str()) == selected_id {
            ListItem::new(format!("● {}", b.name)).style(Style::default().fg(colors.accent.into()))
        } else {
            ListItem::new(format!("  {}", b.name))
        }
    }).collect();

    let mut state = ListState::default();
    if !app.breeds().is_empty() && focused {
        state.select(Some(app.breed_cursor()));
    }

    let list = List::new(items)
        .style(Style::default().fg(colors.text.into()))
        .highlight_style(Style::default().bg(colors.selection_bg.into()).fg(colors.selection_fg.into()).add_modifier(Modifier::BOLD))
        .block(pane_block(title, focused, &colors));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_favorites_pane(f:&mut Frame, area:Rect, app:&App){
    let colors = app.theme().colors();
    let focused = app.pane() == Pane::Favorites;
    let view = app.favorites_view();

    let title = format!("Favorites ({} facts, {} images)", view.facts.len(), view.images.len());

    // One list, two sections; headers are not selectable so the cursor maps
    // onto rows with an offset.
    let mut items: Vec<ListItem> = Vec::with_capacity(view.len() + 2);
    let mut row_to_item: Vec<usize> = Vec::with_capacity(view.len());
    let section = |label: &str| ListItem::new(Line::styled(
        label.to_string(),
        Style::default().fg(colors.text_dim.into()).add_modifier(Modifier::BOLD),
    ));

    for (kind, entries) in [(FavoriteKind::Fact, &view.facts), (FavoriteKind::Image, &view.images)] {
        if entries.is_empty() {
            continue;
        }
        items.push(section(match kind { FavoriteKind::Fact => "Facts", FavoriteKind::Image => "Images" }));
        for entry in entries {
            row_to_item.push(items.len());
            items.push(ListItem::new(format!("  {}", entry.content)));
        }
    }
    if items.is_empty() {
        items.push(ListItem::new(Line::styled(
            "Nothing saved yet. F / I favorite the current fact / image.",
            Style::default().fg(colors.text_dim.into()),
        )));
    }

    let mut state = ListState::default();
    if focused {
        state.select(row_to_item.get(app.favorites_cursor()).copied());
    }

    let list = List::new(items)
        .style(Style::default().fg(colors.text.into()))
        .highlight_style(Style::default().bg(colors.selection_bg.into()).fg(colors.selection_fg.into()).add_modifier(Modifier::BOLD))
        .highlight_symbol("")
        .block(pane_block(title, focused, &colors));
    f.render_stateful_widget(list, area, &mut state);
}

// ===============================
// Overlays
// ===============================
fn draw_toast_modal(f:&mut Frame, app:&App) {
    let colors = app.theme().colors();
    let message = app.toast_message().unwrap_or("");
    let (color, mark) = match app.toast_kind() {
        Some(ToastKind::Error) => (colors.toast_error, "✗"),
        _ => (colors.toast_success, "✓"),
    };

    // Small centered box (50% width, 3 lines height)
    let area = f.area();
    let width = area.width / 2;
    let height = 3;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let overlay = Rect { x, y, width, height }.intersection(area);
    if overlay.is_empty() {
        return;
    }

    f.render_widget(Clear, overlay);

    let text = Paragraph::new(format!("{mark} {message}"))
        .style(Style::default().fg(color.into()).add_modifier(Modifier::BOLD))
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color.into())));

    f.render_widget(text, overlay);
}
