use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

use super::{BLOCK_LEFT_PADDING, BLOCKS_WIDTH_PERCENT, PANEL_WIDTH_PERCENT, overlays, panel, status};

/// Placeholder shown on blocks with no text yet.
const EMPTY_PLACEHOLDER: &str = "Type here...";

pub fn split_main_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(PANEL_WIDTH_PERCENT),
            Constraint::Percentage(BLOCKS_WIDTH_PERCENT),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    if model.panel_visible {
        let chunks = split_main_columns(main_area);
        panel::render_panel(model, frame, chunks[0]);
        render_blocks(model, frame, chunks[1]);
    } else {
        render_blocks(model, frame, main_area);
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.source_visible {
        overlays::render_source_overlay(model, frame, area);
    }
}

fn render_blocks(model: &Model, frame: &mut Frame, area: Rect) {
    let outer = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(BLOCK_LEFT_PADDING));

    let visible_rows = area.height as usize;
    let start = model.scroll_offset.min(model.list.len().saturating_sub(1));
    let end = (start + visible_rows).min(model.list.len());

    let mut content: Vec<Line> = Vec::new();
    for index in start..end {
        let block = model.list.get(index).expect("index within list");
        let style = super::style::block_style(block);
        let is_active = index == model.active;

        if is_active && !model.panel_focused {
            content.push(active_block_line(&block.contents, model.col, style));
        } else if block.contents.is_empty() {
            content.push(Line::styled(
                EMPTY_PLACEHOLDER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            content.push(Line::styled(block.contents.clone(), style));
        }
    }

    // Clear first so styles from previous frames do not leak.
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(outer), area);
}

/// The active block's line with the caret cell rendered in reverse video.
fn active_block_line(text: &str, col: usize, style: Style) -> Line<'static> {
    let col = col.min(text.chars().count());
    let before: String = text.chars().take(col).collect();
    let cursor_char = text.chars().nth(col).map_or_else(|| " ".to_string(), String::from);
    let after: String = text.chars().skip(col + 1).collect();

    let mut spans = Vec::new();
    if !before.is_empty() {
        spans.push(Span::styled(before, style));
    }
    spans.push(Span::styled(
        cursor_char,
        Style::default().bg(Color::White).fg(Color::Black),
    ));
    if !after.is_empty() {
        spans.push(Span::styled(after, style));
    }
    Line::from(spans)
}
