use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::{Model, PanelField};
use crate::block::PropValue;

/// Render the style/attribute panel for the active block.
///
/// The panel is a plain write-through form: every edit lands in the block
/// record immediately, nothing is validated.
pub fn render_panel(model: &Model, frame: &mut Frame, area: Rect) {
    let block = model.active_block();
    let link = block.tag.is_link();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(field_line(
        model,
        PanelField::Tag,
        "Tag",
        block.tag.as_str().to_string(),
    ));
    lines.push(field_line(
        model,
        PanelField::Color,
        "Color",
        prop_text(&block.style, "color"),
    ));
    lines.push(field_line(
        model,
        PanelField::FontSize,
        "Font size",
        prop_text(&block.style, "font-size"),
    ));
    if link {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Link",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        lines.push(field_line(
            model,
            PanelField::Href,
            "Href",
            prop_text(&block.attributes, "href"),
        ));
        lines.push(field_line(
            model,
            PanelField::Target,
            "Target",
            prop_text_or(&block.attributes, "target", "_self"),
        ));
    }
    lines.push(Line::raw(""));
    let hint = if model.panel_focused {
        "Up/Down field · Left/Right cycle · Tab back"
    } else {
        "Tab to edit"
    };
    lines.push(Line::styled(hint, Style::default().fg(Color::Indexed(245))));

    let border_style = if model.panel_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let outer = Block::default()
        .title(format!("Block {}/{}", model.active + 1, model.list.len()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    frame.render_widget(Paragraph::new(lines).block(outer), area);
}

fn field_line(model: &Model, field: PanelField, label: &str, value: String) -> Line<'static> {
    let selected = model.panel_field == field;
    let marker = if selected { ">" } else { " " };
    let value_style = if selected && model.panel_focused {
        Style::default().reversed()
    } else {
        Style::default().fg(Color::Cyan)
    };
    Line::from(vec![
        Span::raw(format!("{marker} {label:<10}")),
        Span::styled(value, value_style),
    ])
}

fn prop_text(map: &crate::block::PropMap, key: &str) -> String {
    map.get(key).map(PropValue::display).unwrap_or_default()
}

fn prop_text_or(map: &crate::block::PropMap, key: &str, fallback: &str) -> String {
    let value = prop_text(map, key);
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
