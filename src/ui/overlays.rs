use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  Enter               Split block at caret"));
    lines.push(Line::raw("  Backspace           Merge into previous block"));
    lines.push(Line::raw("  Delete              Merge next block (at end of text)"));
    lines.push(Line::raw("  Any character       Insert text"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Navigation", section_style));
    lines.push(Line::raw("  Up/Down             Previous / next block, same column"));
    lines.push(Line::raw("  Left/Right          Move caret, crossing block edges"));
    lines.push(Line::raw("  Home/End            Start / end of block"));
    lines.push(Line::raw("  Ctrl+Home/End       Start / end of document"));
    lines.push(Line::raw("  Mouse click         Focus block and place caret"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Style panel", section_style));
    lines.push(Line::raw("  F2 / Ctrl+P         Toggle panel"));
    lines.push(Line::raw("  Tab                 Switch focus to/from panel"));
    lines.push(Line::raw("  Up/Down             Select field"));
    lines.push(Line::raw("  Left/Right          Cycle tag or link target"));
    lines.push(Line::raw("  Typing/Backspace    Edit color, size, href"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  Ctrl+S              Save document"));
    lines.push(Line::raw("  Ctrl+Y              Copy block text"));
    lines.push(Line::raw("  F3                  View document JSON"));
    lines.push(Line::raw("  Ctrl+Q / Ctrl+C     Quit"));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_source_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(8).max(44);
    let popup_height = area.height.saturating_sub(4).max(10);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let json = serde_json::to_string_pretty(model.list.blocks())
        .unwrap_or_else(|err| format!("serialization failed: {err}"));

    // Border + padding on both sides, plus a footer hint row.
    let content_rows = popup.height.saturating_sub(5) as usize;
    let mut lines: Vec<Line> = json
        .lines()
        .take(content_rows)
        .map(|line| Line::raw(line.to_string()))
        .collect();
    let total = json.lines().count();
    if total > content_rows {
        lines.push(Line::styled(
            format!("... {} more lines", total - content_rows),
            Style::default().fg(Color::Indexed(245)),
        ));
    }
    lines.push(Line::styled(
        "any key closes",
        Style::default().fg(Color::Indexed(245)),
    ));

    let block = Block::default()
        .title("Document JSON")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
