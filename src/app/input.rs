use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};

impl App {
    pub(super) fn handle_event(event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(w, h) => Some(Message::Resize(w, h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            let _ = key;
            return Some(Message::HideHelp);
        }
        if model.source_visible {
            return Some(Message::HideSource);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // Chords that work regardless of focus. Single printable keys cannot
        // carry commands here - they all insert text.
        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::F(2) => return Some(Message::TogglePanel),
            KeyCode::F(3) => return Some(Message::ToggleSource),
            KeyCode::Char('s') if ctrl => return Some(Message::Save),
            KeyCode::Char('p') if ctrl => return Some(Message::TogglePanel),
            KeyCode::Char('y') if ctrl => return Some(Message::CopyBlock),
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Tab => return Some(Message::SwitchFocus),
            _ => {}
        }

        // Handle panel-focused editing
        if model.panel_focused && model.panel_visible {
            return match key.code {
                KeyCode::Esc => Some(Message::SwitchFocus),
                KeyCode::Up => Some(Message::PanelFieldUp),
                KeyCode::Down => Some(Message::PanelFieldDown),
                KeyCode::Left => Some(Message::PanelCyclePrev),
                KeyCode::Right => Some(Message::PanelCycleNext),
                KeyCode::Backspace => Some(Message::PanelDeleteBack),
                KeyCode::Char(c) if !ctrl && !alt => Some(Message::PanelInput(c)),
                _ => None,
            };
        }

        // Block editing
        match key.code {
            KeyCode::Enter => Some(Message::SplitBlock),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Up => Some(Message::MoveUp),
            KeyCode::Down => Some(Message::MoveDown),
            KeyCode::Left => Some(Message::MoveLeft),
            KeyCode::Right => Some(Message::MoveRight),
            KeyCode::Home if ctrl => Some(Message::MoveDocStart),
            KeyCode::End if ctrl => Some(Message::MoveDocEnd),
            KeyCode::Home => Some(Message::MoveLineStart),
            KeyCode::End => Some(Message::MoveLineEnd),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible || model.source_visible {
            return None;
        }

        let area = blocks_mouse_area(model);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !point_in_rect(mouse.column, mouse.row, area) {
                    return None;
                }
                let index = model.scroll_offset + (mouse.row - area.y) as usize;
                if index >= model.list.len() {
                    return None;
                }
                let col = mouse
                    .column
                    .saturating_sub(area.x + crate::ui::BLOCK_LEFT_PADDING)
                    as usize;
                Some(Message::FocusBlock(index, col))
            }
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(3)),
            _ => None,
        }
    }
}

fn blocks_mouse_area(model: &Model) -> Rect {
    let total = Rect::new(0, 0, model.width, model.height);
    let content = if model.panel_visible {
        crate::ui::split_main_columns(total)[1]
    } else {
        total
    };
    let footer_rows = 1 + u16::from(model.active_toast().is_some());
    Rect {
        height: content.height.saturating_sub(footer_rows),
        ..content
    }
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
