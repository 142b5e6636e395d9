use crate::app::Model;
use crate::app::model::{PanelField, ToastLevel};
use crate::block::{BlockPatch, CaretTarget, PropValue, caret};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Block editing
    /// Insert a character at the caret
    InsertChar(char),
    /// Backspace: merge into the previous block, or delete a character in
    /// the first block
    DeleteBack,
    /// Delete: merge the next block in at end of text, or delete the
    /// character at the caret
    DeleteForward,
    /// Split the active block at the caret (Enter)
    SplitBlock,

    // Caret movement
    /// Move the caret to the previous block at the same offset
    MoveUp,
    /// Move the caret to the next block at the same offset
    MoveDown,
    /// Move the caret one character left, crossing into the previous block
    /// at offset 0
    MoveLeft,
    /// Move the caret one character right, crossing into the next block at
    /// end of text
    MoveRight,
    /// Move the caret to the start of the active block (Home)
    MoveLineStart,
    /// Move the caret to the end of the active block (End)
    MoveLineEnd,
    /// Move the caret to the first block, offset 0 (Ctrl+Home)
    MoveDocStart,
    /// Move the caret to the last block, last position (Ctrl+End)
    MoveDocEnd,
    /// Focus a block directly at (index, column), e.g. from a mouse click
    FocusBlock(usize, usize),
    /// Scroll the viewport up by n blocks
    ScrollUp(usize),
    /// Scroll the viewport down by n blocks
    ScrollDown(usize),

    // Style panel
    /// Toggle the style panel
    TogglePanel,
    /// Switch focus between blocks and panel
    SwitchFocus,
    /// Move panel field selection up
    PanelFieldUp,
    /// Move panel field selection down
    PanelFieldDown,
    /// Cycle the selected enum field backwards (tag, link target)
    PanelCyclePrev,
    /// Cycle the selected enum field forwards
    PanelCycleNext,
    /// Append a character to the selected text field
    PanelInput(char),
    /// Delete the last character of the selected text field
    PanelDeleteBack,

    // Overlays
    /// Toggle the help overlay
    ToggleHelp,
    /// Hide the help overlay
    HideHelp,
    /// Toggle the JSON source overlay
    ToggleSource,
    /// Hide the JSON source overlay
    HideSource,

    // File
    /// Save the document
    Save,
    /// Copy the active block's text to the clipboard
    CopyBlock,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    // A pending quit confirmation survives only a Save (Ctrl+S can complete
    // a confirmed quit); any other action cancels it.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    let is_scroll = matches!(&msg, Message::ScrollUp(_) | Message::ScrollDown(_));

    match msg {
        // Block editing
        Message::InsertChar(c) => {
            let text = model.active_text();
            let at = model.col.min(text.chars().count());
            model.list.change(
                model.active,
                BlockPatch::new().contents(insert_char_at(&text, at, c)),
            );
            model.col = at + 1;
            model.dirty = true;
        }
        Message::DeleteBack => {
            if model.active > 0 {
                model.list.merge_back(model.active);
                model.apply_pending_caret();
                model.dirty = true;
            } else if model.col > 0 {
                let text = model.active_text();
                model.list.change(
                    model.active,
                    BlockPatch::new().contents(remove_char_at(&text, model.col - 1)),
                );
                model.col -= 1;
                model.dirty = true;
            }
        }
        Message::DeleteForward => {
            if model.col >= model.active_len() {
                if model.active + 1 < model.list.len() {
                    model.list.merge_forward(model.active);
                    model.apply_pending_caret();
                    model.dirty = true;
                }
            } else {
                let text = model.active_text();
                model.list.change(
                    model.active,
                    BlockPatch::new().contents(remove_char_at(&text, model.col)),
                );
                model.dirty = true;
            }
        }
        Message::SplitBlock => {
            model.list.split(model.active, model.col);
            model.apply_pending_caret();
            model.dirty = true;
        }

        // Caret movement
        Message::MoveUp => {
            if model.active > 0 {
                model.list.change(
                    model.active - 1,
                    BlockPatch::new().caret(CaretTarget::Offset(model.col)),
                );
                model.apply_pending_caret();
            }
        }
        Message::MoveDown => {
            if model.active + 1 < model.list.len() {
                model.list.change(
                    model.active + 1,
                    BlockPatch::new().caret(CaretTarget::Offset(model.col)),
                );
                model.apply_pending_caret();
            }
        }
        Message::MoveLeft => {
            if model.col == 0 {
                if model.active > 0 {
                    model
                        .list
                        .change(model.active - 1, BlockPatch::new().caret(CaretTarget::Last));
                    model.apply_pending_caret();
                }
            } else {
                model.col -= 1;
            }
        }
        Message::MoveRight => {
            if model.col >= model.active_len() {
                if model.active + 1 < model.list.len() {
                    model.list.change(
                        model.active + 1,
                        BlockPatch::new().caret(CaretTarget::Offset(0)),
                    );
                    model.apply_pending_caret();
                }
            } else {
                model.col += 1;
            }
        }
        Message::MoveLineStart => model.col = 0,
        Message::MoveLineEnd => model.col = model.active_len(),
        Message::MoveDocStart => {
            model
                .list
                .change(0, BlockPatch::new().caret(CaretTarget::Offset(0)));
            model.apply_pending_caret();
        }
        Message::MoveDocEnd => {
            let last = model.list.len() - 1;
            model
                .list
                .change(last, BlockPatch::new().caret(CaretTarget::Last));
            model.apply_pending_caret();
        }
        Message::FocusBlock(index, col) => {
            if let Some(block) = model.list.get(index) {
                model.col = caret::resolve(CaretTarget::Offset(col), &block.contents);
                model.active = index;
                model.panel_focused = false;
            }
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            let max = model.list.len().saturating_sub(model.content_rows().max(1));
            model.scroll_offset = (model.scroll_offset + n).min(max);
        }

        // Style panel
        Message::TogglePanel => {
            model.panel_visible = !model.panel_visible;
            if !model.panel_visible {
                model.panel_focused = false;
            }
        }
        Message::SwitchFocus => {
            if model.panel_visible {
                model.panel_focused = !model.panel_focused;
            }
        }
        Message::PanelFieldUp => {
            model.panel_field = model.panel_field.prev(model.active_block().tag.is_link());
        }
        Message::PanelFieldDown => {
            model.panel_field = model.panel_field.next(model.active_block().tag.is_link());
        }
        Message::PanelCyclePrev => cycle_panel_field(&mut model, false),
        Message::PanelCycleNext => cycle_panel_field(&mut model, true),
        Message::PanelInput(c) => {
            edit_panel_text(&mut model, |value| value.push(c));
        }
        Message::PanelDeleteBack => {
            edit_panel_text(&mut model, |value| {
                value.pop();
            });
        }

        // Overlays
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::ToggleSource => model.source_visible = !model.source_visible,
        Message::HideSource => model.source_visible = false,

        // File (IO happens in side effects)
        Message::Save | Message::CopyBlock => {}

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
        }

        // Application
        Message::Quit => {
            if model.dirty && !model.quit_confirmed {
                model.quit_confirmed = true;
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes - Ctrl+Q again to discard, Ctrl+S to save",
                );
            } else {
                model.should_quit = true;
            }
        }
    }

    if is_scroll {
        let max = model.list.len().saturating_sub(model.content_rows().max(1));
        model.scroll_offset = model.scroll_offset.min(max);
    } else {
        model.ensure_active_visible();
    }
    model
}

/// Cycle the selected enum panel field (tag, or link target).
fn cycle_panel_field(model: &mut Model, forward: bool) {
    match model.panel_field {
        PanelField::Tag => {
            let tag = model.active_block().tag;
            let tag = if forward {
                tag.cycle_next()
            } else {
                tag.cycle_prev()
            };
            // Re-tagging moves the caret to the end of the block, matching
            // how re-rendering an editable element resets its selection.
            model.list.change(
                model.active,
                BlockPatch::new().tag(tag).caret(CaretTarget::Last),
            );
            model.apply_pending_caret();
            model.panel_field = model.panel_field.clamp(tag.is_link());
            model.dirty = true;
        }
        PanelField::Target => {
            let mut attributes = model.active_block().attributes.clone();
            let current = attributes
                .get("target")
                .and_then(PropValue::as_text)
                .unwrap_or("_self");
            let next = if current == "_blank" { "_self" } else { "_blank" };
            attributes.insert("target".to_string(), next.into());
            model
                .list
                .change(model.active, BlockPatch::new().attributes(attributes));
            model.dirty = true;
        }
        PanelField::Color | PanelField::FontSize | PanelField::Href => {}
    }
}

/// Apply a text edit to the map entry behind the selected panel field.
///
/// Values are freeform; nothing is validated, and empty strings are kept.
fn edit_panel_text(model: &mut Model, edit: impl FnOnce(&mut String)) {
    let (style_map, key) = match model.panel_field {
        PanelField::Color => (true, "color"),
        PanelField::FontSize => (true, "font-size"),
        PanelField::Href => (false, "href"),
        PanelField::Tag | PanelField::Target => return,
    };
    let block = model.active_block();
    let mut map = if style_map {
        block.style.clone()
    } else {
        block.attributes.clone()
    };
    let mut value = map
        .get(key)
        .map(PropValue::display)
        .unwrap_or_default();
    edit(&mut value);
    map.insert(key.to_string(), value.into());
    let patch = if style_map {
        BlockPatch::new().style(map)
    } else {
        BlockPatch::new().attributes(map)
    };
    model.list.change(model.active, patch);
    model.dirty = true;
}

fn insert_char_at(text: &str, at: usize, c: char) -> String {
    let mut out = String::with_capacity(text.len() + c.len_utf8());
    out.extend(text.chars().take(at));
    out.push(c);
    out.extend(text.chars().skip(at));
    out
}

fn remove_char_at(text: &str, at: usize) -> String {
    text.chars()
        .enumerate()
        .filter(|(i, _)| *i != at)
        .map(|(_, c)| c)
        .collect()
}
