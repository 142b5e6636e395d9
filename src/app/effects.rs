use std::io::{Write, stdout};

use base64::Engine;

use crate::app::{App, Message, Model, ToastLevel};
use crate::storage;

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => save_document(model, true),
            Message::CopyBlock => copy_active_block(model),
            _ => {
                if model.autosave && model.dirty {
                    save_document(model, false);
                }
            }
        }
    }
}

fn save_document(model: &mut Model, announce: bool) {
    match storage::save_blocks(&model.file_path, model.list.blocks()) {
        Ok(()) => {
            model.dirty = false;
            tracing::debug!(path = %model.file_path.display(), "document saved");
            if announce {
                model.show_toast(
                    ToastLevel::Info,
                    format!("Saved {}", model.file_path.display()),
                );
            }
            // Complete a pending quit once the changes are safe on disk.
            if model.quit_confirmed {
                model.should_quit = true;
            }
        }
        Err(err) => {
            tracing::warn!(path = %model.file_path.display(), %err, "save failed");
            model.show_toast(ToastLevel::Error, format!("Save failed: {err}"));
        }
    }
}

fn copy_active_block(model: &mut Model) {
    let text = model.active_text();
    if text.is_empty() {
        model.show_toast(ToastLevel::Info, "Block is empty");
        return;
    }
    match copy_to_clipboard_osc52(&text) {
        Ok(()) => model.show_toast(ToastLevel::Info, "Copied block"),
        Err(err) => model.show_toast(ToastLevel::Error, format!("Copy failed: {err}")),
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}

#[cfg(test)]
mod tests {
    use super::osc52_sequence;

    #[test]
    fn test_osc52_sequence_encodes_text() {
        let seq = osc52_sequence("hi");
        assert_eq!(seq, "\x1b]52;c;aGk=\x07");
    }
}
