use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;
use crate::app::{Message, Model, update};
use crate::block::Block;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn create_test_model() -> Model {
    let blocks = vec![
        Block::paragraph("first block"),
        Block::paragraph("second block"),
    ];
    Model::new(PathBuf::from("test.json"), blocks, (80, 24))
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(ratatui::buffer::Cell::symbol)
        .collect()
}

#[test]
fn test_render_shows_block_contents() {
    let mut model = create_test_model();
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("first block"));
    assert!(content.contains("second block"));
}

#[test]
fn test_render_shows_placeholder_for_empty_block() {
    let blocks = vec![Block::paragraph("text"), Block::paragraph("")];
    let mut model = Model::new(PathBuf::from("test.json"), blocks, (80, 24));
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("Type here..."));
}

#[test]
fn test_render_status_bar_shows_position() {
    let mut model = create_test_model();
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("test.json"));
    assert!(content.contains("Block 1/2"));
}

#[test]
fn test_render_panel_when_visible() {
    let mut model = create_test_model();
    model = update(model, Message::TogglePanel);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("Tag"));
    assert!(content.contains("Font size"));
}

#[test]
fn test_render_link_fields_only_for_link_blocks() {
    let mut model = create_test_model();
    model = update(model, Message::TogglePanel);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(!buffer_text(&terminal).contains("Href"));

    // Cycle Paragraph -> Link
    model = update(model, Message::SwitchFocus);
    model = update(model, Message::PanelCycleNext);
    terminal.draw(|frame| render(&mut model, frame)).unwrap();
    assert!(buffer_text(&terminal).contains("Href"));
}

#[test]
fn test_render_help_overlay() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleHelp);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("Split block at caret"));
}

#[test]
fn test_render_source_overlay_dumps_json() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleSource);
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    let content = buffer_text(&terminal);
    assert!(content.contains("Document JSON"));
    assert!(content.contains("first block"));
}

#[test]
fn test_render_scrolled_document_does_not_crash() {
    let blocks: Vec<Block> = (0..100)
        .map(|i| Block::paragraph(format!("block {i}")))
        .collect();
    let mut model = Model::new(PathBuf::from("test.json"), blocks, (80, 24));
    model = update(model, Message::MoveDocEnd);

    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(&mut model, frame)).unwrap();

    assert!(buffer_text(&terminal).contains("block 99"));
}
