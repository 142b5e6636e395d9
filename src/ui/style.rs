//! Tag styles and style-map translation.
//!
//! A block's base look comes from its tag; entries in its style map override
//! what a terminal can express (currently `color`). Unrenderable entries
//! (font sizes, unknown properties) are carried in the document but ignored
//! here.

use ratatui::style::{Color, Modifier, Style};

use crate::block::{Block, BlockTag, PropValue};

/// Base style for a block tag.
pub fn tag_style(tag: BlockTag) -> Style {
    match tag {
        BlockTag::Paragraph => Style::default(),
        BlockTag::Link => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        BlockTag::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        BlockTag::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        BlockTag::Heading(3) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        BlockTag::Heading(_) => Style::default().add_modifier(Modifier::BOLD),
    }
}

/// The full presentation style of a block: tag base plus style-map
/// overrides.
pub fn block_style(block: &Block) -> Style {
    let mut style = tag_style(block.tag);
    if let Some(color) = block
        .style
        .get("color")
        .and_then(PropValue::as_text)
        .and_then(parse_color)
    {
        style = style.fg(color);
    }
    style
}

/// Parse a CSS-like color value into a terminal color.
///
/// Accepts `#rrggbb`, `#rgb`, and the basic named colors. Anything else is
/// `None` - the value stays in the document, it just has no terminal
/// rendering.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::Rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::Rgb(r, g, b))
            }
            _ => None,
        };
    }
    match value.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        _ => None,
    }
}
