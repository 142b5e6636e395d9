//! Caret addressing.
//!
//! A caret target names a position inside one block's text: either a
//! character offset or the `Last` sentinel. [`resolve`] turns a target into
//! a concrete column, clamped to the text length, so callers can hand the
//! result straight to the rendering layer.

/// A logical caret position within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretTarget {
    /// A character offset from the start of the block's text.
    Offset(usize),
    /// The position after the last character.
    Last,
}

/// Resolve a caret target against a block's text.
///
/// `Offset(n)` clamps to the character count; `Last` resolves to it. Text
/// without any characters always resolves to 0. The function is pure, so
/// resolving the same target twice yields the same column.
pub fn resolve(target: CaretTarget, text: &str) -> usize {
    let len = text.chars().count();
    match target {
        CaretTarget::Offset(n) => n.min(len),
        CaretTarget::Last => len,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_offset_within_text_is_kept() {
        assert_eq!(resolve(CaretTarget::Offset(3), "hello"), 3);
    }

    #[test]
    fn test_offset_beyond_text_clamps_to_length() {
        assert_eq!(resolve(CaretTarget::Offset(99), "hello"), 5);
    }

    #[test]
    fn test_last_resolves_to_length() {
        assert_eq!(resolve(CaretTarget::Last, "hello"), 5);
    }

    #[test]
    fn test_empty_text_resolves_to_start() {
        assert_eq!(resolve(CaretTarget::Offset(4), ""), 0);
        assert_eq!(resolve(CaretTarget::Last, ""), 0);
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        // 'é' is two bytes but one char
        assert_eq!(resolve(CaretTarget::Last, "café"), 4);
        assert_eq!(resolve(CaretTarget::Offset(10), "café"), 4);
    }

    proptest! {
        #[test]
        fn prop_resolved_offset_never_exceeds_length(n in 0usize..1000, text in ".{0,40}") {
            let col = resolve(CaretTarget::Offset(n), &text);
            prop_assert!(col <= text.chars().count());
        }

        #[test]
        fn prop_resolve_is_idempotent(n in 0usize..1000, text in ".{0,40}") {
            let once = resolve(CaretTarget::Offset(n), &text);
            let twice = resolve(CaretTarget::Offset(once), &text);
            prop_assert_eq!(once, twice);
        }
    }
}
